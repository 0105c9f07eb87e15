//! Window: The overlay's rectangle, pinned to the top-right corner.

use super::rect::Rect;

/// Compute the window rectangle for a surface of the given size.
///
/// The window's right edge equals `surface_width` and its top edge is 0.
/// Dimensions larger than the surface are reduced to fit.
pub fn window_rect(width: u32, height: u32, surface_width: u32, surface_height: u32) -> Rect {
    let width = width.min(surface_width);
    let height = height.min(surface_height);
    Rect::new(surface_width - width, 0, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_aligned() {
        let w = window_rect(800, 200, 1280, 720);
        assert_eq!(w, Rect::new(480, 0, 800, 200));
        assert_eq!(w.right(), 1280);
    }

    #[test]
    fn test_oversized_window_fits_surface() {
        let w = window_rect(2000, 1000, 1280, 720);
        assert_eq!(w, Rect::new(0, 0, 1280, 720));
    }
}
