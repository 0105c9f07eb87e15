//! Rect: A rectangle primitive in surface pixel coordinates.

/// A rectangle defined by position and size.
///
/// Covers the half-open area `[x, x + width) × [y, y + height)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (pixel column) of the top-left corner.
    pub x: u32,
    /// Y coordinate (pixel row) of the top-left corner.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from its top-left and bottom-right (exclusive) corners.
    ///
    /// Inverted corners produce an empty rectangle.
    #[inline]
    pub const fn from_corners(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1))
    }

    /// Create a rectangle covering a whole surface.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Check if this rectangle intersects with another.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// The overlapping area of two rectangles, or [`Rect::ZERO`].
    #[inline]
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        if !self.intersects(other) {
            return Self::ZERO;
        }
        Self::from_corners(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Shrink the rectangle by a margin on all sides.
    #[inline]
    #[must_use]
    pub const fn shrink(&self, margin: u32) -> Self {
        let m2 = margin * 2;
        if self.width <= m2 || self.height <= m2 {
            return Self::ZERO;
        }
        Self::new(self.x + margin, self.y + margin, self.width - m2, self.height - m2)
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners() {
        let r = Rect::from_corners(10, 20, 30, 25);
        assert_eq!(r, Rect::new(10, 20, 20, 5));
        assert!(Rect::from_corners(30, 0, 10, 5).is_empty());
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0, 0, 100, 50);
        let b = Rect::new(90, 40, 20, 20);
        assert_eq!(a.intersection(&b), Rect::new(90, 40, 10, 10));
        assert_eq!(a.intersection(&Rect::new(200, 0, 5, 5)), Rect::ZERO);
    }

    #[test]
    fn test_shrink() {
        let r = Rect::new(10, 50, 770, 26);
        assert_eq!(r.shrink(2), Rect::new(12, 52, 766, 22));
        assert_eq!(Rect::new(0, 0, 4, 4).shrink(2), Rect::ZERO);
    }
}
