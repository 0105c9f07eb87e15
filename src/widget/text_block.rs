//! Text Block Widget: A region of text that is erased before every redraw.

use super::traits::{Palette, Widget};
use crate::font::GLYPH_HEIGHT;
use crate::layout::Rect;
use crate::surface::Surface;
use crate::text::{render_string, render_string_wrap, Stroke, TextStyle};
use std::ops::DerefMut;

/// How text is laid out inside a [`TextBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFlow {
    /// One line; anything past the right edge is clipped.
    SingleLine,
    /// Greedy word wrap at the given width in pixels.
    Wrap(u32),
}

/// A text region such as the title or the status line.
///
/// The erase area is `lines` glyph rows tall. Wrapped text that needs more
/// rows is still drawn, but the next update only erases `lines` rows.
#[derive(Debug, Clone)]
pub struct TextBlock {
    /// Text origin and erase area.
    bounds: Rect,
    /// Layout mode.
    flow: TextFlow,
    /// Glyph thickness.
    stroke: Stroke,
    /// Current text.
    text: String,
}

impl TextBlock {
    /// Create a block whose erase area starts at (x, y), spans to `right`
    /// and is `lines` thin glyph rows tall.
    pub fn new(x: u32, y: u32, right: u32, lines: u32, flow: TextFlow) -> Self {
        Self {
            bounds: Rect::from_corners(x, y, right, y + GLYPH_HEIGHT * lines),
            flow,
            stroke: Stroke::Thin,
            text: String::new(),
        }
    }

    /// Get the current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Does not paint.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for TextBlock {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint<M: DerefMut<Target = [u8]>>(&self, surface: &mut Surface<M>, palette: &Palette) {
        self.erase(surface, palette);
        let style = TextStyle {
            color: palette.text,
            stroke: self.stroke,
        };
        match self.flow {
            TextFlow::SingleLine => {
                render_string(surface, &self.text, self.bounds.x, self.bounds.y, style);
            }
            TextFlow::Wrap(max_width) => {
                render_string_wrap(surface, &self.text, self.bounds.x, self.bounds.y, style, max_width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Bgra;

    const PALETTE: Palette = Palette {
        background: Bgra::new(0x10, 0x10, 0x10, 0xFF),
        bar: Bgra::LIGHT_GRAY,
        text: Bgra::WHITE,
    };

    #[test]
    fn test_bounds_from_lines() {
        let block = TextBlock::new(10, 90, 100, 3, TextFlow::Wrap(80));
        assert_eq!(block.bounds(), Rect::new(10, 90, 90, 24));
    }

    #[test]
    fn test_repaint_replaces_old_text() {
        let mut surface = Surface::in_memory(64, 16);
        let mut block = TextBlock::new(0, 0, 64, 1, TextFlow::SingleLine);

        block.set_text("WWWW");
        block.paint(&mut surface, &PALETTE);
        block.set_text("");
        block.paint(&mut surface, &PALETTE);

        assert!(surface.is_filled(block.bounds(), PALETTE.background));
        // Below the block nothing was touched.
        assert!(surface.is_filled(Rect::new(0, 8, 64, 8), Bgra::TRANSPARENT));
    }

    #[test]
    fn test_paint_draws_text_color() {
        let mut surface = Surface::in_memory(64, 8);
        let mut block = TextBlock::new(0, 0, 64, 1, TextFlow::SingleLine);
        block.set_text("#");
        block.paint(&mut surface, &PALETTE);
        assert!(!surface.is_filled(Rect::new(0, 0, 8, 8), PALETTE.background));
        assert!(surface.is_filled(Rect::new(8, 0, 56, 8), PALETTE.background));
    }
}
