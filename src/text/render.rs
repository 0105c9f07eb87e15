//! Glyph, line and wrapped-text blitting.

use super::wrap::wrap_layout;
use crate::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::surface::{Bgra, Surface};
use std::ops::DerefMut;

/// Stroke thickness of rendered glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stroke {
    /// One pixel per glyph bit.
    #[default]
    Thin,
    /// A 2x2 block per glyph bit; glyphs are twice as wide and tall.
    Thick,
}

impl Stroke {
    /// Pixels per glyph bit along each axis.
    #[inline]
    pub const fn scale(self) -> u32 {
        match self {
            Self::Thin => 1,
            Self::Thick => 2,
        }
    }

    /// Horizontal advance of one character.
    #[inline]
    pub const fn char_width(self) -> u32 {
        GLYPH_WIDTH * self.scale()
    }

    /// Vertical advance of one line.
    #[inline]
    pub const fn line_height(self) -> u32 {
        GLYPH_HEIGHT * self.scale()
    }
}

/// Color and thickness used to draw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    /// Ink color.
    pub color: Bgra,
    /// Glyph thickness.
    pub stroke: Stroke,
}

impl TextStyle {
    /// Thin text in the given color.
    #[inline]
    pub const fn thin(color: Bgra) -> Self {
        Self {
            color,
            stroke: Stroke::Thin,
        }
    }

    /// Thick text in the given color.
    #[inline]
    pub const fn thick(color: Bgra) -> Self {
        Self {
            color,
            stroke: Stroke::Thick,
        }
    }
}

/// Draw one character with its top-left corner at (x, y).
///
/// Only set bits are drawn; the cell background is left untouched.
pub fn render_char<M>(surface: &mut Surface<M>, ch: char, x: u32, y: u32, style: TextStyle)
where
    M: DerefMut<Target = [u8]>,
{
    let glyph = font::glyph(ch);
    let scale = style.stroke.scale();

    for (row, bits) in (0u32..).zip(glyph) {
        if bits == 0 {
            continue;
        }
        let py = y.saturating_add(row * scale);
        for col in 0..GLYPH_WIDTH {
            if (bits >> col) & 1 == 0 {
                continue;
            }
            let px = x.saturating_add(col * scale);
            for dy in 0..scale {
                for dx in 0..scale {
                    surface.set_pixel(px.saturating_add(dx), py.saturating_add(dy), style.color);
                }
            }
        }
    }
}

/// Draw a string on a single line, without wrapping.
///
/// Returns the horizontal advance in pixels.
pub fn render_string<M>(surface: &mut Surface<M>, text: &str, x: u32, y: u32, style: TextStyle) -> u32
where
    M: DerefMut<Target = [u8]>,
{
    let advance = style.stroke.char_width();
    let mut cur_x = x;
    for ch in text.chars() {
        render_char(surface, ch, cur_x, y, style);
        cur_x = cur_x.saturating_add(advance);
    }
    cur_x - x
}

/// Draw a string with greedy word wrap at `max_width` pixels from `x`.
///
/// Returns the number of lines used. See [`wrap_layout`] for the rules.
pub fn render_string_wrap<M>(
    surface: &mut Surface<M>,
    text: &str,
    x: u32,
    y: u32,
    style: TextStyle,
    max_width: u32,
) -> u32
where
    M: DerefMut<Target = [u8]>,
{
    let placed = wrap_layout(text, x, y, style.stroke, max_width);
    for glyph in &placed {
        render_char(surface, glyph.ch, glyph.x, glyph.y, style);
    }
    placed
        .last()
        .map_or(0, |last| (last.y - y) / style.stroke.line_height() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;

    const INK: Bgra = Bgra::WHITE;

    fn ink_pixels(surface: &Surface<Vec<u8>>) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                if surface.pixel(x, y) == Some(INK) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_thin_char_matches_glyph_bits() {
        let mut surface = Surface::in_memory(16, 16);
        render_char(&mut surface, 'A', 3, 4, TextStyle::thin(INK));

        let glyph = font::glyph('A');
        for (row, bits) in (0u32..).zip(glyph) {
            for col in 0..GLYPH_WIDTH {
                let expected = (bits >> col) & 1 == 1;
                let painted = surface.pixel(3 + col, 4 + row) == Some(INK);
                assert_eq!(painted, expected, "pixel ({col}, {row})");
            }
        }
    }

    #[test]
    fn test_thick_char_is_2x2_blocks() {
        let mut thin = Surface::in_memory(16, 16);
        render_char(&mut thin, 'W', 0, 0, TextStyle::thin(INK));
        let mut thick = Surface::in_memory(16, 16);
        render_char(&mut thick, 'W', 0, 0, TextStyle::thick(INK));

        let thin_ink = ink_pixels(&thin);
        let thick_ink = ink_pixels(&thick);
        assert_eq!(thick_ink.len(), thin_ink.len() * 4);
        for (x, y) in thin_ink {
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                assert!(thick_ink.contains(&(2 * x + dx, 2 * y + dy)));
            }
        }
    }

    #[test]
    fn test_char_leaves_background() {
        let bg = Bgra::new(1, 2, 3, 4);
        let mut surface = Surface::in_memory(8, 8);
        surface.clear(bg);
        render_char(&mut surface, '.', 0, 0, TextStyle::thin(INK));
        assert_eq!(surface.pixel(0, 0), Some(bg));
    }

    #[test]
    fn test_char_clipped_at_edge() {
        let mut surface = Surface::in_memory(4, 4);
        render_char(&mut surface, '#', 2, 2, TextStyle::thick(INK));
        assert!(ink_pixels(&surface).iter().all(|&(x, y)| x >= 2 && y >= 2));
    }

    #[test]
    fn test_string_advance() {
        let mut surface = Surface::in_memory(64, 16);
        assert_eq!(render_string(&mut surface, "abc", 0, 0, TextStyle::thin(INK)), 24);
        assert_eq!(render_string(&mut surface, "ab", 0, 0, TextStyle::thick(INK)), 32);
        assert_eq!(render_string(&mut surface, "", 5, 0, TextStyle::thin(INK)), 0);
    }

    #[test]
    fn test_string_places_each_char() {
        let mut line = Surface::in_memory(24, 8);
        render_string(&mut line, "xyz", 0, 0, TextStyle::thin(INK));
        let mut single = Surface::in_memory(24, 8);
        for (i, ch) in "xyz".chars().enumerate() {
            render_char(&mut single, ch, i as u32 * 8, 0, TextStyle::thin(INK));
        }
        assert_eq!(line.as_bytes(), single.as_bytes());
    }

    #[test]
    fn test_wrap_line_count_and_rows() {
        let mut surface = Surface::in_memory(64, 64);
        let lines = render_string_wrap(&mut surface, "aaaa bbbb", 0, 0, TextStyle::thin(INK), 40);
        assert_eq!(lines, 2);
        assert!(ink_pixels(&surface).iter().all(|&(_, y)| y < 16));
        assert!(!surface.is_filled(Rect::new(0, 8, 32, 8), Bgra::TRANSPARENT));
    }

    #[test]
    fn test_wrap_empty_text() {
        let mut surface = Surface::in_memory(8, 8);
        assert_eq!(render_string_wrap(&mut surface, "", 0, 0, TextStyle::thin(INK), 8), 0);
    }
}
