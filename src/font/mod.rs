//! Font module: The embedded 8x8 bitmap font.
//!
//! Glyphs come from the public-domain IBM-style set shipped by `font8x8`,
//! restricted to printable ASCII. Each glyph is 8 rows of 8 bits; bit 0 of
//! a row is its leftmost pixel.

use font8x8::legacy::BASIC_LEGACY;

/// Glyph cell width in pixels.
pub const GLYPH_WIDTH: u32 = 8;
/// Glyph cell height in pixels.
pub const GLYPH_HEIGHT: u32 = 8;
/// Code of the first glyph in the table (space).
pub const FIRST_GLYPH: u8 = 0x20;
/// Number of glyphs in the table (`0x20..=0x7E`).
pub const GLYPH_COUNT: usize = 95;

/// Rendered in place of characters the table does not cover.
pub const REPLACEMENT: char = '?';

/// One glyph: a row bitmask per pixel row.
pub type Glyph = [u8; GLYPH_HEIGHT as usize];

/// Table index of a character, if it is printable ASCII.
#[inline]
pub fn glyph_index(ch: char) -> Option<usize> {
    let code = u32::from(ch);
    (u32::from(FIRST_GLYPH)..u32::from(FIRST_GLYPH) + GLYPH_COUNT as u32)
        .contains(&code)
        .then(|| (code - u32::from(FIRST_GLYPH)) as usize)
}

/// Glyph at a table index (`character code - 0x20`).
///
/// # Panics
/// Panics if `index >= GLYPH_COUNT`.
#[inline]
pub fn glyph_at(index: usize) -> Glyph {
    assert!(index < GLYPH_COUNT, "glyph index {index} out of range");
    BASIC_LEGACY[index + FIRST_GLYPH as usize]
}

/// Glyph for a character, or the replacement glyph.
#[inline]
pub fn glyph(ch: char) -> Glyph {
    let index = glyph_index(ch)
        .or_else(|| glyph_index(REPLACEMENT))
        .unwrap_or_default();
    glyph_at(index)
}
