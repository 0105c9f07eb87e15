//! Greedy, single-pass word wrap.
//!
//! The layout walks the text once and never backtracks:
//!
//! 1. `\n` moves the cursor to the start of the next line.
//! 2. A word (a run of non-whitespace) that would cross `x + max_width`
//!    starts a new line first. Words wider than `max_width` are not split
//!    and overflow their line.
//! 3. Whitespace after a word is consumed one character at a time; a
//!    character that would cross the limit starts a new line first. Spaces
//!    are placed as (blank) glyphs, other whitespace only advances.
//!
//! The word scan and the whitespace scan both test for `\n` on top of the
//! whitespace check, so a `\n` always ends up in rule 1.

use super::render::Stroke;

/// A character positioned by [`wrap_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedGlyph {
    /// Character to draw.
    pub ch: char,
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
}

/// C-locale `isspace`: space, `\t`, `\n`, `\v`, `\f`, `\r`.
#[inline]
pub(crate) const fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Position every drawable character of `text`, starting at (x, y).
pub fn wrap_layout(text: &str, x: u32, y: u32, stroke: Stroke, max_width: u32) -> Vec<PlacedGlyph> {
    let chars: Vec<char> = text.chars().collect();
    let char_width = stroke.char_width();
    let line_height = stroke.line_height();
    let limit = x.saturating_add(max_width);

    let mut placed = Vec::with_capacity(chars.len());
    let mut cur_x = x;
    let mut cur_y = y;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '\n' {
            cur_x = x;
            cur_y = cur_y.saturating_add(line_height);
            i += 1;
            continue;
        }

        let word_start = i;
        while i < chars.len() && !is_space(chars[i]) && chars[i] != '\n' {
            i += 1;
        }
        let word = &chars[word_start..i];

        let word_width = char_width.saturating_mul(u32::try_from(word.len()).unwrap_or(u32::MAX));
        if cur_x.saturating_add(word_width) > limit {
            cur_x = x;
            cur_y = cur_y.saturating_add(line_height);
        }

        for &ch in word {
            placed.push(PlacedGlyph { ch, x: cur_x, y: cur_y });
            cur_x = cur_x.saturating_add(char_width);
        }

        while i < chars.len() && is_space(chars[i]) && chars[i] != '\n' {
            if cur_x.saturating_add(char_width) > limit {
                cur_x = x;
                cur_y = cur_y.saturating_add(line_height);
            }
            if chars[i] == ' ' {
                placed.push(PlacedGlyph { ch: ' ', x: cur_x, y: cur_y });
            }
            cur_x = cur_x.saturating_add(char_width);
            i += 1;
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(placed: &[PlacedGlyph]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut last_y = None;
        for g in placed {
            if last_y != Some(g.y) {
                out.push(String::new());
                last_y = Some(g.y);
            }
            if let Some(row) = out.last_mut() {
                row.push(g.ch);
            }
        }
        out
    }

    #[test]
    fn test_fits_on_one_line() {
        let placed = wrap_layout("ab cd", 10, 20, Stroke::Thin, 100);
        let xs: Vec<u32> = placed.iter().map(|g| g.x).collect();
        assert_eq!(xs, vec![10, 18, 26, 34, 42]);
        assert!(placed.iter().all(|g| g.y == 20));
    }

    #[test]
    fn test_word_breaks_before_overflow() {
        let placed = wrap_layout("hello world", 0, 0, Stroke::Thin, 80);
        assert_eq!(rows(&placed), vec!["hello ", "world"]);
        let w = placed.iter().find(|g| g.ch == 'w').unwrap();
        assert_eq!((w.x, w.y), (0, 8));
    }

    #[test]
    fn test_word_exactly_max_width() {
        // "hello" is exactly 40px: it fits, then the space and the next
        // word each start a new line.
        let placed = wrap_layout("hello world", 0, 0, Stroke::Thin, 40);
        assert_eq!(rows(&placed), vec!["hello", " ", "world"]);
        let last_hello = placed.iter().find(|g| g.ch == 'o').unwrap();
        assert!(last_hello.x + 8 <= 40);
        let w = placed.iter().find(|g| g.ch == 'w').unwrap();
        assert_eq!((w.x, w.y), (0, 16));
    }

    #[test]
    fn test_newline_always_breaks() {
        let placed = wrap_layout("a\nb", 0, 0, Stroke::Thin, 1000);
        assert_eq!(placed[0], PlacedGlyph { ch: 'a', x: 0, y: 0 });
        assert_eq!(placed[1], PlacedGlyph { ch: 'b', x: 0, y: 8 });
    }

    #[test]
    fn test_consecutive_newlines() {
        let placed = wrap_layout("a\n\nb", 5, 0, Stroke::Thin, 1000);
        assert_eq!(placed[1], PlacedGlyph { ch: 'b', x: 5, y: 16 });
    }

    #[test]
    fn test_long_word_overflows() {
        let placed = wrap_layout("abcdef", 0, 0, Stroke::Thin, 16);
        // Breaks once (cursor reset to the origin), never splits.
        assert!(placed.iter().all(|g| g.y == 8));
        assert_eq!(placed.last().unwrap().x, 40);
    }

    #[test]
    fn test_tabs_advance_without_glyph() {
        let placed = wrap_layout("a\tb", 0, 0, Stroke::Thin, 1000);
        assert_eq!(rows(&placed), vec!["ab"]);
        assert_eq!(placed[1].x, 16);
    }

    #[test]
    fn test_thick_uses_double_metrics() {
        let placed = wrap_layout("ab\nc", 0, 0, Stroke::Thick, 1000);
        assert_eq!(placed[1].x, 16);
        assert_eq!(placed[2].y, 16);
    }

    #[test]
    fn test_non_ascii_counts_one_cell() {
        let placed = wrap_layout("é!", 0, 0, Stroke::Thin, 1000);
        assert_eq!(placed[1].x, 8);
    }
}
