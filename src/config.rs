//! Configuration: Title, window size and colors, read once at startup.
//!
//! The file is line-oriented `key=value` text:
//!
//! ```text
//! # lines starting with '#' are comments
//! title=Fast Restore in Progress
//! width=800
//! height=200
//! bg_color=#00000000
//! bar_color=#CCCCCCFF
//! text_color=#FFFFFFFF
//! ```
//!
//! Only a `#` in the very first column starts a comment, so color values
//! keep their `#` prefix. Loading never fails: a missing file gives the
//! defaults and bad values are skipped.

use crate::surface::Bgra;
use crate::widget::Palette;
use log::{debug, warn};
use std::path::Path;

/// Longest title kept, in bytes.
pub const MAX_TITLE_LEN: usize = 127;

/// Settings for one rendering session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Text shown at the top of the window.
    pub title: String,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Window background.
    pub bg_color: Bgra,
    /// Progress bar border and fill.
    pub bar_color: Bgra,
    /// Title and status text.
    pub text_color: Bgra,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Fast Restore in Progress".to_string(),
            width: 800,
            height: 200,
            bg_color: Bgra::TRANSPARENT,
            bar_color: Bgra::LIGHT_GRAY,
            text_color: Bgra::WHITE,
        }
    }
}

impl Config {
    /// Load a configuration file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                debug!("loading config from {}", path.display());
                Self::parse(&contents)
            }
            Err(e) => {
                debug!("no config at {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse configuration text on top of the defaults.
    pub fn parse(contents: &str) -> Self {
        let mut config = Self::default();
        for line in contents.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            config.apply(key.trim(), value.trim());
        }
        config
    }

    /// Apply a single `key=value` pair.
    fn apply(&mut self, key: &str, value: &str) {
        match key {
            "title" => self.title = truncate_title(value),
            "width" => set_dimension(&mut self.width, key, value),
            "height" => set_dimension(&mut self.height, key, value),
            "bg_color" => self.bg_color = Bgra::parse_or_white(value),
            "bar_color" => self.bar_color = Bgra::parse_or_white(value),
            "text_color" => self.text_color = Bgra::parse_or_white(value),
            _ => warn!("ignoring unknown config key {key:?}"),
        }
    }

    /// The colors as a widget palette.
    pub const fn palette(&self) -> Palette {
        Palette {
            background: self.bg_color,
            bar: self.bar_color,
            text: self.text_color,
        }
    }
}

fn set_dimension(slot: &mut u32, key: &str, value: &str) {
    match value.parse() {
        Ok(v) => *slot = v,
        Err(e) => warn!("ignoring {key}={value:?}: {e}"),
    }
}

fn truncate_title(value: &str) -> String {
    let mut end = value.len().min(MAX_TITLE_LEN);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.title, "Fast Restore in Progress");
        assert_eq!((config.width, config.height), (800, 200));
        assert_eq!(config.bg_color.to_bytes(), [0, 0, 0, 0]);
        assert_eq!(config.bar_color.to_bytes(), [0xCC, 0xCC, 0xCC, 0xFF]);
        assert_eq!(config.text_color.to_bytes(), [0xFF; 4]);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = Config::parse(
            "# overlay\n\
             title=Flashing image\n\
             width=640\n\
             height=120\n\
             bg_color=#10203040\n\
             bar_color=#00FF00FF\n\
             text_color=#FF000080\n",
        );
        assert_eq!(config.title, "Flashing image");
        assert_eq!((config.width, config.height), (640, 120));
        assert_eq!(config.bg_color.to_bytes(), [0x30, 0x20, 0x10, 0x40]);
        assert_eq!(config.bar_color.to_bytes(), [0x00, 0xFF, 0x00, 0xFF]);
        assert_eq!(config.text_color.to_bytes(), [0x00, 0x00, 0xFF, 0x80]);
    }

    #[test]
    fn test_hash_only_comments_in_first_column() {
        let config = Config::parse("#width=10\n bar_color=#01020304\n");
        assert_eq!(config.width, 800);
        assert_eq!(config.bar_color, Bgra::new(1, 2, 3, 4));
    }

    #[test]
    fn test_bad_values_ignored_or_white() {
        let config = Config::parse("width=wide\nheight=-3\nbg_color=blue\nnonsense\nfoo=bar\r\n");
        assert_eq!((config.width, config.height), (800, 200));
        assert_eq!(config.bg_color, Bgra::WHITE);
    }

    #[test]
    fn test_crlf_and_value_with_equals() {
        let config = Config::parse("title=a=b\r\nwidth=300\r\n");
        assert_eq!(config.title, "a=b");
        assert_eq!(config.width, 300);
    }

    #[test]
    fn test_title_bounded() {
        let long = "é".repeat(100);
        let config = Config::parse(&format!("title={long}"));
        assert!(config.title.len() <= MAX_TITLE_LEN);
        assert_eq!(config.title.len(), 126);
    }

    #[test]
    fn test_missing_file_defaults() {
        let config = Config::load(Path::new("/nonexistent/fbprogress.cfg"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("fbprogress-test-{}.cfg", std::process::id()));
        std::fs::write(&path, "width=1024\n").unwrap();
        let config = Config::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.width, 1024);
        assert_eq!(config.title, Config::default().title);
    }

    #[test]
    fn test_palette() {
        let palette = Config::default().palette();
        assert_eq!(palette.background, Bgra::TRANSPARENT);
        assert_eq!(palette.bar, Bgra::LIGHT_GRAY);
        assert_eq!(palette.text, Bgra::WHITE);
    }
}
