//! Message types for actor communication.
//!
//! [`Command`] is the wire protocol read from the pipe; [`PipeEvent`] is what
//! the pipe actor sends to the engine.

use crate::text::is_space;

/// Line that ends the session.
pub const QUIT_SENTINEL: &str = "QUIT";

/// One parsed line of the command protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show `text` as the status line, then move the bar to `percent`.
    Progress {
        /// Requested percent; the bar clamps it to 0-100.
        percent: i32,
        /// Raw status text, cleaned up at display time.
        text: String,
    },
    /// Tear down and exit.
    Quit,
}

impl Command {
    /// Parse a single line (without its `\n`).
    ///
    /// Progress lines read like `scanf("%d %[^\n]")`: leading whitespace, an
    /// optionally signed integer, optional whitespace, then at least one
    /// character of text. Out-of-range integers saturate. Anything else is
    /// `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line == QUIT_SENTINEL {
            return Some(Self::Quit);
        }

        let body = line.trim_start_matches(is_space);
        let unsigned = body.strip_prefix(['+', '-']).unwrap_or(body);
        let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let number_len = body.len() - unsigned.len() + digits;
        let (number, rest) = body.split_at(number_len);

        let text = rest.trim_start_matches(is_space);
        if text.is_empty() {
            return None;
        }

        let percent = number.parse::<i32>().unwrap_or(if number.starts_with('-') {
            i32::MIN
        } else {
            i32::MAX
        });
        Some(Self::Progress {
            percent,
            text: text.to_string(),
        })
    }
}

/// Events from the pipe thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipeEvent {
    /// A well-formed command line arrived.
    Command(Command),

    /// The pipe could not be read or reopened.
    Error(String),

    /// Pipe thread is shutting down.
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(percent: i32, text: &str) -> Option<Command> {
        Some(Command::Progress {
            percent,
            text: text.to_string(),
        })
    }

    #[test]
    fn test_parse_progress() {
        assert_eq!(Command::parse("42 Installing package-foo"), progress(42, "Installing package-foo"));
        assert_eq!(Command::parse("100 Done"), progress(100, "Done"));
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(Command::parse("QUIT"), Some(Command::Quit));
        assert_eq!(Command::parse("QUIT\r"), Some(Command::Quit));
        assert_eq!(Command::parse("QUIT now"), None);
        assert_eq!(Command::parse("quit"), None);
    }

    #[test]
    fn test_parse_scanf_whitespace() {
        assert_eq!(Command::parse("  7\t  spaced out"), progress(7, "spaced out"));
        // No separator needed between the number and the text.
        assert_eq!(Command::parse("42abc"), progress(42, "abc"));
        // Trailing whitespace belongs to the text.
        assert_eq!(Command::parse("1 a "), progress(1, "a "));
    }

    #[test]
    fn test_parse_signed() {
        assert_eq!(Command::parse("-5 back"), progress(-5, "back"));
        assert_eq!(Command::parse("+150 over"), progress(150, "over"));
    }

    #[test]
    fn test_parse_saturates() {
        assert_eq!(Command::parse("99999999999 big"), progress(i32::MAX, "big"));
        assert_eq!(Command::parse("-99999999999 small"), progress(i32::MIN, "small"));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("42"), None);
        assert_eq!(Command::parse("42   "), None);
        assert_eq!(Command::parse("- 5 x"), None);
        assert_eq!(Command::parse("abc 42 x"), None);
    }

    #[test]
    fn test_parse_strips_carriage_return() {
        assert_eq!(Command::parse("10 step\r"), progress(10, "step"));
    }
}
