//! Bgra: The framebuffer's native 32-bit pixel.
//!
//! # Memory Layout
//!
//! ```text
//! ┌────────┬────────┬────────┬────────┐
//! │  blue  │ green  │  red   │ alpha  │
//! │   u8   │   u8   │   u8   │   u8   │
//! └────────┴────────┴────────┴────────┘
//! ```
//!
//! Configuration files spell colors the other way round (`#RRGGBBAA`), so
//! parsing reorders the channels once and painting copies the 4 bytes as-is.

/// A 4-byte pixel in device order (Blue, Green, Red, Alpha).
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bgra {
    /// Blue channel (0-255)
    pub b: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Red channel (0-255)
    pub r: u8,
    /// Alpha channel (0 = fully transparent)
    pub a: u8,
}

const _: () = assert!(
    std::mem::size_of::<Bgra>() == 4,
    "Bgra must match the 32 bpp pixel size"
);

impl Bgra {
    /// Create a color from its red, green, blue and alpha channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { b, g, r, a }
    }

    /// All channels zero. Painting this erases the overlay.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque white, also the fallback for unparseable colors.
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF, 0xFF);
    /// Opaque light gray (`#CCCCCCFF`).
    pub const LIGHT_GRAY: Self = Self::new(0xCC, 0xCC, 0xCC, 0xFF);

    /// The bytes as they are laid out in video memory.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }

    /// Rebuild a color from 4 bytes of video memory.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
            a: bytes[3],
        }
    }

    /// Parse a `#RRGGBBAA` string.
    ///
    /// Returns `None` unless the input is a `#` followed by exactly eight
    /// hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?))
    }

    /// Parse a `#RRGGBBAA` string, falling back to opaque white.
    pub fn parse_or_white(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or(Self::WHITE)
    }
}

impl std::fmt::Debug for Bgra {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl From<[u8; 4]> for Bgra {
    /// Convert from device-order bytes.
    #[inline]
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reorders_to_bgra() {
        let c = Bgra::from_hex("#11223344").unwrap();
        assert_eq!(c.to_bytes(), [0x33, 0x22, 0x11, 0x44]);
    }

    #[test]
    fn test_parse_mixed_case() {
        let c = Bgra::parse_or_white("#cCcCcCfF");
        assert_eq!(c, Bgra::LIGHT_GRAY);
    }

    #[test]
    fn test_parse_fallback_to_white() {
        for bad in ["", "#", "11223344", "#1122334", "#112233445", "#11223G44", "#+1223344", "#１２"] {
            assert_eq!(Bgra::parse_or_white(bad).to_bytes(), [0xFF; 4], "input {bad:?}");
        }
    }

    #[test]
    fn test_transparent_is_all_zero() {
        assert_eq!(Bgra::parse_or_white("#00000000"), Bgra::TRANSPARENT);
        assert_eq!(Bgra::TRANSPARENT.to_bytes(), [0; 4]);
    }

    #[test]
    fn test_debug_is_config_spelling() {
        assert_eq!(format!("{:?}", Bgra::new(1, 2, 3, 4)), "#01020304");
    }
}
