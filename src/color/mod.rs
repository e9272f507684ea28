//! Color primitives
//!
//! Canonical colors are `#RRGGBB` strings with uppercase hex digits.
//! Parsing is strict and returns a typed error; the display helpers built
//! on top of it are total and fall back to black.

pub mod generate;

pub use generate::{harmonious, uniform};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::palette::PaletteError;

/// Output of `format_color` for anything that does not parse.
pub const FALLBACK_HEX: &str = "#000000";
pub const FALLBACK_RGB: &str = "rgb(0, 0, 0)";

/// Brightness below this is considered dark.
pub const DARK_THRESHOLD: u8 = 128;

/// How colors are shown to the user. Storage always keeps hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    #[default]
    Hex,
    Rgb,
}

impl DisplayFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayFormat::Hex => "hex",
            DisplayFormat::Rgb => "rgb",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DisplayFormat::Hex => DisplayFormat::Rgb,
            DisplayFormat::Rgb => DisplayFormat::Hex,
        }
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayFormat {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(DisplayFormat::Hex),
            "rgb" => Ok(DisplayFormat::Rgb),
            _ => Err(PaletteError::InvalidFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    MissingMarker,
    BadLength(usize),
    BadDigits(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMarker => write!(f, "color must start with '#'"),
            Self::BadLength(n) => write!(f, "expected 6 hex digits, got {n} characters"),
            Self::BadDigits(msg) => write!(f, "invalid hex digits: {msg}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a 24-bit integer (`0xRRGGBB`).
    pub fn from_u32(v: u32) -> Self {
        let [_, r, g, b] = (v & 0x00FF_FFFF).to_be_bytes();
        Self { r, g, b }
    }

    /// Canonical `#RRGGBB` rendering.
    pub fn to_hex(self) -> String {
        format!("#{}", hex::encode_upper([self.r, self.g, self.b]))
    }

    pub fn to_rgb_string(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Weighted luminance in `[0, 255]`: `(R*299 + G*587 + B*114) / 1000`.
    pub fn brightness(self) -> f64 {
        let weighted = u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114;
        f64::from(weighted) / 1000.0
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').ok_or(ColorParseError::MissingMarker)?;
        if digits.len() != 6 {
            return Err(ColorParseError::BadLength(digits.len()));
        }
        let mut out = [0u8; 3];
        hex::decode_to_slice(digits, &mut out)
            .map_err(|e| ColorParseError::BadDigits(e.to_string()))?;
        Ok(Self::new(out[0], out[1], out[2]))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parse and re-render a color in canonical form, if it is well formed.
pub fn canonicalize(color: &str) -> Option<String> {
    color.parse::<Rgb>().ok().map(Rgb::to_hex)
}

/// Render a stored color for display. Never fails: malformed input is shown
/// as black in the requested format.
pub fn format_color(color: &str, format: DisplayFormat) -> String {
    hex_to_display(color, format)
}

/// Hex to the requested representation, with the black fallback.
pub fn hex_to_display(hex: &str, format: DisplayFormat) -> String {
    match (hex.parse::<Rgb>(), format) {
        (Ok(rgb), DisplayFormat::Hex) => rgb.to_hex(),
        (Ok(rgb), DisplayFormat::Rgb) => rgb.to_rgb_string(),
        (Err(_), DisplayFormat::Hex) => FALLBACK_HEX.to_string(),
        (Err(_), DisplayFormat::Rgb) => FALLBACK_RGB.to_string(),
    }
}

/// Brightness of a canonical color, `None` when malformed.
pub fn brightness(color: &str) -> Option<f64> {
    color.parse::<Rgb>().ok().map(Rgb::brightness)
}

/// Whether a renderer should use a light foreground on this color.
/// Malformed input counts as not dark.
pub fn is_dark(color: &str) -> bool {
    brightness(color).is_some_and(|b| b < f64::from(DARK_THRESHOLD))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_color_hex_and_rgb() {
        assert_eq!(format_color("#FF0000", DisplayFormat::Rgb), "rgb(255, 0, 0)");
        assert_eq!(format_color("#FF0000", DisplayFormat::Hex), "#FF0000");
        assert_eq!(format_color("#a1b2c3", DisplayFormat::Hex), "#A1B2C3");
        assert_eq!(format_color("#0a0b0c", DisplayFormat::Rgb), "rgb(10, 11, 12)");
    }

    #[test]
    fn test_format_color_malformed_falls_back() {
        assert_eq!(format_color("bad", DisplayFormat::Rgb), FALLBACK_RGB);
        assert_eq!(format_color("", DisplayFormat::Rgb), FALLBACK_RGB);
        assert_eq!(format_color("#12345", DisplayFormat::Rgb), FALLBACK_RGB);
        assert_eq!(format_color("#12GG34", DisplayFormat::Rgb), FALLBACK_RGB);
        assert_eq!(format_color("bad", DisplayFormat::Hex), FALLBACK_HEX);
        assert_eq!(hex_to_display("#12", DisplayFormat::Hex), FALLBACK_HEX);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("123456".parse::<Rgb>(), Err(ColorParseError::MissingMarker));
        assert_eq!("#1234".parse::<Rgb>(), Err(ColorParseError::BadLength(4)));
        assert!(matches!("#zz0000".parse::<Rgb>(), Err(ColorParseError::BadDigits(_))));
    }

    #[test]
    fn test_is_dark() {
        assert!(is_dark("#000000"));
        assert!(!is_dark("#FFFFFF"));
        // 128 * (299 + 587 + 114) / 1000 == 128 exactly
        assert_eq!(brightness("#808080"), Some(128.0));
        assert!(!is_dark("#808080"));
        assert!(is_dark("#7F7F7F"));
        assert!(!is_dark("nope"));
    }

    #[test]
    fn test_from_u32() {
        assert_eq!(Rgb::from_u32(0x00AB_CDEF).to_hex(), "#ABCDEF");
        assert_eq!(Rgb::from_u32(0).to_hex(), "#000000");
        assert_eq!(Rgb::from_u32(0x00FF_FFFF).to_hex(), "#FFFFFF");
    }

    #[test]
    fn test_display_format_parse() {
        assert_eq!("hex".parse::<DisplayFormat>(), Ok(DisplayFormat::Hex));
        assert_eq!(" RGB ".parse::<DisplayFormat>(), Ok(DisplayFormat::Rgb));
        assert_eq!(
            "invalid".parse::<DisplayFormat>(),
            Err(PaletteError::InvalidFormat("invalid".into()))
        );
    }
}
