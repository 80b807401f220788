//! Color model: hex parsing, hex formatting and swatch brightness.
//!
//! Colors are carried as [`Rgb`] (`palette::Srgb<u8>`) everywhere in the
//! crate. Hex strings are only used at the edges, either as user input or in
//! serialized presets, where they are wrapped in a validated [`HexColor`].

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// An 8-bit sRGB color.
pub type Rgb = Srgb<u8>;

/// Brightness at or above which a swatch counts as "light".
pub const LIGHT_THRESHOLD: f32 = 126.0;

const WHITE: Rgb = Srgb::new(255, 255, 255);
const BLACK: Rgb = Srgb::new(0, 0, 0);

// ============================================================================
// Errors
// ============================================================================

/// Errors produced while parsing hex colors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input did not have exactly six hex digits after an optional `#`.
    #[error("expected 6 hex digits, got {0:?}")]
    InvalidLength(String),

    /// The input contained a character that is not a hex digit.
    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

// ============================================================================
// Conversions
// ============================================================================

/// Parses a 6-digit hex string (with or without a leading `#`) into an RGB color.
///
/// Malformed input is rejected rather than mapped to black.
///
/// ```
/// use mc_gradient::color::hex_to_rgb;
///
/// let red = hex_to_rgb("#FF0000").unwrap();
/// assert_eq!((red.red, red.green, red.blue), (255, 0, 0));
/// assert!(hex_to_rgb("F00").is_err());
/// ```
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
    if digits.len() != 6 {
        return Err(ColorError::InvalidLength(hex.to_string()));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidDigit(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::InvalidDigit(hex.to_string()))
    };

    Ok(Srgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Formats a color as six uppercase hex digits, without a `#` prefix.
pub fn rgb_to_hex(color: Rgb) -> String {
    format!("{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

/// Perceptual brightness of a color on a 0-255 scale.
///
/// Uses the `(299 R + 587 G + 114 B) / 1000` weighting.
pub fn brightness(color: Rgb) -> f32 {
    (color.red as f32 * 299.0 + color.green as f32 * 587.0 + color.blue as f32 * 114.0) / 1000.0
}

/// Returns true if a swatch of this color should get a dark outline.
pub fn is_light(color: Rgb) -> bool {
    brightness(color) >= LIGHT_THRESHOLD
}

/// Picks a contrasting outline color for a swatch: black on light colors,
/// white on dark ones.
pub fn outline_color(color: Rgb) -> Rgb {
    if is_light(color) { BLACK } else { WHITE }
}

// ============================================================================
// HexColor
// ============================================================================

/// A validated color that serializes as `#RRGGBB`.
///
/// Deserialization accepts the digits with or without `#`, in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(Rgb);

impl HexColor {
    /// Wraps an RGB color.
    pub const fn new(color: Rgb) -> Self {
        Self(color)
    }

    /// Creates a color from its three channels.
    pub const fn from_channels(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// Returns the underlying RGB color.
    pub fn rgb(self) -> Rgb {
        self.0
    }

    /// Returns the six hex digits without `#`.
    pub fn digits(self) -> String {
        rgb_to_hex(self.0)
    }
}

impl From<Rgb> for HexColor {
    fn from(color: Rgb) -> Self {
        Self(color)
    }
}

impl From<HexColor> for Rgb {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", rgb_to_hex(self.0))
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for HexColor {
    fn schema_name() -> String {
        "HexColor".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_prefix() {
        assert_eq!(hex_to_rgb("#00FFE0").unwrap(), Srgb::new(0, 255, 224));
        assert_eq!(hex_to_rgb("eb00ff").unwrap(), Srgb::new(235, 0, 255));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(matches!(hex_to_rgb("#FFF"), Err(ColorError::InvalidLength(_))));
        assert!(matches!(hex_to_rgb("GG0000"), Err(ColorError::InvalidDigit(_))));
        assert!(matches!(hex_to_rgb(""), Err(ColorError::InvalidLength(_))));
        assert!(hex_to_rgb("#ÿÿÿ").is_err());
    }

    #[test]
    fn formats_zero_padded_uppercase() {
        assert_eq!(rgb_to_hex(Srgb::new(1, 10, 255)), "010AFF");
        assert_eq!(HexColor::from_channels(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn outline_contrasts_with_swatch() {
        assert_eq!(outline_color(Srgb::new(255, 255, 255)), BLACK);
        assert_eq!(outline_color(Srgb::new(0, 0, 0)), WHITE);
        // Pure blue is dark despite a maxed channel
        assert_eq!(outline_color(Srgb::new(0, 0, 255)), WHITE);
        assert!(is_light(Srgb::new(255, 255, 0)));
    }

    #[test]
    fn hex_color_serde_roundtrip() {
        let color: HexColor = serde_json::from_str("\"00ffe0\"").unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#00FFE0\"");
        assert!(serde_json::from_str::<HexColor>("\"nope\"").is_err());
    }
}
