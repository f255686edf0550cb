//! Color values used by themes and style descriptors
//!
//! Colors are stored as 8-bit sRGB channels and serialized as hex strings,
//! which is also how themes are written in configuration files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a hex color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string does not have 3, 4, 6 or 8 hex digits
    #[error("Invalid color length in {0:?} (expected #rgb, #rgba, #rrggbb or #rrggbbaa)")]
    InvalidLength(String),

    /// The string contains a non-hex character
    #[error("Invalid hex digit in color {0:?}")]
    InvalidDigit(String),
}

/// Result type for color parsing
pub type Result<T> = std::result::Result<T, ColorParseError>;

/// An sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Opaque white
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create an opaque color from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from its channels including alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from a packed `0xRRGGBB` value
    pub const fn from_rgb24(packed: u32) -> Self {
        Self::rgb(
            ((packed >> 16) & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            (packed & 0xFF) as u8,
        )
    }

    /// Parse a hex color string (`#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`)
    pub fn parse(hex: &str) -> Result<Self> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(hex.to_string()));
        }

        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        let invalid = |_| ColorParseError::InvalidDigit(hex.to_string());

        match digits.len() {
            3 | 4 => {
                let mut channels = [255u8; 4];
                for (i, channel) in channels.iter_mut().enumerate().take(digits.len()) {
                    let n = nibble(i).map_err(invalid)?;
                    *channel = n * 17;
                }
                Ok(Self::rgba(channels[0], channels[1], channels[2], channels[3]))
            }
            6 | 8 => {
                let r = byte(0).map_err(invalid)?;
                let g = byte(2).map_err(invalid)?;
                let b = byte(4).map_err(invalid)?;
                let a = if digits.len() == 8 {
                    byte(6).map_err(invalid)?
                } else {
                    255
                };
                Ok(Self::rgba(r, g, b, a))
            }
            _ => Err(ColorParseError::InvalidLength(hex.to_string())),
        }
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Linearly interpolate channel-wise in sRGB space.
    ///
    /// Intermediate channels are truncated toward zero, so the result is
    /// reproducible for a given `t`. `t` is clamped to `[0, 1]` and the
    /// endpoints return the inputs exactly.
    pub fn lerp(self, to: Color, t: f32) -> Color {
        if t.is_nan() || t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return to;
        }

        let channel = |from: u8, to: u8| -> u8 {
            let from = from as f32;
            let value = from + (to as f32 - from) * t;
            value.clamp(0.0, 255.0) as u8
        };

        Color {
            r: channel(self.r, to.r),
            g: channel(self.g, to.g),
            b: channel(self.b, to.b),
            a: channel(self.a, to.a),
        }
    }

    /// Rough perceived brightness (0-255), used for contrast sanity checks
    pub fn luminance(&self) -> u8 {
        ((self.r as u32 + self.g as u32 + self.b as u32) / 3) as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
