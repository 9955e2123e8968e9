//! RGBA color type with straight (non-premultiplied) alpha.
//!
//! Colors parse from and serialize to hex strings in `#RRGGBB` or
//! `#AARRGGBB` form (alpha first, matching the usual mobile convention).

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error parsing a hex color string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),

    #[error("color must have 6 or 8 hex digits: {0:?}")]
    BadLength(String),

    #[error("invalid hex digit in color: {0:?}")]
    BadDigit(String),
}

/// An 8-bit straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Fully opaque color from RGB components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Parse `#RRGGBB` (opaque) or `#AARRGGBB`.
    pub fn from_hex(s: &str) -> Result<Color, ColorParseError> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        let digits = match hex.len() {
            6 | 8 => u32::from_str_radix(hex, 16)
                .map_err(|_| ColorParseError::BadDigit(s.to_string()))?,
            _ => return Err(ColorParseError::BadLength(s.to_string())),
        };

        let a = if hex.len() == 8 {
            (digits >> 24) as u8
        } else {
            255
        };

        Ok(Color {
            r: (digits >> 16) as u8,
            g: (digits >> 8) as u8,
            b: digits as u8,
            a,
        })
    }

    /// Format as `#RRGGBB` when opaque, `#AARRGGBB` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }

    /// Same color with the alpha channel replaced.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Color {
        Color { a, ..self }
    }

    /// Same color with alpha scaled by `factor` (rounded).
    ///
    /// Used for translucent layers derived from an opaque base, e.g. a
    /// factor of 0.3 turns alpha 255 into 77.
    #[inline]
    pub fn with_alpha_factor(self, factor: f32) -> Color {
        let a = (self.a as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Color { a, ..self }
    }

    /// Source-over composite `self` onto `dst`.
    pub fn over(self, dst: Color) -> Color {
        if self.a == 255 {
            return self;
        }
        if self.a == 0 {
            return dst;
        }

        let sa = self.a as f32 / 255.0;
        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Color::TRANSPARENT;
        }

        let blend = |s: u8, d: u8| -> u8 {
            let s = s as f32 / 255.0;
            let d = d as f32 / 255.0;
            let c = (s * sa + d * da * (1.0 - sa)) / out_a;
            (c * 255.0).round().clamp(0.0, 255.0) as u8
        };

        Color {
            r: blend(self.r, dst.r),
            g: blend(self.g, dst.g),
            b: blend(self.b, dst.b),
            a: (out_a * 255.0).round() as u8,
        }
    }

    /// Source-over with the source alpha additionally scaled by `coverage`
    /// in [0, 1]. This is the anti-aliasing entry point: partial pixel
    /// coverage behaves like partial opacity.
    #[inline]
    pub fn over_with_coverage(self, dst: Color, coverage: f32) -> Color {
        if coverage >= 1.0 {
            return self.over(dst);
        }
        if coverage <= 0.0 {
            return dst;
        }
        self.with_alpha_factor(coverage).over(dst)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(de::Error::custom)
    }
}
