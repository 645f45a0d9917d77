//! Color conversions between the authoring edge (`#rrggbb`) and the
//! rendering edge (normalized RGB triples).

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CortexvisError, Result};

/// A 24-bit color as authored by users, serialized as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(pub [u8; 3]);

impl HexColor {
    /// Mid gray, the fallback color for values outside every authored range.
    pub const GRAY: Self = Self([0x80, 0x80, 0x80]);

    /// Creates a color from its 8-bit channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parses `#rrggbb` (the leading `#` is optional, digits are case-insensitive).
    pub fn parse(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CortexvisError::validation(format!(
                "invalid hex color '{hex}', expected #rrggbb"
            )));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|e| CortexvisError::validation(format!("invalid hex color '{hex}': {e}")))?;
        Ok(Self::from_u32(value))
    }

    /// Builds a color from a packed `0xRRGGBB` integer.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u32(value: u32) -> Self {
        Self([
            ((value >> 16) & 255) as u8,
            ((value >> 8) & 255) as u8,
            (value & 255) as u8,
        ])
    }

    /// Converts to normalized RGB with every channel in [0, 1].
    pub fn to_rgb01(self) -> Vec3 {
        let [r, g, b] = self.0;
        Vec3::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Quantizes a normalized RGB color, clamping out-of-range channels.
    pub fn from_rgb01(rgb: Vec3) -> Self {
        let [r, g, b] = rgb_to_bytes(rgb);
        Self([r, g, b])
    }
}

/// Converts a `#rrggbb` string straight to normalized RGB.
pub fn hex_to_rgb01(hex: &str) -> Result<Vec3> {
    HexColor::parse(hex).map(HexColor::to_rgb01)
}

/// Quantizes a normalized RGB color to 8-bit channels.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb_to_bytes(rgb: Vec3) -> [u8; 3] {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(rgb.x), q(rgb.y), q(rgb.z)]
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for HexColor {
    type Err = CortexvisError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
