//! 8-bit RGB pixel type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ParseColorError;

/// One of the three axes of RGB space.
///
/// Variant order is the tie-break priority used when choosing a split axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// A pixel (or palette entry) with 8-bit red, green and blue intensities.
///
/// Serializes as an uppercase `#RRGGBB` string.
///
/// # Example
///
/// ```
/// use stitch_quant::Rgb;
///
/// let orange: Rgb = "#ff8000".parse().unwrap();
/// assert_eq!(orange, Rgb::new(255, 128, 0));
/// assert_eq!(orange.to_string(), "#FF8000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Value of this pixel on the given axis.
    #[inline]
    pub const fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// The square root is never taken; only relative order matters to callers.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Uppercase `#RRGGBB` form.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let digits = s
            .chars()
            .enumerate()
            .map(|(position, c)| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ParseColorError::InvalidDigit { position })
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match digits.as_slice() {
            // Shorthand: 0xF -> 0xFF
            &[r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            &[r1, r2, g1, g2, b1, b2] => Ok(Self::new((r1 << 4) | r2, (g1 << 4) | g2, (b1 << 4) | b2)),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
