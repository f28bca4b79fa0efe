//! 8-bit RGB color type
//!
//! [`Color`] is the pixel type of the whole pipeline: source images are
//! decoded into it, the normalizer produces it, and palettes are made of it.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// ITU-R BT.709 luma weights for R, G and B.
const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// A color as three 8-bit sRGB channel intensities.
///
/// # Example
///
/// ```
/// use palette_quant::Color;
///
/// let green = Color::new(15, 56, 15);
/// assert_eq!(green.to_bytes(), [15, 56, 15]);
/// assert!((green.brightness() - 44.3232).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Color {
    /// Create a color from its three channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channel value by index (0 = red, 1 = green, 2 = blue).
    ///
    /// # Panics
    ///
    /// Panics if `channel > 2`.
    #[inline]
    pub fn channel(self, channel: usize) -> u8 {
        self.to_bytes()[channel]
    }

    /// Perceived brightness (BT.709 luma) on the 0.0..=255.0 scale.
    #[inline]
    pub fn brightness(self) -> f32 {
        luma(self.r as f32, self.g as f32, self.b as f32)
    }
}

/// BT.709 luma of unscaled channel values.
#[inline]
fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

impl From<[u8; 3]> for Color {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.to_bytes()
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self::from_bytes(pixel.0)
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb(color.to_bytes())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    ///
    /// ```
    /// use palette_quant::Color;
    ///
    /// let c: Color = "#9bbc0f".parse().unwrap();
    /// assert_eq!(c, Color::new(155, 188, 15));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        let digits = s
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ParseColorError::InvalidHex(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match digits[..] {
            // Shorthand: 0xF -> 0xFF
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::new(
                r1 << 4 | r2,
                g1 << 4 | g2,
                b1 << 4 | b2,
            )),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
