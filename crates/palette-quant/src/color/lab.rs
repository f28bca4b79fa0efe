//! CIE L\*a\*b\* color space (D65 white point)
//!
//! The normalizer equalizes lightness only, so it needs a space where
//! lightness is separated from chroma. Values are stored in the common
//! 8-bit encoding:
//!
//! - `l` = L\* × 255 / 100
//! - `a` = a\* + 128
//! - `b` = b\* + 128
//!
//! # References
//!
//! CIE 15:2004, sRGB primaries per IEC 61966-2-1.

use super::lut::{linear_to_srgb8, srgb8_to_linear};
use super::rgb::Color;

// D65 reference white
const WHITE_X: f32 = 0.950456;
const WHITE_Z: f32 = 1.088754;

// (6/29)^3 and the slope/offset of the linear segment of f(t)
const EPSILON: f32 = 0.008856;
const KAPPA: f32 = 903.3;
const LINEAR_SLOPE: f32 = 7.787;
const LINEAR_OFFSET: f32 = 16.0 / 116.0;

/// A color in CIE L\*a\*b\*, 8-bit encoded.
///
/// # Example
///
/// ```
/// use palette_quant::{Color, Lab8};
///
/// let lab = Lab8::from(Color::new(128, 128, 128));
/// // Neutral grey has no chroma
/// assert_eq!(lab.a, 128);
/// assert_eq!(lab.b, 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lab8 {
    /// Lightness, L\* scaled to 0..=255
    pub l: u8,
    /// Green-red axis, offset by 128
    pub a: u8,
    /// Blue-yellow axis, offset by 128
    pub b: u8,
}

impl Lab8 {
    /// Create an encoded Lab color.
    #[inline]
    pub fn new(l: u8, a: u8, b: u8) -> Self {
        Self { l, a, b }
    }
}

#[inline]
fn f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        LINEAR_SLOPE * t + LINEAR_OFFSET
    }
}

#[inline]
fn f_inv(t: f32) -> f32 {
    let cube = t * t * t;
    if cube > EPSILON {
        cube
    } else {
        (t - LINEAR_OFFSET) / LINEAR_SLOPE
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl From<Color> for Lab8 {
    fn from(color: Color) -> Self {
        let r = srgb8_to_linear(color.r);
        let g = srgb8_to_linear(color.g);
        let b = srgb8_to_linear(color.b);

        // Linear sRGB -> XYZ, normalized to the white point
        let x = (0.412453 * r + 0.357580 * g + 0.180423 * b) / WHITE_X;
        let y = 0.212671 * r + 0.715160 * g + 0.072169 * b;
        let z = (0.019334 * r + 0.119193 * g + 0.950227 * b) / WHITE_Z;

        let fx = f(x);
        let fy = f(y);
        let fz = f(z);

        let l = if y > EPSILON {
            116.0 * fy - 16.0
        } else {
            KAPPA * y
        };
        let a = 500.0 * (fx - fy);
        let bb = 200.0 * (fy - fz);

        Lab8 {
            l: to_u8(l * 255.0 / 100.0),
            a: to_u8(a + 128.0),
            b: to_u8(bb + 128.0),
        }
    }
}

impl From<Lab8> for Color {
    fn from(lab: Lab8) -> Self {
        let l = lab.l as f32 * 100.0 / 255.0;
        let a = lab.a as f32 - 128.0;
        let b = lab.b as f32 - 128.0;

        let (y, fy) = if l <= KAPPA * EPSILON {
            let y = l / KAPPA;
            (y, LINEAR_SLOPE * y + LINEAR_OFFSET)
        } else {
            let fy = (l + 16.0) / 116.0;
            (fy * fy * fy, fy)
        };
        let x = f_inv(a / 500.0 + fy) * WHITE_X;
        let z = f_inv(fy - b / 200.0) * WHITE_Z;

        // XYZ -> linear sRGB
        let r = 3.240479 * x - 1.537150 * y - 0.498535 * z;
        let g = -0.969256 * x + 1.875991 * y + 0.041556 * z;
        let bl = 0.055648 * x - 0.204043 * y + 1.057311 * z;

        Color::new(linear_to_srgb8(r), linear_to_srgb8(g), linear_to_srgb8(bl))
    }
}
