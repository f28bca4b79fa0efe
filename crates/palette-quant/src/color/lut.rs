//! Gamma lookup table access functions
//!
//! The tables are generated at compile time by build.rs.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode an 8-bit sRGB code value to linear light (0.0..=1.0).
#[inline]
pub fn srgb8_to_linear(value: u8) -> f32 {
    SRGB8_TO_LINEAR[value as usize]
}

/// Encode linear light to an 8-bit sRGB code value.
///
/// Out-of-gamut input is clamped to 0.0..=1.0 first; the table is
/// interpolated linearly and the result rounded.
#[inline]
pub fn linear_to_srgb8(linear: f32) -> u8 {
    let linear = if linear.is_nan() {
        0.0
    } else {
        linear.clamp(0.0, 1.0)
    };

    let scaled = linear * 4095.0;
    let index = scaled as usize;

    let srgb = if index >= 4095 {
        LINEAR_TO_SRGB[4095]
    } else {
        let frac = scaled - index as f32;
        let a = LINEAR_TO_SRGB[index];
        let b = LINEAR_TO_SRGB[index + 1];
        a + (b - a) * frac
    };

    (srgb * 255.0).round().clamp(0.0, 255.0) as u8
}
