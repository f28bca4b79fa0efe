//! Bilinear thumbnail resize.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb};

use crate::color::Color;

/// Resize a row-major pixel buffer to `new_width` x `new_height`.
///
/// Uses bilinear (triangle) filtering and stretches without preserving the
/// aspect ratio. Returns the input unchanged when the dimensions already
/// match.
pub fn resize_bilinear(
    pixels: &[Color],
    width: u32,
    height: u32,
    new_width: u32,
    new_height: u32,
) -> Vec<Color> {
    if width == new_width && height == new_height {
        return pixels.to_vec();
    }

    let raw: Vec<u8> = pixels.iter().flat_map(|c| c.to_bytes()).collect();
    let Some(source) = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, raw) else {
        // Caller guarantees pixels.len() == width * height
        return pixels.to_vec();
    };

    imageops::resize(&source, new_width, new_height, FilterType::Triangle)
        .pixels()
        .map(|&p| Color::from(p))
        .collect()
}
