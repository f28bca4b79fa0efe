//! QuantizedImage: palette indices plus the palette they index.
//!
//! The indexed form is canonical. RGB is looked up on demand, which makes
//! palette membership of every output pixel hold by construction.

use crate::color::Color;
use crate::palette::Palette;

/// Output of the quantizer.
///
/// Stores one `u8` palette index (`0..4`) per pixel in row-major order,
/// with the image dimensions and an owned copy of the palette.
///
/// # Example
///
/// ```
/// use palette_quant::{Color, PaletteRegistry, QuantizedImage};
///
/// let palette = PaletteRegistry::builtin().get("Grayscale").unwrap().clone();
/// let image = QuantizedImage::new(vec![0, 3, 3, 0], 2, 2, palette);
///
/// assert_eq!(image.color_at(1, 0), Color::new(255, 255, 255));
/// assert_eq!(image.to_rgb().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl QuantizedImage {
    /// Wrap quantizer output.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height` and that every
    /// index is in range.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match {}x{}",
            indices.len(),
            width,
            height,
        );
        debug_assert!(indices.iter().all(|&i| (i as usize) < palette.len()));
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette color of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn color_at(&self, x: usize, y: usize) -> Color {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of bounds");
        self.palette.color(self.indices[y * self.width + x] as usize)
    }

    /// Pixels as palette colors, row-major.
    pub fn pixels(&self) -> Vec<Color> {
        self.indices
            .iter()
            .map(|&i| self.palette.color(i as usize))
            .collect()
    }

    /// Flat `[R, G, B, R, G, B, ...]` buffer of length `width * height * 3`.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &idx in &self.indices {
            rgb.extend_from_slice(&self.palette.color(idx as usize).to_bytes());
        }
        rgb
    }

    /// How many pixels use each palette index.
    pub fn histogram(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for &idx in &self.indices {
            counts[idx as usize] += 1;
        }
        counts
    }
}
