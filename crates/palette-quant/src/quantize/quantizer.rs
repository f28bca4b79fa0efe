//! Brightness-bucket quantization.
//!
//! Cut points come from the image's own brightness distribution (0th, 33rd,
//! 66th and 100th percentile), so every image spreads over the palette
//! regardless of its exposure. Bucket `i` maps to the `i`-th darkest palette
//! color.

use crate::api::{check_dimensions, ConvertError};
use crate::color::Color;
use crate::output::QuantizedImage;
use crate::palette::Palette;

use super::percentile::percentile;

/// Brightness thresholds of one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPoints {
    pub p0: f32,
    pub p33: f32,
    pub p66: f32,
    pub p100: f32,
}

impl CutPoints {
    /// Compute cut points from unsorted brightness values.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_brightness(values: &[f32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f32::total_cmp);
        Some(Self {
            p0: percentile(&sorted, 0.0),
            p33: percentile(&sorted, 33.0),
            p66: percentile(&sorted, 66.0),
            p100: percentile(&sorted, 100.0),
        })
    }

    /// Palette index for a brightness value.
    ///
    /// `b <= p33` is 0, `p33 < b <= p66` is 1, `p66 < b <= p100` is 2 and
    /// anything brighter than `p100` is 3. Since `p100` is the image maximum,
    /// bucket 3 is only reached by values from outside the image the cut
    /// points were computed from.
    #[inline]
    pub fn bucket(&self, b: f32) -> u8 {
        if b <= self.p33 {
            0
        } else if b <= self.p66 {
            1
        } else if b <= self.p100 {
            2
        } else {
            3
        }
    }
}

/// Maps pixels onto a palette by brightness bucket.
///
/// # Example
///
/// ```
/// use palette_quant::{BrightnessQuantizer, Color, PaletteRegistry};
///
/// let registry = PaletteRegistry::builtin();
/// let palette = registry.get("Grayscale").unwrap();
/// let quantizer = BrightnessQuantizer::new(palette);
///
/// let pixels = [
///     Color::new(0, 0, 0),
///     Color::new(90, 90, 90),
///     Color::new(180, 180, 180),
///     Color::new(250, 250, 250),
/// ];
/// let image = quantizer.quantize(&pixels, 2, 2).unwrap();
/// assert_eq!(image.indices(), &[0, 1, 2, 2]);
/// ```
#[derive(Debug)]
pub struct BrightnessQuantizer<'a> {
    palette: &'a Palette,
}

impl<'a> BrightnessQuantizer<'a> {
    #[inline]
    pub fn new(palette: &'a Palette) -> Self {
        Self { palette }
    }

    /// Cut points for `pixels`, or `None` if there are none.
    pub fn cut_points(&self, pixels: &[Color]) -> Option<CutPoints> {
        let brightness: Vec<f32> = pixels.iter().map(|c| c.brightness()).collect();
        CutPoints::from_brightness(&brightness)
    }

    /// Quantize a row-major image. Output has the same dimensions.
    pub fn quantize(
        &self,
        pixels: &[Color],
        width: usize,
        height: usize,
    ) -> Result<QuantizedImage, ConvertError> {
        check_dimensions(pixels.len(), width, height)?;

        let brightness: Vec<f32> = pixels.iter().map(|c| c.brightness()).collect();
        let cuts = CutPoints::from_brightness(&brightness)
            .ok_or(ConvertError::EmptyImage { width, height })?;

        let indices = brightness.iter().map(|&b| cuts.bucket(b)).collect();
        Ok(QuantizedImage::new(indices, width, height, self.palette.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteRegistry;

    #[test]
    fn test_bucket_boundaries_are_inclusive_above() {
        let cuts = CutPoints {
            p0: 0.0,
            p33: 10.0,
            p66: 20.0,
            p100: 30.0,
        };
        assert_eq!(cuts.bucket(-1.0), 0);
        assert_eq!(cuts.bucket(10.0), 0);
        assert_eq!(cuts.bucket(10.5), 1);
        assert_eq!(cuts.bucket(20.0), 1);
        assert_eq!(cuts.bucket(30.0), 2);
        assert_eq!(cuts.bucket(30.1), 3);
    }

    #[test]
    fn test_cut_points_empty() {
        assert_eq!(CutPoints::from_brightness(&[]), None);
    }

    #[test]
    fn test_cut_points_of_ramp() {
        let values: Vec<f32> = (0..=100).map(|v| v as f32).collect();
        let cuts = CutPoints::from_brightness(&values).unwrap();
        assert_eq!(cuts.p0, 0.0);
        assert!((cuts.p33 - 33.0).abs() < 1e-4);
        assert!((cuts.p66 - 66.0).abs() < 1e-4);
        assert_eq!(cuts.p100, 100.0);
    }

    #[test]
    fn test_constant_image_maps_to_darkest() {
        let registry = PaletteRegistry::builtin();
        let palette = registry.get("GameBoy").unwrap();
        let image = BrightnessQuantizer::new(palette)
            .quantize(&[Color::new(100, 100, 100); 9], 3, 3)
            .unwrap();
        assert!(image.indices().iter().all(|&i| i == 0));
    }

    #[test]
    fn test_dimension_mismatch() {
        let registry = PaletteRegistry::builtin();
        let palette = registry.get("GameBoy").unwrap();
        let err = BrightnessQuantizer::new(palette)
            .quantize(&[Color::new(0, 0, 0); 5], 2, 2)
            .unwrap_err();
        assert!(matches!(err, ConvertError::DimensionMismatch { .. }));
    }
}
