//! The normalization pipeline.
//!
//! [`Normalizer`] turns an arbitrary RGB image into a `size x size` image
//! whose channels sit inside the palette's brightness range and whose
//! lightness has been locally equalized:
//!
//! 1. **Resize** (bilinear) to `size x size`
//! 2. **Stretch** each channel to full range, then compress into
//!    `min_brightness..=max_brightness` of the palette
//! 3. **CLAHE** on the L\* channel of CIE L\*a\*b\*; a\* and b\* untouched
//!
//! Stretching before equalization keeps chroma tied to the palette range
//! while CLAHE spreads detail across the buckets the quantizer cuts.

use crate::api::check_dimensions;
use crate::api::ConvertError;
use crate::color::{Color, Lab8};
use crate::palette::Palette;

use super::clahe::clahe;
use super::options::NormalizeOptions;
use super::resize::resize_bilinear;
use super::stretch::{stretch_to_range, Channel};

/// Output of [`Normalizer::process`].
///
/// # Example
///
/// ```
/// use palette_quant::{NormalizeOptions, Normalizer, PaletteRegistry, Color};
///
/// let registry = PaletteRegistry::builtin();
/// let palette = registry.get("GameBoy").unwrap();
/// let normalizer = Normalizer::new(palette, NormalizeOptions::new().size(4));
///
/// let input = vec![Color::new(90, 30, 200); 6];
/// let result = normalizer.process(&input, 3, 2).unwrap();
/// assert_eq!((result.width, result.height), (4, 4));
/// assert_eq!(result.flat_channels.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct NormalizeResult {
    /// Normalized pixels, row-major.
    pub pixels: Vec<Color>,

    /// Width after resize (always the configured size).
    pub width: usize,

    /// Height after resize (always the configured size).
    pub height: usize,

    /// Channels that had no spread after resize and were filled according
    /// to [`FlatChannelPolicy`](super::FlatChannelPolicy).
    pub flat_channels: Vec<Channel>,
}

/// Image normalizer bound to one palette.
///
/// Holds a reference to the palette, so it cannot outlive it. Immutable
/// after construction and reusable across images.
#[derive(Debug)]
pub struct Normalizer<'a> {
    palette: &'a Palette,
    options: NormalizeOptions,
}

impl<'a> Normalizer<'a> {
    #[inline]
    pub fn new(palette: &'a Palette, options: NormalizeOptions) -> Self {
        Self { palette, options }
    }

    #[inline]
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Run the full pipeline on a row-major image.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::InvalidOptions`] for a zero size or tile grid
    /// - [`ConvertError::EmptyImage`] if either dimension is zero
    /// - [`ConvertError::DimensionMismatch`] if `pixels.len() != width * height`
    pub fn process(
        &self,
        pixels: &[Color],
        width: usize,
        height: usize,
    ) -> Result<NormalizeResult, ConvertError> {
        self.options
            .validate()
            .map_err(ConvertError::InvalidOptions)?;
        check_dimensions(pixels.len(), width, height)?;

        let size = self.options.size as usize;
        let mut out = resize_bilinear(
            pixels,
            width as u32,
            height as u32,
            self.options.size,
            self.options.size,
        );

        let flat_channels = stretch_to_range(
            &mut out,
            self.palette.min_brightness(),
            self.palette.max_brightness(),
            self.options.flat_channel,
        );

        let lab: Vec<Lab8> = out.iter().map(|&c| Lab8::from(c)).collect();
        let lightness: Vec<u8> = lab.iter().map(|p| p.l).collect();
        let equalized = clahe(
            &lightness,
            size,
            size,
            self.options.clip_limit,
            self.options.tile_grid as usize,
        );

        // Lab -> RGB conversion clamps to 0..=255
        for ((pixel, lab), l) in out.iter_mut().zip(&lab).zip(equalized) {
            *pixel = Color::from(Lab8::new(l, lab.a, lab.b));
        }

        Ok(NormalizeResult {
            pixels: out,
            width: size,
            height: size,
            flat_channels,
        })
    }
}
