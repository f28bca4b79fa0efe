//! PaletteConverter: the one-call entry point for the crate.
//!
//! [`PaletteConverter`] chains normalization and quantization behind a
//! builder, so callers only pick a palette and, optionally, tweak the
//! normalization options.

use crate::color::Color;
use crate::output::QuantizedImage;
use crate::palette::Palette;
use crate::preprocess::{
    Channel, FlatChannelPolicy, NormalizeOptions, NormalizeResult, Normalizer,
};
use crate::quantize::{BrightnessQuantizer, CutPoints};

use super::error::ConvertError;

/// Full conversion result: the image plus what happened on the way.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The quantized image.
    pub image: QuantizedImage,
    /// Brightness cut points of the normalized image.
    pub cut_points: CutPoints,
    /// Channels filled by the flat-channel policy.
    pub flat_channels: Vec<Channel>,
}

/// Palette conversion builder.
///
/// - Constructor takes the (already ordered) [`Palette`]
/// - Configuration methods consume and return `self`
/// - [`convert()`](Self::convert) takes `&self`, so one converter serves
///   a whole batch
///
/// # Example
///
/// ```
/// use palette_quant::{Color, PaletteConverter, PaletteRegistry};
///
/// let palette = PaletteRegistry::builtin().get("GameBoy").unwrap().clone();
/// let converter = PaletteConverter::new(palette).size(8);
///
/// let pixels: Vec<Color> = (0..64u8).map(|v| Color::new(v * 4, v * 3, v)).collect();
/// let image = converter.convert(&pixels, 8, 8).unwrap();
///
/// assert_eq!((image.width(), image.height()), (8, 8));
/// assert!(image.pixels().iter().all(|&c| image.palette().contains(c)));
/// ```
#[derive(Debug, Clone)]
pub struct PaletteConverter {
    palette: Palette,
    options: NormalizeOptions,
}

impl PaletteConverter {
    /// Create a converter with default normalization (128x128, CLAHE clip
    /// 2.0 on an 8x8 grid, flat channels floored).
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            options: NormalizeOptions::default(),
        }
    }

    /// Replace all normalization options at once.
    #[inline]
    pub fn options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Output edge length.
    #[inline]
    pub fn size(mut self, size: u32) -> Self {
        self.options = self.options.size(size);
        self
    }

    #[inline]
    pub fn clip_limit(mut self, limit: f32) -> Self {
        self.options = self.options.clip_limit(limit);
        self
    }

    #[inline]
    pub fn tile_grid(mut self, tiles: u32) -> Self {
        self.options = self.options.tile_grid(tiles);
        self
    }

    #[inline]
    pub fn flat_channel(mut self, policy: FlatChannelPolicy) -> Self {
        self.options = self.options.flat_channel(policy);
        self
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn normalize_options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalization stage only.
    pub fn normalize(
        &self,
        pixels: &[Color],
        width: usize,
        height: usize,
    ) -> Result<NormalizeResult, ConvertError> {
        Normalizer::new(&self.palette, self.options.clone()).process(pixels, width, height)
    }

    /// Normalize and quantize, keeping the intermediate diagnostics.
    pub fn convert_detailed(
        &self,
        pixels: &[Color],
        width: usize,
        height: usize,
    ) -> Result<Conversion, ConvertError> {
        let normalized = self.normalize(pixels, width, height)?;
        let quantizer = BrightnessQuantizer::new(&self.palette);

        let cut_points = quantizer.cut_points(&normalized.pixels).ok_or(
            ConvertError::EmptyImage {
                width: normalized.width,
                height: normalized.height,
            },
        )?;
        let image = quantizer.quantize(&normalized.pixels, normalized.width, normalized.height)?;

        Ok(Conversion {
            image,
            cut_points,
            flat_channels: normalized.flat_channels,
        })
    }

    /// Normalize and quantize a row-major image.
    ///
    /// The result is always `size x size`.
    pub fn convert(
        &self,
        pixels: &[Color],
        width: usize,
        height: usize,
    ) -> Result<QuantizedImage, ConvertError> {
        self.convert_detailed(pixels, width, height)
            .map(|conversion| conversion.image)
    }
}
