#![allow(clippy::excessive_precision, clippy::module_inception)]

//! palette-quant: four-color palette mapping for thumbnails
//!
//! Remaps photographs onto a small fixed palette (for example the classic
//! GameBoy greens) by brightness. There is no dithering: every output pixel
//! is exactly one of the four palette colors.
//!
//! # Quick Start
//!
//! ```
//! use palette_quant::{Color, PaletteConverter, PaletteRegistry};
//!
//! let registry = PaletteRegistry::builtin();
//! let palette = registry.get("GameBoy").unwrap().clone();
//!
//! let converter = PaletteConverter::new(palette).size(4);
//! let pixels = vec![Color::new(128, 128, 128); 16];
//! let image = converter.convert(&pixels, 4, 4).unwrap();
//!
//! assert_eq!(image.width(), 4);
//! assert_eq!(image.height(), 4);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! sRGB input (any size)
//!     |
//!     v
//! resize               (bilinear, to size x size)
//!     |
//!     v
//! channel stretch      (per channel to 0..255, then into the
//!     |                 palette's min..max brightness)
//!     v
//! CIE L*a*b*           (8-bit encoding)
//!     |
//!     +---> CLAHE on L*  (clip 2.0, 8x8 tiles)
//!     |
//!     v
//! sRGB                 (normalized image)
//!     |
//!     v
//! brightness cut points (0th/33rd/66th/100th percentile)
//!     |
//!     v
//! palette indices      (QuantizedImage)
//! ```
//!
//! # Brightness
//!
//! Brightness is BT.709 luma on unlinearized channel values,
//! `0.2126 R + 0.7152 G + 0.0722 B`. The same measure orders palettes and
//! buckets pixels, so "darkest palette color" and "darkest bucket" always
//! agree.
//!
//! # Flat channels
//!
//! A channel whose values are all equal cannot be stretched. The
//! [`FlatChannelPolicy`] picks the value used instead, and the channel is
//! reported in [`NormalizeResult::flat_channels`] and
//! [`Conversion::flat_channels`].

pub mod api;
pub mod color;
pub mod output;
pub mod palette;
pub mod preprocess;
pub mod quantize;

pub use api::{Conversion, ConvertError, PaletteConverter};
pub use color::{Color, Lab8};
pub use output::QuantizedImage;
pub use palette::{Palette, PaletteError, PaletteRegistry, ParseColorError, PALETTE_SIZE};
pub use preprocess::{
    Channel, FlatChannelPolicy, NormalizeOptions, NormalizeResult, Normalizer, DEFAULT_SIZE,
    MAX_TILE_GRID,
};
pub use quantize::{BrightnessQuantizer, CutPoints};
