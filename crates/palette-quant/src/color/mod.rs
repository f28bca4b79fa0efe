//! Color types and conversion utilities
//!
//! - [`Color`]: 8-bit sRGB, the pixel type for input, output and palettes.
//!   Brightness (BT.709 luma) is derived on demand.
//! - [`Lab8`]: CIE L\*a\*b\* in 8-bit encoding, used to equalize lightness
//!   without touching chroma.
//!
//! # Example
//!
//! ```
//! use palette_quant::{Color, Lab8};
//!
//! let pixel = Color::new(128, 64, 32);
//! let lab = Lab8::from(pixel);
//! let back = Color::from(lab);
//! assert!((back.r as i32 - 128).abs() <= 8);
//! ```

mod lab;
mod lut;
mod rgb;

pub use lab::Lab8;
pub use rgb::Color;
