//! Brightness quantization onto a four-color palette.

mod percentile;
mod quantizer;

pub use quantizer::{BrightnessQuantizer, CutPoints};
