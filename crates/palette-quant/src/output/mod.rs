//! Quantizer output.

mod quantized_image;

pub use quantized_image::QuantizedImage;
