//! Image normalization ahead of brightness quantization.
//!
//! See [`Normalizer`] for the pipeline. The individual stages live in their
//! own modules:
//!
//! - `resize`: bilinear resize to a square thumbnail
//! - `stretch`: per-channel stretch into the palette's brightness range
//! - `clahe`: contrast limited adaptive histogram equalization on L\*

mod clahe;
mod normalizer;
mod options;
mod resize;
mod stretch;

pub use normalizer::{NormalizeResult, Normalizer};
pub use options::{FlatChannelPolicy, NormalizeOptions, DEFAULT_SIZE, MAX_TILE_GRID};
pub use stretch::Channel;
