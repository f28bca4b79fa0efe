//! Conversion errors.

use thiserror::Error;

use crate::palette::PaletteError;

/// Errors from normalizing or converting an image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Input has no pixels
    #[error("image is empty ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    /// Buffer length disagrees with the stated dimensions
    #[error("pixel buffer holds {actual} pixels, {width}x{height} needs {expected}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Options that cannot produce an image
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// Check a pixel buffer against its stated dimensions.
pub(crate) fn check_dimensions(len: usize, width: usize, height: usize) -> Result<(), ConvertError> {
    if width == 0 || height == 0 {
        return Err(ConvertError::EmptyImage { width, height });
    }
    let expected = width * height;
    if len != expected {
        return Err(ConvertError::DimensionMismatch {
            width,
            height,
            expected,
            actual: len,
        });
    }
    Ok(())
}
