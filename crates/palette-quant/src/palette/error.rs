//! Error types for palette operations
//!
//! This module provides error types for color parsing and palette validation.

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered (signs included)
    #[error("invalid hex character: '{0}'")]
    InvalidHex(char),
}

/// Error type for palette lookup and validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    /// No palette is registered under this name
    #[error("unknown palette '{0}'")]
    UnknownPalette(String),
    /// Palette does not have exactly [`PALETTE_SIZE`](super::PALETTE_SIZE) colors
    #[error("palette '{name}' has {actual} colors, expected {expected}")]
    WrongSize {
        /// Palette name
        name: String,
        /// Required number of colors
        expected: usize,
        /// Number of colors supplied
        actual: usize,
    },
    /// Duplicate color found at the specified index
    #[error("palette '{name}' repeats a color at index {index}")]
    DuplicateColor {
        /// Palette name
        name: String,
        /// Index where the duplicate was found
        index: usize,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
