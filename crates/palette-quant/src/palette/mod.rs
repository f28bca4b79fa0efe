//! Palette types: the ordered four-color [`Palette`] and the
//! [`PaletteRegistry`] that resolves palettes by name.

mod error;
mod palette;
mod registry;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PALETTE_SIZE};
pub use registry::PaletteRegistry;
