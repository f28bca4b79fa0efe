//! Public API: [`PaletteConverter`] builder and [`ConvertError`].

mod converter;
mod error;

pub use converter::{Conversion, PaletteConverter};
pub(crate) use error::check_dimensions;
pub use error::ConvertError;
