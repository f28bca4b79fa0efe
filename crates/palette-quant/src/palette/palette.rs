//! The four-color palette, ordered by perceived brightness.
//!
//! Ordering happens once, at construction. Everything downstream relies on
//! index 0 being the darkest entry and index 3 the lightest: the normalizer
//! reads the brightness range from the two ends, and the quantizer maps
//! brightness buckets to indices.

use std::collections::HashSet;

use super::error::PaletteError;
use crate::color::Color;

/// Number of colors in every palette (one per brightness bucket).
pub const PALETTE_SIZE: usize = 4;

/// A named palette of four colors sorted ascending by brightness.
///
/// Brightness values are precomputed at construction since palette colors
/// never change afterwards.
///
/// # Example
///
/// ```
/// use palette_quant::{Color, Palette};
///
/// let palette = Palette::new(
///     "GameBoy",
///     &[
///         Color::new(15, 56, 15),
///         Color::new(155, 188, 15),
///         Color::new(139, 172, 15),
///         Color::new(48, 98, 48),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(palette.darkest(), Color::new(15, 56, 15));
/// assert_eq!(palette.lightest(), Color::new(155, 188, 15));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    colors: [Color; PALETTE_SIZE],
    brightness: [f32; PALETTE_SIZE],
}

impl Palette {
    /// Create a palette from exactly four distinct colors, in any order.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::WrongSize`] unless `colors.len() == 4`
    /// - [`PaletteError::DuplicateColor`] if a color appears twice
    pub fn new(name: impl Into<String>, colors: &[Color]) -> Result<Self, PaletteError> {
        let name = name.into();

        let mut sorted: [Color; PALETTE_SIZE] =
            colors.try_into().map_err(|_| PaletteError::WrongSize {
                name: name.clone(),
                expected: PALETTE_SIZE,
                actual: colors.len(),
            })?;

        let mut seen = HashSet::new();
        for (index, color) in sorted.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { name, index });
            }
        }

        // Stable: equal-brightness entries keep their declared order
        sorted.sort_by(|a, b| a.brightness().total_cmp(&b.brightness()));
        let brightness = sorted.map(Color::brightness);

        Ok(Self {
            name,
            colors: sorted,
            brightness,
        })
    }

    /// Create a palette from hex color strings (see [`Color`]'s `FromStr`).
    ///
    /// ```
    /// use palette_quant::Palette;
    ///
    /// let grey = Palette::from_hex("Grey", &["#000", "#555", "#aaa", "#fff"]).unwrap();
    /// assert_eq!(grey.len(), 4);
    /// ```
    pub fn from_hex<S: AsRef<str>>(
        name: impl Into<String>,
        hex: &[S],
    ) -> Result<Self, PaletteError> {
        let colors = hex
            .iter()
            .map(|s| s.as_ref().parse::<Color>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, &colors)
    }

    /// Palette name as registered.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The colors, darkest first.
    #[inline]
    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.colors
    }

    /// Color at `idx` in brightness order.
    #[inline]
    pub fn color(&self, idx: usize) -> Color {
        self.colors[idx]
    }

    /// Returns the number of colors (always [`PALETTE_SIZE`]).
    #[inline]
    pub fn len(&self) -> usize {
        PALETTE_SIZE
    }

    /// Always `false`; kept for API symmetry with `len()`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Brightness of the color at `idx`.
    #[inline]
    pub fn brightness(&self, idx: usize) -> f32 {
        self.brightness[idx]
    }

    /// Brightness of the darkest color.
    #[inline]
    pub fn min_brightness(&self) -> f32 {
        self.brightness[0]
    }

    /// Brightness of the lightest color.
    #[inline]
    pub fn max_brightness(&self) -> f32 {
        self.brightness[PALETTE_SIZE - 1]
    }

    /// `max_brightness() - min_brightness()`.
    #[inline]
    pub fn brightness_range(&self) -> f32 {
        self.max_brightness() - self.min_brightness()
    }

    #[inline]
    pub fn darkest(&self) -> Color {
        self.colors[0]
    }

    #[inline]
    pub fn lightest(&self) -> Color {
        self.colors[PALETTE_SIZE - 1]
    }

    /// Position of `color` in brightness order, if it is a palette entry.
    pub fn index_of(&self, color: Color) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Whether `color` is one of the four palette entries.
    #[inline]
    pub fn contains(&self, color: Color) -> bool {
        self.index_of(color).is_some()
    }
}
