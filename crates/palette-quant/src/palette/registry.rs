//! Named palette lookup.
//!
//! The registry replaces a process-wide palette table: it is built once per
//! run (built-ins plus any user palettes from configuration) and passed to
//! whoever needs to resolve a palette name.

use std::collections::BTreeMap;

use super::error::PaletteError;
use super::palette::Palette;
use crate::color::Color;

/// Classic DMG green shades, in their traditional (unsorted) order.
const GAMEBOY: [Color; 4] = [
    Color::new(15, 56, 15),
    Color::new(155, 188, 15),
    Color::new(139, 172, 15),
    Color::new(48, 98, 48),
];

/// Evenly spaced four-level grey ramp.
const GRAYSCALE: [Color; 4] = [
    Color::new(0, 0, 0),
    Color::new(85, 85, 85),
    Color::new(170, 170, 170),
    Color::new(255, 255, 255),
];

/// A set of palettes addressable by name.
///
/// Lookup is ASCII case-insensitive; names keep the spelling they were
/// registered with.
///
/// # Example
///
/// ```
/// use palette_quant::PaletteRegistry;
///
/// let registry = PaletteRegistry::builtin();
/// let palette = registry.get("gameboy").unwrap();
/// assert_eq!(palette.name(), "GameBoy");
/// assert!(registry.get("Missing").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    // Keyed by lowercase name
    palettes: BTreeMap<String, Palette>,
}

impl PaletteRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in palettes (`GameBoy`, `Grayscale`).
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, colors) in [("GameBoy", GAMEBOY), ("Grayscale", GRAYSCALE)] {
            // Built-in tables are four distinct colors by construction
            if let Ok(palette) = Palette::new(name, &colors) {
                registry.insert(palette);
            }
        }
        registry
    }

    /// Validate and add a palette, replacing any palette with the same name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        colors: &[Color],
    ) -> Result<&Palette, PaletteError> {
        let palette = Palette::new(name, colors)?;
        Ok(self.insert(palette))
    }

    fn insert(&mut self, palette: Palette) -> &Palette {
        let key = palette.name().to_ascii_lowercase();
        self.palettes.insert(key.clone(), palette);
        &self.palettes[&key]
    }

    /// Resolve a palette by name.
    ///
    /// # Errors
    ///
    /// [`PaletteError::UnknownPalette`] if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Palette, PaletteError> {
        self.palettes
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| PaletteError::UnknownPalette(name.to_string()))
    }

    /// Registered palette names, sorted case-insensitively.
    pub fn names(&self) -> Vec<&str> {
        self.palettes.values().map(Palette::name).collect()
    }

    /// Iterate over all palettes in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.values()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}
