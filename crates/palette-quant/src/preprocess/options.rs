//! Normalization options.
//!
//! [`NormalizeOptions`] configures the resize, stretch and CLAHE stages
//! applied before brightness quantization.

/// Thumbnail edge length used when nothing else is configured.
pub const DEFAULT_SIZE: u32 = 128;

/// Largest accepted CLAHE grid (tiles per axis).
pub const MAX_TILE_GRID: u32 = 64;

/// What a channel with no spread (`max == min`) is stretched to.
///
/// A flat channel has no range to stretch, so some fixed value has to be
/// chosen before the palette rescale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlatChannelPolicy {
    /// Stretched value 0; the channel lands on the darkest palette brightness.
    #[default]
    Floor,
    /// Stretched value 127.5; the channel lands mid-range.
    Midpoint,
}

impl FlatChannelPolicy {
    /// Stretched value (0.0..=255.0 scale) assigned to every pixel of a flat
    /// channel.
    #[inline]
    pub fn stretched_value(self) -> f32 {
        match self {
            FlatChannelPolicy::Floor => 0.0,
            FlatChannelPolicy::Midpoint => 127.5,
        }
    }
}

/// Configuration for [`Normalizer`](super::Normalizer).
///
/// # Defaults
///
/// - Size: 128 (output is always square)
/// - CLAHE clip limit: 2.0
/// - CLAHE tile grid: 8x8
/// - Flat channels: [`FlatChannelPolicy::Floor`]
///
/// # Example
///
/// ```
/// use palette_quant::{FlatChannelPolicy, NormalizeOptions};
///
/// let options = NormalizeOptions::new()
///     .size(64)
///     .clip_limit(3.0)
///     .flat_channel(FlatChannelPolicy::Midpoint);
/// assert_eq!(options.size, 64);
/// assert_eq!(options.tile_grid, 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// Output edge length in pixels; output is `size x size`.
    pub size: u32,

    /// CLAHE contrast limit. Values `<= 0` disable clipping (plain
    /// tile-wise histogram equalization).
    pub clip_limit: f32,

    /// CLAHE tiles per axis, `1..=MAX_TILE_GRID`. May exceed `size`; the
    /// plane is then padded by reflection.
    pub tile_grid: u32,

    /// Handling of channels with no spread.
    pub flat_channel: FlatChannelPolicy,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            clip_limit: 2.0,
            tile_grid: 8,
            flat_channel: FlatChannelPolicy::default(),
        }
    }
}

impl NormalizeOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output edge length.
    #[inline]
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    #[inline]
    pub fn clip_limit(mut self, limit: f32) -> Self {
        self.clip_limit = limit;
        self
    }

    /// Set the number of CLAHE tiles per axis.
    #[inline]
    pub fn tile_grid(mut self, tiles: u32) -> Self {
        self.tile_grid = tiles;
        self
    }

    #[inline]
    pub fn flat_channel(mut self, policy: FlatChannelPolicy) -> Self {
        self.flat_channel = policy;
        self
    }

    /// Check that the options describe a runnable pipeline.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.size == 0 {
            return Err("output size must be non-zero".into());
        }
        if self.tile_grid == 0 {
            return Err("tile grid must be at least 1".into());
        }
        if self.tile_grid > MAX_TILE_GRID {
            return Err(format!(
                "tile grid must be at most {MAX_TILE_GRID}, got {}",
                self.tile_grid
            ));
        }
        if !self.clip_limit.is_finite() {
            return Err(format!("clip limit must be finite, got {}", self.clip_limit));
        }
        Ok(())
    }
}
