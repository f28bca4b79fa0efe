use palette_quant::{
    Color, FlatChannelPolicy, NormalizeOptions, PaletteError, PaletteRegistry, DEFAULT_SIZE,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Application configuration loaded from a YAML file.
///
/// Every field has a default, so running without a config file is the
/// normal case. CLI flags override individual values after loading.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Palette used by `convert`
    pub palette: String,

    /// Thumbnail edge length in pixels
    pub size: u32,

    /// Directory manifest paths are resolved against
    pub asset_root: PathBuf,

    /// Recompress output with oxipng
    pub optimize_png: bool,

    /// CLAHE contrast limit
    pub clip_limit: f32,

    /// CLAHE tiles per axis
    pub tile_grid: u32,

    /// What flat channels are stretched to
    pub flat_channel: FlatChannel,

    /// User palettes: name -> four hex colors
    pub palettes: BTreeMap<String, Vec<String>>,

    /// Dev server settings
    pub serve: ServeConfig,
}

/// Values given on the `convert` command line. Each one that is set
/// replaces the matching config field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOverrides {
    pub palette: Option<String>,
    pub size: Option<u32>,
    pub asset_root: Option<PathBuf>,
}

/// YAML spelling of [`FlatChannelPolicy`].
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlatChannel {
    #[default]
    Floor,
    Midpoint,
}

impl From<FlatChannel> for FlatChannelPolicy {
    fn from(value: FlatChannel) -> Self {
        match value {
            FlatChannel::Floor => FlatChannelPolicy::Floor,
            FlatChannel::Midpoint => FlatChannelPolicy::Midpoint,
        }
    }
}

/// Configuration for `thumbtint serve`
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServeConfig {
    /// Interface to bind
    pub address: IpAddr,

    /// First port to try; higher ports are probed when it is taken
    pub start_port: u16,

    /// Open the served URL in the default browser
    pub open_browser: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            start_port: 3333,
            open_browser: true,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            palette: "GameBoy".to_string(),
            size: DEFAULT_SIZE,
            asset_root: PathBuf::from(".."),
            optimize_png: true,
            clip_limit: 2.0,
            tile_grid: 8,
            flat_channel: FlatChannel::default(),
            palettes: BTreeMap::new(),
            serve: ServeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from `path`, or the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("No config file, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content, path)?;
        tracing::info!(
            path = %path.display(),
            palette = %config.palette,
            user_palettes = config.palettes.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Built-in palettes plus the user palettes declared in this config.
    pub fn palette_registry(&self) -> Result<PaletteRegistry, ConfigError> {
        let mut registry = PaletteRegistry::builtin();
        for (name, colors) in &self.palettes {
            let parsed = colors
                .iter()
                .map(|hex| hex.parse::<Color>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ConfigError::InvalidPalette {
                    name: name.clone(),
                    source: PaletteError::ParseColor(e),
                })?;
            registry
                .register(name.clone(), &parsed)
                .map_err(|source| ConfigError::InvalidPalette {
                    name: name.clone(),
                    source,
                })?;
        }
        Ok(registry)
    }

    /// Apply command line overrides on top of the loaded values.
    pub fn with_overrides(mut self, overrides: ConvertOverrides) -> Self {
        if let Some(palette) = overrides.palette {
            self.palette = palette;
        }
        if let Some(size) = overrides.size {
            self.size = size;
        }
        if let Some(asset_root) = overrides.asset_root {
            self.asset_root = asset_root;
        }
        self
    }

    /// Normalization options for the pipeline.
    ///
    /// Fails on settings no image could be converted with (zero size, zero
    /// or oversized tile grid, non-finite clip limit).
    pub fn normalize_options(&self) -> Result<NormalizeOptions, ConfigError> {
        let options = NormalizeOptions::new()
            .size(self.size)
            .clip_limit(self.clip_limit)
            .tile_grid(self.tile_grid)
            .flat_channel(self.flat_channel.into());
        options.validate().map_err(ConfigError::InvalidOptions)?;
        Ok(options)
    }
}
