pub mod config;
pub mod manifest;

pub use config::{AppConfig, ConvertOverrides, FlatChannel, ServeConfig};
pub use manifest::{ConversionJob, Manifest, ManifestEntry};
