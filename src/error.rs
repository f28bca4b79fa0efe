use std::io;
use std::path::PathBuf;

use palette_quant::{ConvertError, PaletteError};
use thiserror::Error;

/// Problems with the configuration file or the palette it selects.
///
/// All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid palette '{name}' in config: {source}")]
    InvalidPalette {
        name: String,
        #[source]
        source: PaletteError,
    },

    #[error("Invalid conversion settings: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// The manifest could not be read or is not a list of `{"img": ...}`
/// records. Aborts the batch before any job runs.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a single conversion job. Logged and counted; the batch
/// carries on with the next entry.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("Invalid image path '{img}': {reason}")]
    InvalidPath { img: String, reason: &'static str },

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Conversion failed: {0}")]
    Convert(#[from] ConvertError),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of the `convert` command when it does not fully succeed.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("{failed} of {total} jobs failed")]
    JobsFailed { failed: usize, total: usize },
}

/// Dev server startup failures.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("No free port between {start} and 65535")]
    NoFreePort { start: u16 },

    #[error("Server IO error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_error_invalid_path() {
        let error = JobError::InvalidPath {
            img: "/abs/pic.png".to_string(),
            reason: "absolute paths are not allowed",
        };
        assert_eq!(
            error.to_string(),
            "Invalid image path '/abs/pic.png': absolute paths are not allowed"
        );
    }

    #[test]
    fn test_job_error_from_convert_error() {
        let error: JobError = ConvertError::InvalidOptions("bad".to_string()).into();
        assert!(matches!(error, JobError::Convert(_)));
        assert_eq!(error.to_string(), "Conversion failed: invalid options: bad");
    }

    #[test]
    fn test_job_error_write() {
        let error = JobError::Write {
            path: PathBuf::from("out/pic.png"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(error.to_string(), "Failed to write out/pic.png: denied");
    }

    #[test]
    fn test_serve_error_no_free_port() {
        let error = ServeError::NoFreePort { start: 3333 };
        assert_eq!(error.to_string(), "No free port between 3333 and 65535");
    }

    #[test]
    fn test_config_error_from_palette_error() {
        let error: ConfigError = PaletteError::UnknownPalette("Sepia".to_string()).into();
        assert_eq!(error.to_string(), "unknown palette 'Sepia'");
    }

    #[test]
    fn test_config_error_invalid_options() {
        let error = ConfigError::InvalidOptions("output size must be non-zero".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid conversion settings: output size must be non-zero"
        );
    }

    #[test]
    fn test_batch_error_messages() {
        let error = BatchError::JobsFailed {
            failed: 1,
            total: 3,
        };
        assert_eq!(error.to_string(), "1 of 3 jobs failed");

        let error: BatchError =
            ConfigError::from(PaletteError::UnknownPalette("Nope".to_string())).into();
        assert_eq!(error.to_string(), "unknown palette 'Nope'");
    }

    #[test]
    fn test_manifest_error_read() {
        let error = ManifestError::Read {
            path: PathBuf::from("missing.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read manifest missing.json: not found"
        );
    }
}
