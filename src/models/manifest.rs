use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{JobError, ManifestError};

/// One record of the manifest. Fields other than `img` are ignored.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Output image path, `<category>/<subpath>/<basename>.<ext>`
    pub img: String,
}

/// The batch manifest: a JSON array of [`ManifestEntry`] records.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    ///
    /// Every entry is validated up front, so a record without `img` rejects
    /// the whole manifest before any job runs.
    pub fn from_json(content: &str, path: &Path) -> Result<Self, ManifestError> {
        serde_json::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A manifest entry with its source and destination resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// The `img` value as written in the manifest
    pub img: String,
    /// JPEG to read
    pub source: PathBuf,
    /// PNG to write
    pub destination: PathBuf,
}

impl ConversionJob {
    /// Derive paths for `img` relative to `asset_root`.
    ///
    /// The source lives one directory above the destination and is always a
    /// `.jpg`; the destination keeps the manifest's directory and gets a
    /// `.png` extension:
    ///
    /// ```
    /// use std::path::{Path, PathBuf};
    /// use thumbtint::models::ConversionJob;
    ///
    /// let job = ConversionJob::from_img("category/sub/pic.png", Path::new("..")).unwrap();
    /// assert_eq!(job.source, PathBuf::from("../category/pic.jpg"));
    /// assert_eq!(job.destination, PathBuf::from("../category/sub/pic.png"));
    /// ```
    pub fn from_img(img: &str, asset_root: &Path) -> Result<Self, JobError> {
        let invalid = |reason| JobError::InvalidPath {
            img: img.to_string(),
            reason,
        };

        if img.trim().is_empty() {
            return Err(invalid("path is empty"));
        }
        let path = Path::new(img);
        if path.has_root() || path.is_absolute() {
            return Err(invalid("absolute paths are not allowed"));
        }
        if img.ends_with('/') {
            return Err(invalid("path has no file name"));
        }
        let stem = path
            .file_stem()
            .ok_or_else(|| invalid("path has no file name"))?;

        let parent = path.parent().unwrap_or(Path::new(""));
        let grandparent = parent.parent().unwrap_or(Path::new(""));

        let mut source_name = stem.to_os_string();
        source_name.push(".jpg");
        let mut destination_name = stem.to_os_string();
        destination_name.push(".png");

        Ok(Self {
            img: img.to_string(),
            source: join_non_empty(asset_root, grandparent).join(source_name),
            destination: join_non_empty(asset_root, parent).join(destination_name),
        })
    }
}

fn join_non_empty(base: &Path, rel: &Path) -> PathBuf {
    if rel.as_os_str().is_empty() {
        base.to_path_buf()
    } else {
        base.join(rel)
    }
}
