//! Test fixtures: temporary asset trees with JPEG sources and manifests.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Manifest `img` values used across tests
pub mod imgs {
    /// Source at `games/zelda.jpg`
    pub const ZELDA: &str = "games/thumbs/zelda.png";

    /// Source at `games/tetris.jpg`
    pub const TETRIS: &str = "games/thumbs/tetris.png";

    /// Source never written
    pub const MISSING: &str = "games/thumbs/missing.png";

    /// Short path: source at `logo.jpg`
    pub const SHORT: &str = "art/logo.png";
}

/// A temporary asset root that manifests resolve against
pub struct AssetTree {
    dir: TempDir,
}

impl AssetTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write a gradient JPEG at `rel`
    pub fn add_jpeg(&self, rel: &str, width: u32, height: u32) -> PathBuf {
        let path = self.path(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            let t = ((x + y) * 255 / (width + height - 2).max(1)) as u8;
            image::Rgb([t, t / 2 + 40, 255 - t])
        });
        img.save_with_format(&path, image::ImageFormat::Jpeg)
            .expect("Failed to write JPEG");
        path
    }

    /// Write a single-color JPEG at `rel`
    pub fn add_solid_jpeg(&self, rel: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
        let path = self.path(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        image::RgbImage::from_pixel(width, height, image::Rgb(rgb))
            .save_with_format(&path, image::ImageFormat::Jpeg)
            .expect("Failed to write JPEG");
        path
    }

    /// Write a manifest listing `imgs` and return its path
    pub fn add_manifest(&self, imgs: &[&str]) -> PathBuf {
        let entries: Vec<serde_json::Value> = imgs
            .iter()
            .map(|img| serde_json::json!({ "img": img, "title": "ignored" }))
            .collect();
        self.add_file("manifest.json", &serde_json::to_string_pretty(&entries).unwrap())
    }

    /// Write an arbitrary text file at `rel`
    pub fn add_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }
}

impl Default for AssetTree {
    fn default() -> Self {
        Self::new()
    }
}
