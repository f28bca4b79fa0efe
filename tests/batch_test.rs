//! Batch conversion tests: manifest in, PNG thumbnails out.

mod common;

use common::fixtures::imgs;
use common::{assert_palette_png, AssetTree};
use palette_quant::{PaletteConverter, PaletteRegistry};
use pretty_assertions::assert_eq;

use thumbtint::error::{BatchError, ConfigError, JobError, ManifestError};
use thumbtint::models::{AppConfig, ConvertOverrides, Manifest};
use thumbtint::services::{run_convert, BatchDriver};

fn driver_for(tree: &AssetTree, config: &AppConfig) -> BatchDriver {
    let registry = config.palette_registry().unwrap();
    let palette = registry.get(&config.palette).unwrap().clone();
    let converter = PaletteConverter::new(palette).options(config.normalize_options().unwrap());
    BatchDriver::new(converter, tree.root()).optimize_png(config.optimize_png)
}

#[test]
fn test_converts_every_entry() {
    let tree = AssetTree::new();
    tree.add_jpeg("games/zelda.jpg", 200, 150);
    tree.add_jpeg("games/tetris.jpg", 64, 96);
    tree.add_jpeg("logo.jpg", 20, 20);
    let manifest_path = tree.add_manifest(&[imgs::ZELDA, imgs::TETRIS, imgs::SHORT]);

    let config = AppConfig {
        size: 32,
        ..AppConfig::default()
    };
    let manifest = Manifest::load(&manifest_path).unwrap();
    let report = driver_for(&tree, &config).run(&manifest);

    assert_eq!(report.processed, 3);
    assert!(report.is_success());

    let palette = PaletteRegistry::builtin().get("GameBoy").unwrap().clone();
    for out in ["games/thumbs/zelda.png", "games/thumbs/tetris.png", "art/logo.png"] {
        assert_palette_png(&tree.path(out), 32, &palette);
    }
}

#[test]
fn test_default_size_is_128() {
    let tree = AssetTree::new();
    tree.add_jpeg("games/zelda.jpg", 300, 200);
    let manifest = Manifest::load(&tree.add_manifest(&[imgs::ZELDA])).unwrap();

    let report = driver_for(&tree, &AppConfig::default()).run(&manifest);
    assert_eq!(report.processed, 1);

    let palette = PaletteRegistry::builtin().get("GameBoy").unwrap().clone();
    assert_palette_png(&tree.path("games/thumbs/zelda.png"), 128, &palette);
}

#[test]
fn test_missing_source_fails_only_that_job() {
    let tree = AssetTree::new();
    tree.add_jpeg("games/zelda.jpg", 40, 40);
    tree.add_jpeg("games/tetris.jpg", 40, 40);
    let manifest = Manifest::load(&tree.add_manifest(&[
        imgs::ZELDA,
        imgs::MISSING,
        imgs::TETRIS,
    ]))
    .unwrap();

    let config = AppConfig {
        size: 16,
        optimize_png: false,
        ..AppConfig::default()
    };
    let report = driver_for(&tree, &config).run(&manifest);

    assert_eq!(report.processed, 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures[0].img, imgs::MISSING);
    assert!(matches!(report.failures[0].error, JobError::Decode { .. }));
    assert!(tree.path("games/thumbs/zelda.png").exists());
    assert!(tree.path("games/thumbs/tetris.png").exists());
    assert!(!tree.path("games/thumbs/missing.png").exists());
}

#[test]
fn test_undecodable_source_is_reported() {
    let tree = AssetTree::new();
    tree.add_file("games/zelda.jpg", "definitely not a jpeg");
    let manifest = Manifest::load(&tree.add_manifest(&[imgs::ZELDA])).unwrap();

    let report = driver_for(&tree, &AppConfig::default()).run(&manifest);
    assert_eq!(report.processed, 0);
    assert!(matches!(report.failures[0].error, JobError::Decode { .. }));
}

#[test]
fn test_malformed_manifest_aborts_before_any_job() {
    let tree = AssetTree::new();
    let path = tree.add_file(
        "manifest.json",
        r#"[{"img": "games/thumbs/zelda.png"}, {"title": "no img"}]"#,
    );
    assert!(matches!(
        Manifest::load(&path),
        Err(ManifestError::Parse { .. })
    ));

    let path = tree.add_file("object.json", r#"{"img": "games/thumbs/zelda.png"}"#);
    assert!(matches!(
        Manifest::load(&path),
        Err(ManifestError::Parse { .. })
    ));

    assert!(matches!(
        Manifest::load(&tree.path("absent.json")),
        Err(ManifestError::Read { .. })
    ));
}

#[test]
fn test_solid_source_still_converts() {
    let tree = AssetTree::new();
    tree.add_solid_jpeg("games/zelda.jpg", 30, 30, [120, 120, 120]);
    let manifest = Manifest::load(&tree.add_manifest(&[imgs::ZELDA])).unwrap();

    let config = AppConfig {
        size: 8,
        ..AppConfig::default()
    };
    let report = driver_for(&tree, &config).run(&manifest);
    assert!(report.is_success());

    let palette = PaletteRegistry::builtin().get("GameBoy").unwrap().clone();
    assert_palette_png(&tree.path("games/thumbs/zelda.png"), 8, &palette);
}

#[test]
fn test_user_palette_from_config() {
    let tree = AssetTree::new();
    tree.add_jpeg("games/zelda.jpg", 50, 50);
    let manifest = Manifest::load(&tree.add_manifest(&[imgs::ZELDA])).unwrap();

    let config = AppConfig::from_yaml(
        "palette: sepia\nsize: 24\npalettes:\n  Sepia: [\"#f0dcb4\", \"#2b1d0e\", \"#b08d57\", \"#6b4f2a\"]\n",
        std::path::Path::new("config.yaml"),
    )
    .unwrap();
    let report = driver_for(&tree, &config).run(&manifest);
    assert!(report.is_success());

    let registry = config.palette_registry().unwrap();
    assert_palette_png(
        &tree.path("games/thumbs/zelda.png"),
        24,
        registry.get("Sepia").unwrap(),
    );
}

#[test]
fn test_run_convert_succeeds_with_overrides() {
    let tree = AssetTree::new();
    tree.add_jpeg("games/zelda.jpg", 60, 40);
    let manifest_path = tree.add_manifest(&[imgs::ZELDA]);

    let config = AppConfig::from_yaml("palette: Grayscale\nsize: 64\n", std::path::Path::new("c.yaml"))
        .unwrap()
        .with_overrides(ConvertOverrides {
            palette: Some("GameBoy".to_string()),
            size: Some(16),
            asset_root: Some(tree.root().to_path_buf()),
        });
    let report = run_convert(&config, &manifest_path).unwrap();
    assert_eq!(report.processed, 1);

    let palette = PaletteRegistry::builtin().get("GameBoy").unwrap().clone();
    assert_palette_png(&tree.path("games/thumbs/zelda.png"), 16, &palette);
}

#[test]
fn test_run_convert_reports_failed_jobs() {
    let tree = AssetTree::new();
    tree.add_jpeg("games/zelda.jpg", 40, 40);
    let manifest_path = tree.add_manifest(&[imgs::MISSING, imgs::ZELDA]);

    let config = AppConfig {
        size: 8,
        optimize_png: false,
        asset_root: tree.root().to_path_buf(),
        ..AppConfig::default()
    };
    let err = run_convert(&config, &manifest_path).unwrap_err();
    assert!(matches!(err, BatchError::JobsFailed { failed: 1, total: 2 }));
    assert_eq!(err.to_string(), "1 of 2 jobs failed");
    assert!(tree.path("games/thumbs/zelda.png").exists());
}

#[test]
fn test_run_convert_rejects_bad_settings_before_any_job() {
    let tree = AssetTree::new();
    tree.add_jpeg("games/zelda.jpg", 40, 40);
    tree.add_jpeg("games/tetris.jpg", 40, 40);
    let manifest_path = tree.add_manifest(&[imgs::ZELDA, imgs::TETRIS]);
    let base = AppConfig {
        asset_root: tree.root().to_path_buf(),
        ..AppConfig::default()
    };

    for yaml in ["size: 0\n", "tile_grid: 0\n"] {
        let config = AppConfig {
            asset_root: base.asset_root.clone(),
            ..AppConfig::from_yaml(yaml, std::path::Path::new("c.yaml")).unwrap()
        };
        let err = run_convert(&config, &manifest_path).unwrap_err();
        assert!(
            matches!(err, BatchError::Config(ConfigError::InvalidOptions(_))),
            "{yaml:?}: {err}"
        );
    }

    let unknown = AppConfig {
        palette: "Nope".to_string(),
        ..base.clone()
    };
    assert!(matches!(
        run_convert(&unknown, &manifest_path),
        Err(BatchError::Config(ConfigError::Palette(_)))
    ));

    assert!(matches!(
        run_convert(&base, &tree.path("absent.json")),
        Err(BatchError::Manifest(ManifestError::Read { .. }))
    ));

    assert!(!tree.path("games/thumbs/zelda.png").exists());
    assert!(!tree.path("games/thumbs/tetris.png").exists());
}
