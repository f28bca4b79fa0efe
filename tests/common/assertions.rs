//! Assertion helpers for tests.

use axum::http::StatusCode;
use palette_quant::Palette;
use pretty_assertions::assert_eq;
use std::path::Path;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert the three headers that disable browser caching
pub fn assert_no_cache(response: &TestResponse) {
    assert_eq!(
        response.header("cache-control"),
        Some("no-store, no-cache, must-revalidate, max-age=0")
    );
    assert_eq!(response.header("pragma"), Some("no-cache"));
    assert_eq!(response.header("expires"), Some("0"));
}

/// Assert `path` is a `size x size` PNG using only colors of `palette`
pub fn assert_palette_png(path: &Path, size: u32, palette: &Palette) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected output {}: {e}", path.display()));
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "{} is not a PNG",
        path.display()
    );

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (size, size));
    for pixel in decoded.pixels() {
        let color = palette_quant::Color::from(*pixel);
        assert!(
            palette.contains(color),
            "{} contains non-palette color {color}",
            path.display()
        );
    }
}
