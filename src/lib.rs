//! Thumbtint - four-color palette thumbnails
//!
//! Batch recolors photographs onto a small fixed palette (the GameBoy
//! greens by default) and ships a no-cache static file server for
//! previewing the result. The image pipeline itself lives in the
//! `palette-quant` crate; this library exposes the application modules for
//! the binary and for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
