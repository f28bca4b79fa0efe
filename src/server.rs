//! Development file server.
//!
//! Serves a directory over HTTP with caching disabled, on the first free
//! port at or above a start port. The router is shared by the `serve`
//! command and integration tests.

use axum::{
    http::{
        header::{CACHE_CONTROL, EXPIRES, PRAGMA},
        HeaderValue,
    },
    Router,
};
use std::net::{IpAddr, SocketAddr};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::error::ServeError;

const NO_CACHE: &str = "no-store, no-cache, must-revalidate, max-age=0";

/// Build the static file router for `root`.
///
/// Every response, including 404s, carries headers that stop the browser
/// from caching anything.
pub fn build_router(root: impl AsRef<Path>) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root.as_ref()))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(NO_CACHE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            EXPIRES,
            HeaderValue::from_static("0"),
        ))
}

/// Bind `address` on the first port at or above `start_port` that accepts.
///
/// The listener that succeeded is returned so there is no window between
/// probing and serving.
pub async fn bind_first_free(address: IpAddr, start_port: u16) -> Result<TcpListener, ServeError> {
    bind_in_range(address, start_port..=u16::MAX)
        .await
        .ok_or(ServeError::NoFreePort { start: start_port })
}

async fn bind_in_range(address: IpAddr, ports: RangeInclusive<u16>) -> Option<TcpListener> {
    for port in ports {
        match TcpListener::bind(SocketAddr::new(address, port)).await {
            Ok(listener) => return Some(listener),
            Err(e) => tracing::debug!(port, %e, "Port unavailable"),
        }
    }
    None
}

/// Open `url` in the platform's default browser.
///
/// Only spawns the opener; does not wait for it.
pub fn open_browser(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        let mut c = std::process::Command::new("open");
        c.arg(url);
        c
    } else if cfg!(target_os = "windows") {
        let mut c = std::process::Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    } else {
        let mut c = std::process::Command::new("xdg-open");
        c.arg(url);
        c
    };
    command
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map(|_| ())
}

/// Options for [`run`]
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub root: PathBuf,
    pub address: IpAddr,
    pub start_port: u16,
    pub open_browser: bool,
}

/// Serve `options.root` until Ctrl-C.
pub async fn run(options: ServeOptions) -> Result<(), ServeError> {
    let listener = bind_first_free(options.address, options.start_port).await?;
    let addr = listener.local_addr()?;
    let url = format!("http://{addr}");

    tracing::info!(root = %options.root.display(), %url, "Serving");

    if options.open_browser {
        tracing::info!(%url, "Opening in default browser");
        if let Err(e) = open_browser(&url) {
            tracing::warn!(%e, "Failed to open browser");
        }
    }

    axum::serve(listener, build_router(&options.root))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(%e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
