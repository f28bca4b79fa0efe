use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thumbtint::models::{AppConfig, ConvertOverrides};
use thumbtint::server::{self, ServeOptions};
use thumbtint::services::run_convert;

#[derive(Parser)]
#[command(name = "thumbtint")]
#[command(about = "Remap thumbnails onto four-color retro palettes")]
struct Cli {
    /// YAML configuration file (falls back to $CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every image listed in a JSON manifest
    Convert {
        /// Manifest file: JSON array of {"img": "<category>/<sub>/<name>.png"}
        manifest: PathBuf,

        /// Palette name (see `thumbtint palettes`)
        #[arg(short, long)]
        palette: Option<String>,

        /// Thumbnail edge length in pixels
        #[arg(short, long)]
        size: Option<u32>,

        /// Directory manifest paths are resolved against
        #[arg(long)]
        asset_root: Option<PathBuf>,
    },
    /// Serve a directory with caching disabled
    Serve {
        /// Directory to serve (default: current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// First port to try
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open a browser
        #[arg(long)]
        no_open: bool,
    },
    /// List known palettes
    Palettes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    match cli.command {
        Some(Commands::Convert {
            manifest,
            palette,
            size,
            asset_root,
        }) => run_convert_command(
            config,
            &manifest,
            ConvertOverrides {
                palette,
                size,
                asset_root,
            },
        ),
        Some(Commands::Serve { dir, port, no_open }) => {
            run_server(config, dir, port, no_open).await
        }
        Some(Commands::Palettes) => run_palettes_command(config),
        None => {
            run_status_command(config.as_deref());
            Ok(())
        }
    }
}

/// Convert a manifest's images (no server needed)
fn run_convert_command(
    config_path: Option<PathBuf>,
    manifest_path: &Path,
    overrides: ConvertOverrides,
) -> anyhow::Result<()> {
    // CLI logging: no timestamps
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thumbtint=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(config_path.as_deref())?.with_overrides(overrides);
    run_convert(&config, manifest_path)?;
    Ok(())
}

/// Print every known palette, darkest color first
fn run_palettes_command(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let registry = config.palette_registry()?;

    for palette in registry.iter() {
        let colors: Vec<String> = palette.colors().iter().map(|c| c.to_string()).collect();
        let marker = if palette.name().eq_ignore_ascii_case(&config.palette) {
            " (default)"
        } else {
            ""
        };
        println!("{}{marker}", palette.name());
        println!("  colors:     {}", colors.join("  "));
        println!(
            "  brightness: {:.1} .. {:.1}",
            palette.min_brightness(),
            palette.max_brightness()
        );
    }
    Ok(())
}

/// Display status and configuration information
fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("Thumbtint v{VERSION}");
    println!("Four-color palette thumbnails and a no-cache dev server\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        rust_log.as_deref().unwrap_or("(not set)")
    );

    println!("\nConfiguration:");
    let config = match config_path {
        Some(path) if path.exists() => match AppConfig::load(Some(path)) {
            Ok(config) => {
                println!("  Source:     {}", path.display());
                config
            }
            Err(e) => {
                println!("  Source:     defaults ({e})");
                AppConfig::default()
            }
        },
        Some(path) => {
            println!("  Source:     defaults ({} not found)", path.display());
            AppConfig::default()
        }
        None => {
            println!("  Source:     defaults");
            AppConfig::default()
        }
    };
    println!("  Palette:    {}", config.palette);
    println!("  Size:       {0}x{0}", config.size);
    println!("  Asset root: {}", config.asset_root.display());
    println!(
        "  Serve:      {}:{} (first free port)",
        config.serve.address, config.serve.start_port
    );

    println!("\nCommands:");
    println!("  thumbtint convert <MANIFEST>  Convert images listed in a manifest");
    println!("  thumbtint serve               Serve a directory without caching");
    println!("  thumbtint palettes            List known palettes");
    println!("\nRun 'thumbtint --help' for more details.");
}

/// Run the dev file server
async fn run_server(
    config_path: Option<PathBuf>,
    dir: Option<PathBuf>,
    port: Option<u16>,
    no_open: bool,
) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thumbtint=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load(config_path.as_deref())?;
    let root = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    server::run(ServeOptions {
        root,
        address: config.serve.address,
        start_port: port.unwrap_or(config.serve.start_port),
        open_browser: config.serve.open_browser && !no_open,
    })
    .await?;

    Ok(())
}
