//! Creaturedex - a command-line front end for the creature catalog.
//!
//! Browses the catalog offline-first, keeps favorites, shows the map
//! markers, and attaches pictures behind a PIN prompt.

mod cli;
mod commands;
mod devices;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use creaturedex_core::{AppContext, Config};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use devices::{terminal_devices, TerminalNotifier};

/// Log file name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "creaturedex.log";

/// Initialize the tracing subscriber for logging.
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match config.log_to_file.then(|| config.log_dir()) {
        Some(Ok(dir)) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        Some(Err(e)) => {
            eprintln!("Log directory unavailable: {}", e);
            (None, None)
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let mut config = config.with_env_overrides();
    if let Some(ref url) = cli.catalog_url {
        config.catalog_url = Some(url.clone());
    }

    let _guard = init_tracing(&config);
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults; settings will not be saved");
    }
    info!(url = config.catalog_url(), "Creaturedex starting");

    let photo = match cli.command {
        Commands::Photo { ref file, .. } => Some(file.clone()),
        _ => None,
    };
    let devices = terminal_devices(photo, config.capture_pin.clone());
    let ctx = AppContext::from_config(&config, devices, Arc::new(TerminalNotifier)).await?;

    match cli.command {
        Commands::List { favorites } => commands::list(ctx, favorites).await,
        Commands::Show { id } => commands::show(ctx, id).await,
        Commands::Favorite { id } => commands::favorite(ctx, id).await,
        Commands::Photo { id, .. } => commands::photo(ctx, id).await,
        Commands::Map { focus } => commands::map(ctx, focus).await,
        Commands::Theme { mode } => commands::theme(&ctx, mode),
        Commands::Stale => commands::stale(ctx).await,
    }
}
