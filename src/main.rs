//! Terra Watch - Main Entry Point
//!
//! Headless monitoring client for a mine-safety sensor network.
//!
//! Usage: `terra-watch [CONFIG_PATH]`; without a path the per-user
//! `config.toml` is used.

use std::path::PathBuf;

use anyhow::Context;
use terra_watch::domain::config::{ClientConfig, LoggingConfig};
use terra_watch::helpers::config_file_path;
use terra_watch::services::runtime;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "terra-watch.log";

fn main() -> anyhow::Result<()> {
    let config_path = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => config_file_path().context("Locating config directory")?,
    };
    let config = ClientConfig::load(&config_path)
        .with_context(|| format!("Loading {}", config_path.display()))?
        .with_env_overrides();

    // Held until exit so buffered file output is flushed
    let _guard = init_logging(&config.logging);

    tracing::info!("Starting Terra Watch...");
    tracing::debug!("Config: {:?}", config);

    runtime::block_on(terra_watch::app::run(config))
        .context("Starting runtime")?
        .context("Dashboard failed")?;

    tracing::info!("Terra Watch stopped");
    Ok(())
}

/// Console output plus an optional daily rolling file; `RUST_LOG` wins over config
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_timer(ChronoLocal::rfc_3339())
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_timer(ChronoLocal::rfc_3339()))
        .with(file_layer)
        .init();

    guard
}
