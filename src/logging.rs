use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_NAME: &str = "hymn-projector.log";

/// Route `tracing` output to a log file in `data_dir`; the terminal belongs
/// to the TUI. `RUST_LOG` overrides the configured level.
pub fn init_tracing(data_dir: &Path, level: &str) -> Result<()> {
    fs::create_dir_all(data_dir).context("failed to create data directory")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE_NAME))
        .context("failed to open log file")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_filter(env_filter),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    info!(%level, "logging initialized");
    Ok(())
}
