//! Logging setup.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stdout, plus an append-only log file when configured.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    install_panic_hook();
    Ok(())
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))
}

/// Route panics through tracing so they reach the log file with a backtrace.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        error!("Panic: {}\n{}", info, backtrace);
    }));
}
