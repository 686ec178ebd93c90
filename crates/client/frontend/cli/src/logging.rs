//! File logging for the terminal driver.
//!
//! Prompts and reports own stdout, so log lines go to a daily-rolling file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "explore.log";

/// Installs the global subscriber.
///
/// The returned guard flushes pending lines when dropped; keep it alive for
/// the whole run.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let log_dir = log_dir.map_or_else(default_log_dir, Path::to_path_buf);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    tracing::info!("Log directory: {}", log_dir.display());
    Ok(guard)
}

/// Platform data directory, e.g. `~/.local/share/explore/logs` on Linux.
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "explore")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/explore"))
        .join("logs")
}
