//! Logging setup for the incidents TUI.
//!
//! Logs to `$XDG_STATE_HOME/incidents/tui.log` (typically
//! `~/.local/state/incidents/tui.log`). The terminal belongs to the UI, so
//! nothing is written to stdout or stderr while it runs.

use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE: &str = "tui.log";

/// Initialize logging to file.
///
/// `RUST_LOG` wins over `verbose`. Returns a guard that must be kept alive
/// for the duration of the program so buffered lines are flushed.
pub fn init(verbose: bool) -> Result<WorkerGuard> {
    let log_dir = get_log_dir()?;
    fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join(LOG_FILE);

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    tracing::info!(path = ?log_file, "Logging initialized");

    Ok(guard)
}

/// Filter used when `RUST_LOG` is unset: `info`, or `debug` with `--verbose`.
fn default_filter(verbose: bool) -> String {
    let lvl = if verbose { "debug" } else { "info" };
    format!("incidents_tui={lvl},incidents={lvl},reqwest=warn")
}

/// XDG state directory, falling back to `~/.local/state`.
fn get_log_dir() -> Result<PathBuf> {
    let state_dir = dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("state")))
        .ok_or_else(|| anyhow!("Could not determine state directory"))?;

    Ok(state_dir.join("incidents"))
}

/// Get the path to the log file (for display purposes).
pub fn log_file_path() -> Option<PathBuf> {
    get_log_dir().ok().map(|d| d.join(LOG_FILE))
}
