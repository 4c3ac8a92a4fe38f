//! Tracing subscriber setup for the binary.
//!
//! The interactive game owns the terminal in raw mode, so it only logs when
//! `MATCH3_LOG_PATH` names a file. `autoplay` logs to stderr. Both filter with
//! `MATCH3_LOG` (EnvFilter syntax), defaulting to `info`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_PATH_VAR: &str = "MATCH3_LOG_PATH";
pub const LOG_FILTER_VAR: &str = "MATCH3_LOG";

/// Log file from the environment; blank values count as unset.
pub fn log_path_from_env() -> Option<PathBuf> {
    std::env::var(LOG_PATH_VAR)
        .ok()
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) })
}

pub fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a file subscriber if `MATCH3_LOG_PATH` is set. Returns whether one was installed.
pub fn init_file_logging() -> Result<bool> {
    let Some(path) = log_path_from_env() else {
        return Ok(false);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))?;
    Ok(true)
}

pub fn init_stderr_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}
