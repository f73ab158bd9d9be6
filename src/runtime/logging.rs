use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_path};

/// Environment variable that overrides `logging.filter`.
pub const LOG_ENV: &str = "ABYSS_LOG";

/// Where log lines go: the configured file, else the XDG state directory.
pub fn log_path(settings: &LoggingSettings) -> Option<PathBuf> {
    settings.file.clone().or_else(default_log_path)
}

/// Install a file-backed `tracing` subscriber. The terminal belongs to the
/// UI, so nothing is ever logged to stdout or stderr.
pub fn init(settings: &LoggingSettings) -> Result<PathBuf, Box<dyn Error>> {
    let path = log_path(settings).ok_or("cannot determine a log file location")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.filter)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| e as Box<dyn Error>)?;
    Ok(path)
}
