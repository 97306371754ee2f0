//! Logging system initialization
//!
//! Sets up tracing-based logging with file output to `app.log` in the data
//! directory, rotating on startup so each session's logs land in their own
//! numbered file.

use crate::error::{LaunchdeckError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

/// Historical log files kept (app.log.1 through app.log.9)
const MAX_LOG_FILES: u8 = 9;

/// Initialize the logging system
///
/// Log level defaults to INFO and can be overridden via `RUST_LOG`.
/// Existing logs are rotated before the appender opens a fresh `app.log`.
pub fn init_logging(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;

    let log_path = data_dir.join("app.log");
    rotate_logs_on_startup(&log_path)?;

    // RollingFileAppender has no startup-based rotation with a bounded
    // history, so rotation is handled above and the appender never rotates
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("app")
        .filename_suffix("log")
        .build(data_dir)
        .map_err(|e| LaunchdeckError::StorageUnavailable(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LaunchdeckError::StorageUnavailable(Box::new(e)))?;

    tracing::info!("launchdeck v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Rotate log files on application startup
///
/// `app.log.9` is deleted, each `app.log.N` moves to `app.log.N+1`, and the
/// current `app.log` becomes `app.log.1`. Runs unconditionally on every
/// startup regardless of file size.
fn rotate_logs_on_startup(log_path: &PathBuf) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let log_dir = log_path.parent().ok_or_else(|| {
        LaunchdeckError::StorageUnavailable(crate::error::StringError::new("Invalid log path"))
    })?;
    let log_name = log_path
        .file_name()
        .ok_or_else(|| {
            LaunchdeckError::StorageUnavailable(crate::error::StringError::new(
                "Invalid log filename",
            ))
        })?
        .to_string_lossy();

    let oldest_log = log_dir.join(format!("{log_name}.{MAX_LOG_FILES}"));
    if oldest_log.exists() {
        std::fs::remove_file(&oldest_log)?;
    }

    for i in (1..MAX_LOG_FILES).rev() {
        let current_log = log_dir.join(format!("{log_name}.{i}"));
        let next_log = log_dir.join(format!("{log_name}.{}", i + 1));
        if current_log.exists() {
            std::fs::rename(&current_log, &next_log)?;
        }
    }

    std::fs::rename(log_path, log_dir.join(format!("{log_name}.1")))?;

    Ok(())
}
