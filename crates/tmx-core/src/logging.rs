//! Logging configuration using tracing.
//!
//! Events go to stderr and are appended to a log file. A single background
//! worker owns the file handle, so concurrent runs never interleave partial
//! lines.

use crate::config::AppConfig;
use crate::error::{Result, TmxError};
use crate::platform;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Options for [`init`].
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Default to `debug` instead of `info` when `TMX_LOG` is unset.
    pub debug: bool,
    /// Log file; `None` uses `<temp>/trackmania-viewer.log`.
    pub log_file: Option<PathBuf>,
}

/// Initialize the global subscriber.
///
/// The log level is controlled by the `TMX_LOG` environment variable, e.g.
/// `TMX_LOG=tmx_core=debug,info`. The returned guard flushes the file writer
/// when dropped and must be held for the lifetime of the process.
pub fn init(options: LogOptions) -> Result<WorkerGuard> {
    let log_file = options
        .log_file
        .unwrap_or_else(platform::default_log_file);
    let (directory, file_name) = split_log_path(&log_file)?;
    platform::ensure_dir(&directory)?;

    // Append mode, never rotated
    let file_appender = tracing_appender::rolling::never(&directory, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if options.debug { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_env(AppConfig::LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::ChronoUtc::rfc_3339()),
        )
        .try_init()
        .map_err(|e| TmxError::Config {
            message: format!("Failed to install log subscriber: {}", e),
        })?;

    tracing::info!(
        "{} starting on {}",
        AppConfig::APP_NAME,
        platform::current_platform()
    );
    tracing::info!("Log file: {}", log_file.display());

    Ok(guard)
}

fn split_log_path(log_file: &Path) -> Result<(PathBuf, PathBuf)> {
    let file_name = log_file.file_name().ok_or_else(|| TmxError::Config {
        message: format!("Log file path has no file name: {}", log_file.display()),
    })?;
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((directory, PathBuf::from(file_name)))
}
