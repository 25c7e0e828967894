//! Error types for tmx-core.
//!
//! Every fallible step of an acquisition run maps onto one of these variants.
//! The orchestrator converts whatever reaches it into a terminal `error`
//! progress event, and the RPC layer converts it into a JSON-RPC error code.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tmx library.
#[derive(Debug, Error)]
pub enum TmxError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Process errors
    #[error("Process launch failed for {app}: {message}")]
    LaunchFailed { app: String, message: String },

    #[error("Failed to open {target}: {message}")]
    HandoffFailed { target: String, message: String },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Validation errors
    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for tmx operations.
pub type Result<T> = std::result::Result<T, TmxError>;

impl From<std::io::Error> for TmxError {
    fn from(err: std::io::Error) -> Self {
        TmxError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for TmxError {
    fn from(err: serde_json::Error) -> Self {
        TmxError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for TmxError {
    fn from(err: reqwest::Error) -> Self {
        TmxError::Network {
            message: err.to_string(),
            cause: std::error::Error::source(&err).map(|s| s.to_string()),
        }
    }
}

impl TmxError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        TmxError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Convert a reqwest error raised while talking to `url`.
    ///
    /// Timeouts only happen when a fetch timeout was configured, so the
    /// configured value is carried along for the message.
    pub fn from_request(err: reqwest::Error, url: &str, timeout: Option<std::time::Duration>) -> Self {
        if err.is_timeout() {
            TmxError::Timeout(timeout.unwrap_or_default())
        } else {
            TmxError::Network {
                message: format!("GET {} failed: {}", url, err),
                cause: std::error::Error::source(&err).map(|s| s.to_string()),
            }
        }
    }

    /// Convert to a JSON-RPC error code.
    ///
    /// Standard JSON-RPC error codes:
    /// - -32602: Invalid params
    /// - -32603: Internal error
    ///
    /// Custom error codes (application-defined, -32000 to -32099):
    /// - -32000: Network/connectivity error
    /// - -32003: Download, launch or handoff failed
    pub fn to_rpc_error_code(&self) -> i32 {
        match self {
            TmxError::Network { .. } | TmxError::Timeout(_) => -32000,

            TmxError::DownloadFailed { .. }
            | TmxError::LaunchFailed { .. }
            | TmxError::HandoffFailed { .. } => -32003,

            TmxError::InvalidParams { .. } => -32602,

            _ => -32603,
        }
    }
}
