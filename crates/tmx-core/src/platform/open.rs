//! Default-application handoff.
//!
//! Both functions only report whether the OS opener could be started. They
//! cannot tell whether the receiving application accepted the file or URI.

use super::process::reap_in_background;
use crate::error::{Result, TmxError};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Open a file with its registered default handler.
///
/// # Platform Behavior
/// - **Linux**: `xdg-open <path>`
/// - **macOS**: `open <path>`
/// - **Windows**: `explorer <path>`
pub fn open_path(path: &Path) -> Result<()> {
    spawn_opener(path.as_os_str()).map_err(|message| TmxError::HandoffFailed {
        target: path.display().to_string(),
        message,
    })
}

/// Invoke a custom URI scheme through the OS "open externally" mechanism.
pub fn open_uri(uri: &str) -> Result<()> {
    spawn_opener(OsStr::new(uri)).map_err(|message| TmxError::HandoffFailed {
        target: uri.to_string(),
        message,
    })
}

fn spawn_opener(target: &OsStr) -> std::result::Result<(), String> {
    let opener = opener_program();
    debug!("Opening {:?} with {}", target, opener);

    let child = Command::new(opener)
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("{} failed to start: {}", opener, e))?;

    // Don't wait for the opener - it should run independently
    reap_in_background(child);
    Ok(())
}

fn opener_program() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        "explorer"
    }
    #[cfg(target_os = "macos")]
    {
        "open"
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        "xdg-open"
    }
}
