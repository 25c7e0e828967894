//! Well-known filesystem locations.

use crate::config::AppConfig;
use crate::error::{Result, TmxError};
use std::path::{Path, PathBuf};

/// Directory downloaded maps are cached in: `<temp>/trackmania-maps`.
pub fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join(AppConfig::CACHE_DIR_NAME)
}

/// Append-only log file: `<temp>/trackmania-viewer.log`.
pub fn default_log_file() -> PathBuf {
    std::env::temp_dir().join(AppConfig::LOG_FILE_NAME)
}

/// Per-user local application data directory.
///
/// # Platform Behavior
/// - **Windows**: `%LOCALAPPDATA%`
/// - **Linux**: `$XDG_DATA_HOME` or `~/.local/share`
/// - **macOS**: `~/Library/Application Support`
pub fn local_app_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir()
}

/// Create a directory (and parents) if it does not exist yet.
///
/// Safe to race with other callers: losing the race to another creator is
/// not an error.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    match std::fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(TmxError::Io {
            message: format!("Failed to create directory: {}", e),
            path: Some(dir.to_path_buf()),
            source: Some(e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_locations_live_in_temp() {
        let temp = std::env::temp_dir();
        assert!(default_cache_dir().starts_with(&temp));
        assert!(default_log_file().starts_with(&temp));
        assert!(default_log_file().ends_with("trackmania-viewer.log"));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a").join("b");

        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_dir_fails_on_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("taken");
        std::fs::write(&file, b"x").unwrap();

        let err = ensure_dir(&file).unwrap_err();
        assert!(matches!(err, TmxError::Io { .. }));
    }
}
