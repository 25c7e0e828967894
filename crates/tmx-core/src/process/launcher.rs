//! Process launching functionality.

use crate::error::{Result, TmxError};
use crate::platform;
use std::path::Path;
use tracing::{error, info};

/// Starts a new OS process.
pub trait Launcher: Send + Sync {
    /// Start `executable` with `args`. Success only means the spawn worked;
    /// the caller never waits on the process.
    fn launch(&self, executable: &Path, args: &[String]) -> Result<()>;
}

/// Launcher that detaches the child from this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedLauncher;

impl Launcher for DetachedLauncher {
    fn launch(&self, executable: &Path, args: &[String]) -> Result<()> {
        // Validate prerequisites
        if !executable.exists() {
            return Err(TmxError::LaunchFailed {
                app: executable.display().to_string(),
                message: "Executable not found".to_string(),
            });
        }

        info!("Launching {} {:?}", executable.display(), args);

        match platform::spawn_detached(executable, args) {
            Ok(pid) => {
                info!("Launched process with PID {}", pid);
                Ok(())
            }
            Err(e) => {
                error!("Failed to spawn {}: {}", executable.display(), e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_launch_missing_executable() {
        let temp_dir = TempDir::new().unwrap();
        let exe = temp_dir.path().join("Trackmania.exe");

        let result = DetachedLauncher.launch(&exe, &["/joinmap=1".to_string()]);
        match result {
            Err(TmxError::LaunchFailed { message, .. }) => {
                assert_eq!(message, "Executable not found")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_launch_non_executable_file() {
        let temp_dir = TempDir::new().unwrap();
        let exe = temp_dir.path().join("Trackmania.exe");
        std::fs::write(&exe, b"not a program").unwrap();

        // Present on disk but not runnable: the spawn itself fails
        let result = DetachedLauncher.launch(&exe, &[]);
        assert!(matches!(result, Err(TmxError::LaunchFailed { .. })));
    }
}
