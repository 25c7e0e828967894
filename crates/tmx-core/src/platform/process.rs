//! Platform-specific process management.
//!
//! This module provides cross-platform abstractions for querying the process
//! table and spawning processes that outlive the caller.

use crate::error::{Result, TmxError};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

#[cfg(unix)]
use std::os::unix::process::CommandExt;

#[cfg(windows)]
use std::os::windows::process::CommandExt;

/// Check whether a process with the given executable name is in the process table.
///
/// Every call takes a fresh snapshot; nothing is cached between calls.
///
/// # Platform Behavior
/// - **Linux/macOS**: exact match on the process name
/// - **Windows**: ASCII case-insensitive match on the image name
pub fn is_process_running(process_name: &str) -> bool {
    let mut system = System::new();
    system.refresh_processes_specifics(ProcessesToUpdate::All, true, ProcessRefreshKind::new());

    let found = system
        .processes()
        .values()
        .any(|process| name_matches(process.name(), process_name));

    debug!("Process table lookup for {}: {}", process_name, found);
    found
}

fn name_matches(candidate: &OsStr, wanted: &str) -> bool {
    #[cfg(windows)]
    {
        candidate.to_string_lossy().eq_ignore_ascii_case(wanted)
    }

    #[cfg(not(windows))]
    {
        candidate == OsStr::new(wanted)
    }
}

/// Spawn an executable detached from the current process.
///
/// The child gets its own session (Unix) or process group without a console
/// (Windows), stdio is discarded, and a background thread reaps it so no
/// zombie is left behind. The exit status is never reported.
///
/// Returns the child PID.
pub fn spawn_detached(executable: &Path, args: &[String]) -> Result<u32> {
    let mut cmd = Command::new(executable);
    cmd.args(args);
    if let Some(dir) = executable.parent().filter(|d| d.is_dir()) {
        cmd.current_dir(dir);
    }
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::null());

    detach(&mut cmd);

    let child = cmd.spawn().map_err(|e| TmxError::LaunchFailed {
        app: executable.display().to_string(),
        message: format!("Failed to spawn process: {}", e),
    })?;

    let pid = child.id();
    reap_in_background(child);
    Ok(pid)
}

#[cfg(unix)]
#[allow(unsafe_code)]
fn detach(cmd: &mut Command) {
    // SAFETY: setsid() is async-signal-safe and creates a new session.
    // The child becomes a session leader and no longer shares our
    // controlling terminal or process group.
    unsafe {
        cmd.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(std::io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    const DETACHED_PROCESS: u32 = 0x00000008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x00000200;
    cmd.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}

/// Wait on a child from a throwaway thread so the OS can release it.
pub(crate) fn reap_in_background(mut child: Child) {
    std::thread::spawn(move || {
        let _ = child.wait();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unknown_process_is_not_running() {
        assert!(!is_process_running("definitely-not-a-real-process-name.exe"));
    }

    #[test]
    fn test_name_matches_exact() {
        assert!(name_matches(OsStr::new("Trackmania.exe"), "Trackmania.exe"));
        assert!(!name_matches(OsStr::new("Trackmania.exe.bak"), "Trackmania.exe"));
    }

    #[test]
    fn test_spawn_missing_executable_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("Trackmania.exe");

        let err = spawn_detached(&missing, &[]).unwrap_err();
        assert!(matches!(err, TmxError::LaunchFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_detached_true() {
        let pid = spawn_detached(Path::new("/bin/sh"), &["-c".to_string(), "exit 0".to_string()])
            .unwrap();
        assert!(pid > 0);
    }
}
