//! Platform abstraction layer for cross-platform compatibility.
//!
//! This module centralizes all platform-specific code to make it easy to find,
//! maintain, and extend. All `#[cfg]` blocks for OS-specific behavior should
//! live in this module rather than scattered throughout the codebase.
//!
//! # Architecture
//!
//! Each submodule handles a specific cross-platform concern:
//! - `paths` - Well-known directories (temp cache, log file, local app data)
//! - `process` - Process table queries and detached spawning
//! - `open` - Default-application and URI-scheme handoff

pub mod open;
pub mod paths;
pub mod process;

// Re-export commonly used items
pub use open::{open_path, open_uri};
pub use paths::{default_cache_dir, default_log_file, ensure_dir, local_app_data_dir};
pub use process::{is_process_running, spawn_detached};

/// Returns the current platform name.
pub fn current_platform() -> &'static str {
    #[cfg(target_os = "linux")]
    {
        "linux"
    }
    #[cfg(target_os = "windows")]
    {
        "windows"
    }
    #[cfg(target_os = "macos")]
    {
        "macos"
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
    {
        "unknown"
    }
}
