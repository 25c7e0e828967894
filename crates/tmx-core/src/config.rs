//! Centralized configuration for tmx-core.
//!
//! Compile-time constants live on unit structs grouped by concern. The
//! runtime knobs of one orchestrator are carried by [`AcquisitionConfig`],
//! whose `Default` reproduces the constants below.

use crate::platform;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "tmx-launcher";
    pub const LOG_FILE_NAME: &'static str = "trackmania-viewer.log";
    pub const LOG_ENV_VAR: &'static str = "TMX_LOG";
    pub const CACHE_DIR_NAME: &'static str = "trackmania-maps";
    pub const MAP_FILE_SUFFIX: &'static str = ".Map.Gbx";
    /// Progress events buffered per subscriber before it lags.
    pub const PROGRESS_CHANNEL_CAPACITY: usize = 256;
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const MAP_URL_BASE: &'static str = "https://trackmania.exchange/mapgbx";
    pub const USER_AGENT: &'static str = concat!("tmx-launcher/", env!("CARGO_PKG_VERSION"));
    pub const DOWNLOAD_TEMP_SUFFIX: &'static str = ".part";
}

/// Target application and launch timing.
pub struct LaunchConfig;

impl LaunchConfig {
    pub const GAME_NAME: &'static str = "Trackmania";
    pub const PROCESS_NAME: &'static str = "Trackmania.exe";
    pub const STEAM_EXE_PATH: &'static str =
        r"C:\Program Files (x86)\Steam\steamapps\common\Trackmania\Trackmania.exe";
    pub const JOIN_ARG_PREFIX: &'static str = "/joinmap=";
    pub const JOIN_URI_PREFIX: &'static str = "trackmania://joinmap/";

    pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);
    pub const MAX_POLL_ATTEMPTS: u32 = 60;
    pub const SETTLE_DELAY: Duration = Duration::from_secs(15);

    /// Fixed install locations probed by the direct-launch strategy, in order.
    /// The `%LOCALAPPDATA%` entry is resolved at runtime and slots in after
    /// the Ubisoft locations.
    pub const FIXED_INSTALL_PATHS: [&'static str; 3] = [
        Self::STEAM_EXE_PATH,
        r"C:\Program Files (x86)\Ubisoft\Ubisoft Game Launcher\games\Trackmania\Trackmania.exe",
        r"C:\Program Files\Ubisoft\Ubisoft Game Launcher\games\Trackmania\Trackmania.exe",
    ];
    pub const LOCAL_APP_DATA_INSTALL: [&'static str; 3] = ["Programs", "trackmania", "Trackmania.exe"];
    pub const EXTRA_INSTALL_PATHS: [&'static str; 2] = [
        r"D:\Games\Trackmania\Trackmania.exe",
        r"E:\Games\Trackmania\Trackmania.exe",
    ];
}

/// Runtime settings for one orchestrator.
#[derive(Debug, Clone)]
pub struct AcquisitionConfig {
    /// Base URL; the map id is appended as the last path segment.
    pub map_url_base: String,
    /// Directory holding downloaded maps.
    pub cache_dir: PathBuf,
    /// Executable launched by the download-then-launch strategy.
    pub executable_path: PathBuf,
    /// Image name looked up in the process table.
    pub process_name: String,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    /// Wait after readiness before the map is handed off.
    pub settle_delay: Duration,
    /// Whole-request timeout for the map download. `None` never times out.
    pub fetch_timeout: Option<Duration>,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            map_url_base: NetworkConfig::MAP_URL_BASE.to_string(),
            cache_dir: platform::default_cache_dir(),
            executable_path: PathBuf::from(LaunchConfig::STEAM_EXE_PATH),
            process_name: LaunchConfig::PROCESS_NAME.to_string(),
            poll_interval: LaunchConfig::POLL_INTERVAL,
            max_poll_attempts: LaunchConfig::MAX_POLL_ATTEMPTS,
            settle_delay: LaunchConfig::SETTLE_DELAY,
            fetch_timeout: None,
        }
    }
}

impl AcquisitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map_url_base(mut self, base: impl Into<String>) -> Self {
        self.map_url_base = base.into();
        self
    }

    pub fn with_cache_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cache_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_executable_path(mut self, path: impl AsRef<Path>) -> Self {
        self.executable_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_process_name(mut self, name: impl Into<String>) -> Self {
        self.process_name = name.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Remote URL for a map id.
    pub fn map_url(&self, map_id: &str) -> String {
        format!("{}/{}", self.map_url_base.trim_end_matches('/'), map_id)
    }

    /// Local cache path for a map id.
    pub fn map_path(&self, map_id: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}{}", map_id, AppConfig::MAP_FILE_SUFFIX))
    }

    /// Command-line argument asking the game to join a map.
    pub fn join_arg(map_id: &str) -> String {
        format!("{}{}", LaunchConfig::JOIN_ARG_PREFIX, map_id)
    }

    /// Custom URI asking the registered handler to join a map.
    pub fn join_uri(map_id: &str) -> String {
        format!("{}{}", LaunchConfig::JOIN_URI_PREFIX, map_id)
    }
}
