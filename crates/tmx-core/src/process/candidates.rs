//! Install locations tried by the direct-launch strategy.

use crate::config::LaunchConfig;
use crate::platform;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolves one plausible installation path for the game executable.
pub trait CandidateResolver: Send + Sync + fmt::Debug {
    /// The path to try, or `None` when this location cannot be determined
    /// on the current machine.
    fn resolve(&self) -> Option<PathBuf>;
}

/// A literal path.
#[derive(Debug, Clone)]
pub struct FixedPath(pub PathBuf);

impl FixedPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl CandidateResolver for FixedPath {
    fn resolve(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// A path relative to the per-user local app data directory.
#[derive(Debug, Clone)]
pub struct LocalAppDataPath {
    relative: PathBuf,
}

impl LocalAppDataPath {
    pub fn new(relative: impl Into<PathBuf>) -> Self {
        Self {
            relative: relative.into(),
        }
    }
}

impl CandidateResolver for LocalAppDataPath {
    fn resolve(&self) -> Option<PathBuf> {
        platform::local_app_data_dir().map(|dir| dir.join(&self.relative))
    }
}

/// Steam, both Ubisoft launcher locations, `%LOCALAPPDATA%`, then the
/// common secondary drives.
pub fn default_candidates() -> Vec<Arc<dyn CandidateResolver>> {
    let mut candidates: Vec<Arc<dyn CandidateResolver>> = LaunchConfig::FIXED_INSTALL_PATHS
        .iter()
        .map(|p| Arc::new(FixedPath::new(*p)) as Arc<dyn CandidateResolver>)
        .collect();

    let local: PathBuf = LaunchConfig::LOCAL_APP_DATA_INSTALL.iter().collect();
    candidates.push(Arc::new(LocalAppDataPath::new(local)));

    candidates.extend(
        LaunchConfig::EXTRA_INSTALL_PATHS
            .iter()
            .map(|p| Arc::new(FixedPath::new(*p)) as Arc<dyn CandidateResolver>),
    );

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_candidate_order() {
        let candidates = default_candidates();
        assert_eq!(candidates.len(), 6);

        assert_eq!(
            candidates[0].resolve(),
            Some(PathBuf::from(LaunchConfig::STEAM_EXE_PATH))
        );
        assert_eq!(
            candidates[5].resolve(),
            Some(PathBuf::from(r"E:\Games\Trackmania\Trackmania.exe"))
        );
    }

    #[test]
    fn test_local_app_data_path_joins_relative() {
        let resolver = LocalAppDataPath::new("Programs/trackmania/Trackmania.exe");
        if let Some(path) = resolver.resolve() {
            assert!(path.ends_with("Programs/trackmania/Trackmania.exe"));
        }
    }
}
