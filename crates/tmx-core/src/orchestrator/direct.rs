//! Direct-candidate launch strategy.

use super::Orchestrator;
use crate::config::AcquisitionConfig;
use crate::models::DirectLaunchResponse;
use tracing::{debug, error, info, warn};

impl Orchestrator {
    /// Start the game from the first known install location that exists,
    /// asking it to join `map_id`; otherwise invoke the game's URI scheme.
    ///
    /// Nothing is downloaded and the spawned process is not observed.
    pub fn launch_direct(&self, map_id: &str) -> DirectLaunchResponse {
        let join_arg = AcquisitionConfig::join_arg(map_id);

        for candidate in &self.candidates {
            let Some(path) = candidate.resolve() else {
                debug!("Skipping unresolvable candidate {:?}", candidate);
                continue;
            };
            if !path.exists() {
                debug!("No install at {}", path.display());
                continue;
            }

            info!("Trying direct launch: {}", path.display());
            match self.launcher.launch(&path, std::slice::from_ref(&join_arg)) {
                Ok(()) => return DirectLaunchResponse::launched(path.display().to_string()),
                Err(e) => warn!("Direct launch from {} failed: {}", path.display(), e),
            }
        }

        let uri = AcquisitionConfig::join_uri(map_id);
        info!("No launchable install found, trying protocol: {}", uri);
        match self.handoff.open_uri(&uri) {
            Ok(()) => DirectLaunchResponse::protocol(),
            Err(e) => {
                error!("Protocol fallback failed: {}", e);
                DirectLaunchResponse::error(e.to_string())
            }
        }
    }
}
