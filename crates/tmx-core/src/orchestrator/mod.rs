//! Acquisition-and-launch orchestration.
//!
//! An [`Orchestrator`] sequences the fetcher, process probe, launcher,
//! readiness waiter and handoff into two end-to-end strategies:
//!
//! - [`Orchestrator::acquire_and_launch`] downloads the map into the cache,
//!   starts the game if it is installed and not yet running, waits for it to
//!   appear, then opens the map with its default handler.
//! - [`Orchestrator::launch_direct`] skips the download and starts the game
//!   from a known install location with a join argument, falling back to the
//!   game's URI scheme.
//!
//! Progress of every run is pushed to all [`subscribe`](Orchestrator::subscribe)rs.
//!
//! # Example
//!
//! ```rust,no_run
//! use tmx_core::Orchestrator;
//!
//! # async fn example() -> tmx_core::Result<()> {
//! let orchestrator = Orchestrator::builder().build()?;
//! let mut progress = orchestrator.subscribe();
//! tokio::spawn(async move {
//!     while let Ok(event) = progress.recv().await {
//!         println!("{} {} {}", event.map_id, event.status, event.progress);
//!     }
//! });
//!
//! let result = orchestrator.acquire_and_launch("123456").await;
//! assert!(result.success);
//! # Ok(())
//! # }
//! ```

mod acquire;
mod builder;
mod direct;
mod in_flight;
mod progress;

pub use builder::OrchestratorBuilder;
pub use progress::{
    download_progress_value, waiting_progress_value, ProgressBroadcaster, DOWNLOAD_BAND_END,
    DOWNLOAD_BAND_START, DOWNLOAD_UNKNOWN_LENGTH, WAITING_BAND_END,
};

use crate::config::AcquisitionConfig;
use crate::handoff::Handoff;
use crate::models::ProgressEvent;
use crate::network::Fetcher;
use crate::process::{CandidateResolver, Launcher, ProcessProbe, ReadinessWaiter};
use in_flight::InFlightRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Coordinates map acquisition and game launch.
///
/// Cheap to share behind an `Arc`; all methods take `&self` and runs for
/// different map ids proceed concurrently.
pub struct Orchestrator {
    config: AcquisitionConfig,
    fetcher: Arc<dyn Fetcher>,
    probe: Arc<dyn ProcessProbe>,
    launcher: Arc<dyn Launcher>,
    handoff: Arc<dyn Handoff>,
    candidates: Vec<Arc<dyn CandidateResolver>>,
    readiness: ReadinessWaiter,
    progress: ProgressBroadcaster,
    in_flight: InFlightRegistry,
}

impl Orchestrator {
    /// Builder with the real OS-backed components.
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    /// Orchestrator with default components and the given settings.
    pub fn new(config: AcquisitionConfig) -> crate::Result<Self> {
        OrchestratorBuilder::new().config(config).build()
    }

    /// Receive progress events of every run started after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.progress.subscribe()
    }

    /// Whether the game process is running right now.
    pub async fn is_app_running(&self) -> bool {
        self.probe.check_running(&self.config.process_name).await
    }

    /// Whether a previous run already left this map in the cache.
    pub fn is_map_cached(&self, map_id: &str) -> bool {
        self.map_path(map_id).is_file()
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    pub fn map_url(&self, map_id: &str) -> String {
        self.config.map_url(map_id)
    }

    pub fn map_path(&self, map_id: &str) -> PathBuf {
        self.config.map_path(map_id)
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("candidates", &self.candidates)
            .finish_non_exhaustive()
    }
}
