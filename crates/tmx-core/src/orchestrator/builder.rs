//! Builder for configuring an [`Orchestrator`].

use super::in_flight::InFlightRegistry;
use super::progress::ProgressBroadcaster;
use super::Orchestrator;
use crate::config::{AcquisitionConfig, AppConfig};
use crate::error::Result;
use crate::handoff::{Handoff, ShellHandoff};
use crate::network::{Fetcher, HttpFetcher};
use crate::process::{
    default_candidates, CandidateResolver, DetachedLauncher, Launcher, ProcessProbe,
    ReadinessWaiter, SystemProcessProbe,
};
use std::sync::Arc;

/// Builder for configuring an [`Orchestrator`].
///
/// Every component defaults to its OS-backed implementation; tests swap in
/// their own.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use tmx_core::{AcquisitionConfig, Orchestrator};
///
/// # fn example() -> tmx_core::Result<()> {
/// let config = AcquisitionConfig::default()
///     .with_cache_dir("/tmp/maps")
///     .with_fetch_timeout(Some(Duration::from_secs(60)));
///
/// let orchestrator = Orchestrator::builder().config(config).build()?;
/// # Ok(())
/// # }
/// ```
pub struct OrchestratorBuilder {
    config: AcquisitionConfig,
    fetcher: Option<Arc<dyn Fetcher>>,
    probe: Option<Arc<dyn ProcessProbe>>,
    launcher: Option<Arc<dyn Launcher>>,
    handoff: Option<Arc<dyn Handoff>>,
    candidates: Option<Vec<Arc<dyn CandidateResolver>>>,
    progress_capacity: usize,
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            config: AcquisitionConfig::default(),
            fetcher: None,
            probe: None,
            launcher: None,
            handoff: None,
            candidates: None,
            progress_capacity: AppConfig::PROGRESS_CHANNEL_CAPACITY,
        }
    }

    /// Runtime settings (URLs, paths, timing).
    pub fn config(mut self, config: AcquisitionConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the HTTP fetcher. When set, `fetch_timeout` is not applied.
    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn probe(mut self, probe: Arc<dyn ProcessProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn launcher(mut self, launcher: Arc<dyn Launcher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    pub fn handoff(mut self, handoff: Arc<dyn Handoff>) -> Self {
        self.handoff = Some(handoff);
        self
    }

    /// Ordered install locations for [`Orchestrator::launch_direct`].
    ///
    /// Default: [`default_candidates`]
    pub fn candidates(mut self, candidates: Vec<Arc<dyn CandidateResolver>>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    /// Events a slow subscriber may fall behind before it starts missing some.
    ///
    /// Default: 256
    pub fn progress_capacity(mut self, capacity: usize) -> Self {
        self.progress_capacity = capacity;
        self
    }

    /// Build the orchestrator.
    ///
    /// Fails only when the default HTTP client cannot be constructed.
    pub fn build(self) -> Result<Orchestrator> {
        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new(self.config.fetch_timeout)?),
        };
        let probe = self
            .probe
            .unwrap_or_else(|| Arc::new(SystemProcessProbe));

        Ok(Orchestrator {
            readiness: ReadinessWaiter::new(probe.clone()),
            fetcher,
            probe,
            launcher: self.launcher.unwrap_or_else(|| Arc::new(DetachedLauncher)),
            handoff: self.handoff.unwrap_or_else(|| Arc::new(ShellHandoff)),
            candidates: self.candidates.unwrap_or_else(default_candidates),
            progress: ProgressBroadcaster::new(self.progress_capacity),
            in_flight: InFlightRegistry::new(),
            config: self.config,
        })
    }
}
