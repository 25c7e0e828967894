//! Download-then-launch strategy.

use super::progress::{
    RunReporter, ALREADY_RUNNING_PROGRESS, COMPLETE_PROGRESS, DOWNLOAD_BAND_END, WAITING_BAND_END,
};
use super::Orchestrator;
use crate::config::LaunchConfig;
use crate::error::Result;
use crate::models::{AcquireResponse, LaunchMethod, ProgressStatus};
use crate::network::DownloadProgress;
use crate::platform;
use tracing::{error, info, warn};

impl Orchestrator {
    /// Download a map, make sure the game is up, and hand the map to it.
    ///
    /// Never fails: any error ends the run with an `error` progress event
    /// and a response with `success: false`. A concurrent call for the same
    /// map id waits for this one to finish first.
    pub async fn acquire_and_launch(&self, map_id: &str) -> AcquireResponse {
        let _in_flight = self.in_flight.acquire(map_id).await;
        let mut reporter = self.progress.reporter(map_id);

        match self.run_acquisition(map_id, &mut reporter).await {
            Ok(method) => AcquireResponse::success(method),
            Err(e) => {
                let message = e.to_string();
                error!("Acquisition of map {} failed: {}", map_id, message);
                reporter.emit_error(&message);
                AcquireResponse::error(message)
            }
        }
    }

    async fn run_acquisition(
        &self,
        map_id: &str,
        reporter: &mut RunReporter,
    ) -> Result<LaunchMethod> {
        let url = self.config.map_url(map_id);
        let map_path = self.config.map_path(map_id);
        let executable = &self.config.executable_path;

        info!("Download URL: {}", url);
        info!("Cache dir: {}", self.config.cache_dir.display());
        info!("Map path: {}", map_path.display());
        info!("Exe exists: {}", executable.exists());

        // Captured once; not re-checked later in the run
        let was_running = self.is_app_running().await;
        info!("{} running: {}", LaunchConfig::GAME_NAME, was_running);

        platform::ensure_dir(&self.config.cache_dir)?;

        info!("Starting download...");
        reporter.emit(ProgressStatus::Starting, 0);
        let mut on_progress = |progress: DownloadProgress| reporter.emit_download(progress);
        let bytes = self.fetcher.fetch(&url, &map_path, &mut on_progress).await?;
        reporter.finish_download();
        info!("Map file size: {} bytes", bytes);

        if !executable.exists() {
            info!("Exe not found, opening map with the default handler");
            self.handoff.open_path(&map_path)?;
            reporter.emit(ProgressStatus::Complete, COMPLETE_PROGRESS);
            return Ok(LaunchMethod::ShellOpen);
        }

        if was_running {
            reporter.emit(ProgressStatus::Launching, ALREADY_RUNNING_PROGRESS);
        } else {
            self.launch_and_wait(reporter).await;
        }

        self.handoff.open_path(&map_path)?;
        reporter.emit(ProgressStatus::Complete, COMPLETE_PROGRESS);
        Ok(LaunchMethod::ShellOpenPath)
    }

    /// Start the game and wait for it, then give it time to sign in.
    ///
    /// Neither a failed spawn nor a readiness timeout is fatal: the map is
    /// handed off regardless.
    async fn launch_and_wait(&self, reporter: &mut RunReporter) {
        let executable = &self.config.executable_path;
        info!("{} not running, launching first...", LaunchConfig::GAME_NAME);

        if let Err(e) = self.launcher.launch(executable, &[]) {
            warn!("Launch failed, handing the map off anyway: {}", e);
            return;
        }

        reporter.emit(ProgressStatus::Waiting, DOWNLOAD_BAND_END);
        let readiness = self
            .readiness
            .wait_until_running(
                &self.config.process_name,
                self.config.poll_interval,
                self.config.max_poll_attempts,
                |attempts| reporter.emit_waiting(attempts),
            )
            .await;

        if readiness.ready {
            info!("Waiting {:?} for login...", self.config.settle_delay);
            reporter.emit(ProgressStatus::Login, WAITING_BAND_END);
            tokio::time::sleep(self.config.settle_delay).await;
            info!("Login wait complete");
        } else {
            info!(
                "Gave up on {} after {} polls, handing the map off anyway",
                self.config.process_name, readiness.attempts
            );
        }
    }
}
