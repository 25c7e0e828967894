//! Progress fan-out for acquisition runs.

use crate::config::AppConfig;
use crate::models::{ProgressEvent, ProgressStatus};
use crate::network::DownloadProgress;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Start of the download band on the 0-100 scale.
pub const DOWNLOAD_BAND_START: u8 = 10;
/// End of the download band; also where the waiting band starts.
pub const DOWNLOAD_BAND_END: u8 = 60;
/// Reported for every chunk when the payload length is unknown.
pub const DOWNLOAD_UNKNOWN_LENGTH: u8 = 50;
/// Ceiling of the waiting band; `login` is reported here.
pub const WAITING_BAND_END: u8 = 95;
pub const ALREADY_RUNNING_PROGRESS: u8 = 90;
pub const COMPLETE_PROGRESS: u8 = 100;

/// Map raw download progress onto the overall 0-100 scale.
pub fn download_progress_value(progress: DownloadProgress) -> u8 {
    if progress.bytes_downloaded == 0 {
        return DOWNLOAD_BAND_START;
    }
    match progress.fraction() {
        Some(ratio) => {
            let span = f64::from(DOWNLOAD_BAND_END - DOWNLOAD_BAND_START);
            let value = f64::from(DOWNLOAD_BAND_START) + (ratio * span).round();
            (value as u8).min(DOWNLOAD_BAND_END)
        }
        None => DOWNLOAD_UNKNOWN_LENGTH,
    }
}

/// Progress value for the n-th readiness poll.
pub fn waiting_progress_value(attempts: u32) -> u8 {
    let value = u32::from(DOWNLOAD_BAND_END).saturating_add(attempts);
    value.min(u32::from(WAITING_BAND_END)) as u8
}

/// Broadcast channel shared by every run of one orchestrator.
///
/// Sending never waits on subscribers. Events sent while nobody is
/// subscribed are dropped, and a subscriber that falls more than the channel
/// capacity behind sees `RecvError::Lagged`.
#[derive(Debug, Clone)]
pub struct ProgressBroadcaster {
    tx: broadcast::Sender<ProgressEvent>,
}

impl Default for ProgressBroadcaster {
    fn default() -> Self {
        Self::new(AppConfig::PROGRESS_CHANNEL_CAPACITY)
    }
}

impl ProgressBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.tx.subscribe()
    }

    /// Reporter scoped to one run of `map_id`.
    pub(crate) fn reporter(&self, map_id: &str) -> RunReporter {
        RunReporter {
            tx: self.tx.clone(),
            map_id: map_id.to_string(),
            last: None,
        }
    }
}

/// Emits the events of a single run and remembers the last one sent.
pub(crate) struct RunReporter {
    tx: broadcast::Sender<ProgressEvent>,
    map_id: String,
    last: Option<(ProgressStatus, u8)>,
}

impl RunReporter {
    pub fn emit(&mut self, status: ProgressStatus, progress: u8) {
        self.send(ProgressEvent::new(&self.map_id, status, progress));
    }

    pub fn emit_waiting(&mut self, attempts: u32) {
        let event = ProgressEvent::new(
            &self.map_id,
            ProgressStatus::Waiting,
            waiting_progress_value(attempts),
        )
        .with_attempts(attempts);
        self.send(event);
    }

    /// Report a chunk; repeats of the previous downloading value are skipped.
    pub fn emit_download(&mut self, progress: DownloadProgress) {
        let value = download_progress_value(progress);
        if self.last == Some((ProgressStatus::Downloading, value)) {
            return;
        }
        self.emit(ProgressStatus::Downloading, value);
    }

    /// Close the download band at exactly its upper bound.
    pub fn finish_download(&mut self) {
        if self.last != Some((ProgressStatus::Downloading, DOWNLOAD_BAND_END)) {
            self.emit(ProgressStatus::Downloading, DOWNLOAD_BAND_END);
        }
    }

    /// Terminal error event, carrying the progress reached so far.
    pub fn emit_error(&mut self, message: &str) {
        let event = ProgressEvent::new(&self.map_id, ProgressStatus::Error, self.last_progress())
            .with_error(message);
        self.send(event);
    }

    pub fn last_progress(&self) -> u8 {
        self.last.map(|(_, progress)| progress).unwrap_or(0)
    }

    fn send(&mut self, event: ProgressEvent) {
        debug!(
            "Progress {}: {} {}",
            event.map_id, event.status, event.progress
        );
        if event.status.is_terminal() {
            info!("Run for map {} ended: {}", event.map_id, event.status);
        }
        self.last = Some((event.status, event.progress));
        // No receivers is fine; the event is dropped
        let _ = self.tx.send(event);
    }
}
