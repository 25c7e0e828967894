//! Bounded polling until a process shows up.

use super::detection::ProcessProbe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of a readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    /// Whether the process was observed running.
    pub ready: bool,
    /// Polls performed.
    pub attempts: u32,
}

/// Polls a [`ProcessProbe`] at a fixed interval.
///
/// Sleeps go through `tokio::time`, so a paused test clock drives the loop
/// without real delays.
pub struct ReadinessWaiter {
    probe: Arc<dyn ProcessProbe>,
}

impl ReadinessWaiter {
    pub fn new(probe: Arc<dyn ProcessProbe>) -> Self {
        Self { probe }
    }

    /// Sleep, then probe, up to `max_attempts` times.
    ///
    /// `on_poll` is invoked after every probe with the number of attempts so
    /// far, including the probe that observed the process. Exhausting the
    /// budget takes exactly `max_attempts * poll_interval`.
    pub async fn wait_until_running(
        &self,
        process_name: &str,
        poll_interval: Duration,
        max_attempts: u32,
        mut on_poll: impl FnMut(u32),
    ) -> Readiness {
        info!(
            "Waiting for {} to start (polling every {:?}, up to {} attempts)",
            process_name, poll_interval, max_attempts
        );

        for attempts in 1..=max_attempts {
            tokio::time::sleep(poll_interval).await;

            let running = self.probe.check_running(process_name).await;
            debug!("Readiness poll {}: running={}", attempts, running);
            on_poll(attempts);

            if running {
                info!("{} process detected after {} polls", process_name, attempts);
                return Readiness {
                    ready: true,
                    attempts,
                };
            }
        }

        warn!("Timeout waiting for {} to start", process_name);
        Readiness {
            ready: false,
            attempts: max_attempts,
        }
    }
}
