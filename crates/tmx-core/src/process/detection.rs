//! Process detection for the target application.

use crate::platform;
use async_trait::async_trait;
use tracing::warn;

/// Answers whether a named process is currently running.
///
/// Implementations must not fail: a query that cannot be answered means
/// "not running".
#[async_trait]
pub trait ProcessProbe: Send + Sync {
    fn is_running(&self, process_name: &str) -> bool;

    /// Same answer as [`is_running`](Self::is_running), for async callers.
    ///
    /// Probes whose query blocks (a full process table scan) override this
    /// to keep the scan off the async worker threads.
    async fn check_running(&self, process_name: &str) -> bool {
        self.is_running(process_name)
    }
}

/// Probe backed by the OS process table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessProbe;

#[async_trait]
impl ProcessProbe for SystemProcessProbe {
    fn is_running(&self, process_name: &str) -> bool {
        platform::is_process_running(process_name)
    }

    async fn check_running(&self, process_name: &str) -> bool {
        let process_name = process_name.to_string();
        off_runtime(move || platform::is_process_running(&process_name)).await
    }
}

/// Run a blocking query on the blocking pool; a failed task reads as "not running".
async fn off_runtime<F>(query: F) -> bool
where
    F: FnOnce() -> bool + Send + 'static,
{
    tokio::task::spawn_blocking(query).await.unwrap_or_else(|e| {
        warn!("Process table query task failed: {}", e);
        false
    })
}
