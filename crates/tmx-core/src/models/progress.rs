//! Progress events pushed to the frontend during a run.

use serde::{Deserialize, Serialize};

/// Phase of an acquisition run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Starting,
    Downloading,
    Waiting,
    Login,
    Launching,
    Complete,
    Error,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::Starting => "starting",
            ProgressStatus::Downloading => "downloading",
            ProgressStatus::Waiting => "waiting",
            ProgressStatus::Login => "login",
            ProgressStatus::Launching => "launching",
            ProgressStatus::Complete => "complete",
            ProgressStatus::Error => "error",
        }
    }

    /// Whether no further events follow in the same run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressStatus::Complete | ProgressStatus::Error)
    }
}

impl std::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One progress update, keyed by the map id of the run that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub map_id: String,
    pub status: ProgressStatus,
    /// Overall progress, 0-100.
    pub progress: u8,
    /// Readiness polls so far (only while waiting).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
    /// Failure message (only on `error`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProgressEvent {
    pub fn new(map_id: impl Into<String>, status: ProgressStatus, progress: u8) -> Self {
        Self {
            map_id: map_id.into(),
            status,
            progress: progress.min(100),
            attempts: None,
            error: None,
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = Some(attempts);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_waiting_event_shape() {
        let event = ProgressEvent::new("123456", ProgressStatus::Waiting, 61).with_attempts(1);
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"mapId": "123456", "status": "waiting", "progress": 61, "attempts": 1})
        );
    }

    #[test]
    fn test_error_event_shape() {
        let event = ProgressEvent::new("7", ProgressStatus::Error, 10).with_error("connection refused");
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "connection refused");
        assert!(value.get("attempts").is_none());
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(ProgressEvent::new("1", ProgressStatus::Complete, 250).progress, 100);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(ProgressStatus::Complete.is_terminal());
        assert!(ProgressStatus::Error.is_terminal());
        assert!(!ProgressStatus::Login.is_terminal());
    }
}
