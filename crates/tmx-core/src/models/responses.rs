//! Command response types matching the frontend's expectations.

use serde::{Deserialize, Serialize};

/// How the map (or the game) was finally opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchMethod {
    /// Map opened through the shell after the game was found on disk.
    #[serde(rename = "shell-openPath")]
    ShellOpenPath,
    /// Game executable missing; map opened through the shell anyway.
    #[serde(rename = "shell-open")]
    ShellOpen,
    /// Custom URI scheme fallback of the direct-launch strategy.
    #[serde(rename = "protocol")]
    Protocol,
}

/// Result of `acquire_and_launch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquireResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<LaunchMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AcquireResponse {
    pub fn success(method: LaunchMethod) -> Self {
        Self {
            success: true,
            method: Some(method),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            method: None,
            error: Some(message.into()),
        }
    }
}

/// Result of `launch_direct`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectLaunchResponse {
    pub success: bool,
    /// Executable that was spawned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<LaunchMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DirectLaunchResponse {
    pub fn launched(path: impl Into<String>) -> Self {
        Self {
            success: true,
            path: Some(path.into()),
            method: None,
            error: None,
        }
    }

    pub fn protocol() -> Self {
        Self {
            success: true,
            path: None,
            method: Some(LaunchMethod::Protocol),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            method: None,
            error: Some(message.into()),
        }
    }
}
