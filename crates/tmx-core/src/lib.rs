//! tmx-core - Headless library for fetching Trackmania maps and handing them
//! to the game.
//!
//! The [`Orchestrator`] downloads a map from Trackmania Exchange into a local
//! cache, starts the game when it is installed but not yet running, waits
//! for its process to appear, and opens the map with the OS default handler.
//! Progress is streamed to subscribers as [`ProgressEvent`]s. A second
//! strategy launches the game directly with a join argument, falling back to
//! its URI scheme.
//!
//! # Example
//!
//! ```rust,no_run
//! use tmx_core::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> tmx_core::Result<()> {
//!     let orchestrator = Orchestrator::builder().build()?;
//!
//!     let result = orchestrator.acquire_and_launch("123456").await;
//!     println!("success={} method={:?}", result.success, result.method);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handoff;
pub mod logging;
pub mod models;
pub mod network;
pub mod orchestrator;
pub mod platform;
pub mod process;

// Re-export commonly used types
pub use config::{AcquisitionConfig, AppConfig, LaunchConfig, NetworkConfig};
pub use error::{Result, TmxError};
pub use handoff::{Handoff, ShellHandoff};
pub use logging::LogOptions;
pub use models::{
    AcquireResponse, DirectLaunchResponse, LaunchMethod, ProgressEvent, ProgressStatus,
};
pub use network::{DownloadProgress, Fetcher, HttpFetcher};
pub use orchestrator::{Orchestrator, OrchestratorBuilder};
pub use process::{
    CandidateResolver, DetachedLauncher, Launcher, ProcessProbe, Readiness, ReadinessWaiter,
    SystemProcessProbe,
};
