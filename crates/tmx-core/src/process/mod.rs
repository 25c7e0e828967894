//! Process management module.
//!
//! Handles detection and launching of the game process, and waiting for it
//! to show up in the process table.
//!
//! # Detection Strategy
//!
//! Detection is a plain process table scan by executable name. Readiness is
//! established by polling that scan at a fixed interval; no OS-level
//! process-creation notification is used.
//!
//! # Example
//!
//! ```rust,no_run
//! use tmx_core::process::{ProcessProbe, SystemProcessProbe};
//!
//! let probe = SystemProcessProbe;
//! if probe.is_running("Trackmania.exe") {
//!     println!("Trackmania is already running");
//! }
//! ```

mod candidates;
mod detection;
mod launcher;
mod readiness;

pub use candidates::{default_candidates, CandidateResolver, FixedPath, LocalAppDataPath};
pub use detection::{ProcessProbe, SystemProcessProbe};
pub use launcher::{DetachedLauncher, Launcher};
pub use readiness::{Readiness, ReadinessWaiter};
