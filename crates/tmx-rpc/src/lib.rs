//! tmx-rpc - JSON-RPC backend for the Trackmania map viewer.
//!
//! Exposes an [`Orchestrator`](tmx_core::Orchestrator) to the Electron main
//! process over HTTP: JSON-RPC commands on `/rpc` and progress events as
//! server-sent events on `/events`.

pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, AppState};
