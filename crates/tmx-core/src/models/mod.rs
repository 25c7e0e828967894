//! Data models shared with the frontend.
//!
//! Field names serialize in the shape the renderer already consumes
//! (`mapId`, `status`, `progress`, ...).

mod progress;
mod responses;

pub use progress::*;
pub use responses::*;
