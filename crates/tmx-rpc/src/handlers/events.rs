//! Progress event stream.

use crate::server::AppState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

/// SSE event name the renderer listens for.
pub const PROGRESS_EVENT_NAME: &str = "download-progress";

/// Server-sent stream of every run's progress events.
///
/// A client that falls too far behind skips the events it missed rather
/// than slowing the runs down.
pub async fn handle_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    debug!("Progress subscriber connected");
    let rx = state.orchestrator.subscribe();

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(progress) => {
                    let event = Event::default()
                        .event(PROGRESS_EVENT_NAME)
                        .json_data(&progress);
                    return Some((event, rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Progress subscriber lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
