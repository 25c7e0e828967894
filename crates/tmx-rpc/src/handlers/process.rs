//! Game process handlers.

use crate::server::AppState;
use serde_json::Value;

pub async fn is_app_running(state: &AppState, _params: &Value) -> tmx_core::Result<Value> {
    let running = state.orchestrator.is_app_running().await;
    Ok(serde_json::to_value(running)?)
}
