//! Map acquisition handlers.

use super::require_map_id;
use crate::server::AppState;
use serde_json::Value;
use tmx_core::TmxError;
use tracing::{error, info};

/// Runs on its own task so a disconnecting client cannot cut a run short.
pub async fn acquire_and_launch(state: &AppState, params: &Value) -> tmx_core::Result<Value> {
    let map_id = require_map_id(params)?;
    info!("acquire_and_launch: map {}", map_id);

    let orchestrator = state.orchestrator.clone();
    let run = tokio::spawn(async move { orchestrator.acquire_and_launch(&map_id).await });
    let response = run.await.map_err(|e| {
        error!("Acquisition task failed: {}", e);
        TmxError::Other(format!("Acquisition task failed: {}", e))
    })?;

    Ok(serde_json::to_value(response)?)
}

pub async fn launch_direct(state: &AppState, params: &Value) -> tmx_core::Result<Value> {
    let map_id = require_map_id(params)?;
    info!("launch_direct: map {}", map_id);
    let response = state.orchestrator.launch_direct(&map_id);
    Ok(serde_json::to_value(response)?)
}

pub async fn is_map_cached(state: &AppState, params: &Value) -> tmx_core::Result<Value> {
    let map_id = require_map_id(params)?;
    Ok(Value::Bool(state.orchestrator.is_map_cached(&map_id)))
}
