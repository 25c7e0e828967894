//! JSON-RPC request handlers, split by domain.

mod events;
mod maps;
mod process;

pub use events::handle_events;

use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tmx_core::TmxError;
use tracing::{debug, error, warn};

/// JSON-RPC code for an unknown method.
pub const METHOD_NOT_FOUND: i32 = -32601;

// ============================================================================
// JSON-RPC types
// ============================================================================

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
            id,
        }
    }
}

// ============================================================================
// Parameter extraction helpers
// ============================================================================

/// Extract an optional string parameter, supporting both snake_case and camelCase.
pub(crate) fn get_str_param<'a>(params: &'a Value, snake: &str, camel: &str) -> Option<&'a str> {
    params
        .get(snake)
        .or_else(|| params.get(camel))
        .and_then(|v| v.as_str())
}

/// Extract a required string parameter or return an error.
pub(crate) fn require_str_param(
    params: &Value,
    snake: &str,
    camel: &str,
) -> tmx_core::Result<String> {
    get_str_param(params, snake, camel)
        .map(String::from)
        .ok_or_else(|| TmxError::InvalidParams {
            message: format!("Missing required parameter: {}", snake),
        })
}

/// Extract and validate the `map_id` parameter.
///
/// Map ids become a file name and a URL path segment, so only ASCII
/// alphanumerics, `-` and `_` are accepted.
pub(crate) fn require_map_id(params: &Value) -> tmx_core::Result<String> {
    let map_id = require_str_param(params, "map_id", "mapId")?;
    validate_map_id(&map_id)?;
    Ok(map_id)
}

pub(crate) fn validate_map_id(map_id: &str) -> tmx_core::Result<()> {
    if map_id.is_empty() {
        return Err(TmxError::InvalidParams {
            message: "map_id must not be empty".to_string(),
        });
    }
    if !map_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TmxError::InvalidParams {
            message: format!("Invalid map_id: {:?}", map_id),
        });
    }
    Ok(())
}

// ============================================================================
// HTTP endpoints
// ============================================================================

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Main JSON-RPC handler.
pub async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    let method = &request.method;
    let params = request.params.unwrap_or(Value::Object(Default::default()));
    let id = request.id.clone();

    debug!("RPC call: {}({:?})", method, params);

    // Handle built-in methods
    if method == "health_check" {
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::success(id, json!({"status": "ok"}))),
        );
    }

    if method == "shutdown" {
        // The parent process owns our lifetime and terminates us itself
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::success(
                id,
                json!({"status": "shutting_down"}),
            )),
        );
    }

    let Some(result) = dispatch_method(&state, method, &params).await else {
        warn!("Method not found: {}", method);
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            )),
        );
    };

    match result {
        Ok(value) => (StatusCode::OK, Json(JsonRpcResponse::success(id, value))),
        Err(e) => {
            error!("RPC error for {}: {}", method, e);
            let code = e.to_rpc_error_code();
            (
                StatusCode::OK,
                Json(JsonRpcResponse::error(id, code, e.to_string())),
            )
        }
    }
}

// ============================================================================
// Method dispatcher
// ============================================================================

/// Dispatch a method call to the appropriate domain handler.
///
/// Returns `None` for an unknown method.
async fn dispatch_method(
    state: &AppState,
    method: &str,
    params: &Value,
) -> Option<tmx_core::Result<Value>> {
    let result = match method {
        // Maps
        "acquire_and_launch" => maps::acquire_and_launch(state, params).await,
        "launch_direct" => maps::launch_direct(state, params).await,
        "is_map_cached" => maps::is_map_cached(state, params).await,

        // Process
        "is_app_running" => process::is_app_running(state, params).await,

        _ => return None,
    };
    Some(result)
}
