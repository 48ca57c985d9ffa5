//! MCP Protocol Helpers
//!
//! This module contains helper functions for JSON-RPC communication and the
//! reply type every endpoint handler returns.

use axum::{
    body::Bytes,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back.
/// * `result` – The payload representing the successful outcome.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier (or `null` if unavailable).
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not allowed).
/// * `message` – Human-readable description of the error.
pub fn rpc_error(id: Value, code: i32, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}

/// Same as [`rpc_error`] with an `error.data` member
pub fn rpc_error_with_data(id: Value, code: i32, message: impl Into<String>, data: Value) -> Value {
    let mut body = rpc_error(id, code, message);
    body["error"]["data"] = data;
    body
}

/// Wraps a tool result as MCP text content (pretty-printed JSON)
pub fn text_content(result: &Value) -> Value {
    let text = serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string());
    json!({
        "content": [{ "type": "text", "text": text }]
    })
}

/// What an endpoint sends back
#[derive(Debug)]
pub enum RpcReply {
    /// A locally built envelope
    Json(StatusCode, Value),
    /// Bytes relayed unchanged from the canonical endpoint
    Relay(StatusCode, Bytes),
}

impl RpcReply {
    pub fn ok(body: Value) -> Self {
        RpcReply::Json(StatusCode::OK, body)
    }
}

impl IntoResponse for RpcReply {
    fn into_response(self) -> Response {
        match self {
            RpcReply::Json(status, body) => (status, Json(body)).into_response(),
            RpcReply::Relay(status, bytes) => {
                (status, [(header::CONTENT_TYPE, "application/json")], bytes).into_response()
            }
        }
    }
}
