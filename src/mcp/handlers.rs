//! MCP (Model Context Protocol) route handlers
//!
//! One parameterized handler serves every endpoint variant. The variant
//! record decides the allow-list, the name map and whether accepted calls are
//! dispatched locally or forwarded to the canonical endpoint.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::{
    forward::{self, NameSlot},
    helpers::*,
    models::*,
};
use crate::{
    endpoints::{self, catalog, Endpoint, Mode},
    error::{ToolError, METHOD_NOT_ALLOWED_CODE, PARSE_ERROR_CODE},
    state::{AppState, SharedState},
    upstream,
};

/// Creates routes for every endpoint variant
pub fn routes() -> Router<SharedState> {
    Router::new().route(
        "/.netlify/functions/:variant",
        post(handle_rpc).get(handle_status).fallback(handle_method_not_allowed),
    )
}

/// Endpoint: GET /.netlify/functions/{variant}
/// Static self-description used as a health check.
async fn handle_status(Path(variant): Path<String>) -> impl IntoResponse {
    let Some(endpoint) = endpoints::find(&variant) else {
        return unknown_endpoint(&variant);
    };

    RpcReply::ok(json!({
        "name": endpoint.title,
        "version": SERVER_VERSION,
        "status": "running",
        "focus": endpoint.focus,
        "tools": endpoint.tools().len(),
        "endpoints": {
            "mcp": format!("/.netlify/functions/{} (POST with MCP protocol)", endpoint.slug),
        },
    }))
}

/// Any HTTP verb other than GET, POST or OPTIONS
async fn handle_method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(rpc_error(Value::Null, METHOD_NOT_ALLOWED_CODE, "Method not allowed")),
    )
}

/// Endpoint: POST /.netlify/functions/{variant}
/// Handles the Model Context Protocol communication for one variant.
async fn handle_rpc(
    State(state): State<SharedState>,
    Path(variant): Path<String>,
    body: Bytes,
) -> impl IntoResponse {
    let Some(endpoint) = endpoints::find(&variant) else {
        return unknown_endpoint(&variant);
    };

    let envelope: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!(endpoint = endpoint.slug, error = %e, "JSON parse error");
            return RpcReply::Json(
                StatusCode::BAD_REQUEST,
                rpc_error_with_data(Value::Null, PARSE_ERROR_CODE, "Parse error", json!(e.to_string())),
            );
        }
    };

    handle_envelope(&state, endpoint, envelope).await
}

fn unknown_endpoint(variant: &str) -> RpcReply {
    RpcReply::Json(
        StatusCode::NOT_FOUND,
        rpc_error(
            Value::Null,
            METHOD_NOT_ALLOWED_CODE,
            format!("Unknown endpoint: {}", variant),
        ),
    )
}

fn invalid_request(id: Value, message: &str) -> RpcReply {
    RpcReply::Json(
        StatusCode::BAD_REQUEST,
        rpc_error(id, METHOD_NOT_ALLOWED_CODE, message),
    )
}

/// Runs the protocol state machine over one parsed envelope
pub async fn handle_envelope(state: &AppState, endpoint: &Endpoint, envelope: Value) -> RpcReply {
    let id = envelope.get("id").cloned().unwrap_or(Value::Null);

    if !envelope.is_object() {
        return invalid_request(Value::Null, "Invalid Request");
    }
    if envelope.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return invalid_request(id, "Invalid JSON-RPC version");
    }
    let req: JsonRpcRequest = match serde_json::from_value(envelope.clone()) {
        Ok(req) => req,
        Err(_) => return invalid_request(id, "Invalid Request"),
    };

    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    info!(endpoint = endpoint.slug, method = method_name, "MCP call");

    // Dispatch Method
    match method_name {
        METHOD_INITIALIZE => RpcReply::ok(rpc_success(id, handle_initialize(endpoint))),
        METHOD_INITIALIZED | METHOD_PING => RpcReply::ok(rpc_success(id, json!({}))),
        METHOD_TOOLS_LIST => RpcReply::ok(rpc_success(id, catalog::tool_list(endpoint))),
        METHOD_TOOLS_CALL => {
            let call: ToolCallParams = serde_json::from_value(params).unwrap_or_default();
            let Some(tool_name) = call.name else {
                let err = ToolError::missing("Tool name", None);
                return RpcReply::ok(rpc_error(id, err.code(), err.to_string()));
            };
            handle_tool_call(state, endpoint, &envelope, id, &tool_name, call.arguments, NameSlot::ToolCall)
                .await
        }
        // Legacy direct call: the method is the tool name, params are its arguments
        _ => handle_tool_call(state, endpoint, &envelope, id, method_name, params, NameSlot::Method).await,
    }
}

/// Handles `initialize` request (Handshake).
fn handle_initialize(endpoint: &Endpoint) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": true }
        },
        "serverInfo": {
            "name": endpoint.server_name,
            "version": SERVER_VERSION
        }
    })
}

/// Scope check, name remap, then local dispatch or forward
async fn handle_tool_call(
    state: &AppState,
    endpoint: &Endpoint,
    envelope: &Value,
    id: Value,
    tool_name: &str,
    arguments: Value,
    slot: NameSlot,
) -> RpcReply {
    let allow_list = endpoint.allow_list();
    if let Err(err) = allow_list.check(tool_name, endpoint.slug) {
        let err = match slot {
            NameSlot::ToolCall => err,
            NameSlot::Method => ToolError::UnknownMethod(tool_name.to_string()),
        };
        warn!(endpoint = endpoint.slug, tool = tool_name, "Rejected out-of-scope call");
        return RpcReply::ok(rpc_error(id, err.code(), err.to_string()));
    }

    let canonical = endpoint.name_map().resolve(tool_name).to_string();
    info!(endpoint = endpoint.slug, tool = tool_name, canonical = %canonical, "Tool call");

    if endpoint.mode == Mode::Forward {
        let forwarded = forward::rewrite(envelope, slot, &canonical);
        return forward::relay(state, &forwarded, id).await;
    }

    let outcome = match arguments_map(&canonical, arguments) {
        Ok(args) => upstream::call(state, endpoint.backend, &canonical, &args).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(result) => {
            let result = match slot {
                NameSlot::ToolCall => text_content(&result),
                NameSlot::Method => result,
            };
            RpcReply::ok(rpc_success(id, result))
        }
        Err(err) => {
            warn!(endpoint = endpoint.slug, tool = %canonical, error = %err, "Tool call failed");
            RpcReply::ok(rpc_error(id, err.code(), err.to_string()))
        }
    }
}
