//! Forwarder for curated variants
//!
//! The caller's envelope is relayed to the canonical endpoint with only the
//! tool name rewritten. A successful canonical response comes back byte for
//! byte; any other status becomes a tool error envelope.

use serde_json::Value;
use tracing::{debug, warn};

use super::helpers::{rpc_error, RpcReply};
use crate::{error::ToolError, state::AppState, upstream::client::error_message};

/// Where the tool name lives in an envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSlot {
    /// `params.name` of a `tools/call`
    ToolCall,
    /// `method` of a legacy direct call
    Method,
}

/// Copy of `envelope` with the tool name replaced by `canonical`
pub fn rewrite(envelope: &Value, slot: NameSlot, canonical: &str) -> Value {
    let mut envelope = envelope.clone();
    match slot {
        NameSlot::ToolCall => {
            if let Some(params) = envelope.get_mut("params").and_then(Value::as_object_mut) {
                params.insert("name".to_string(), Value::String(canonical.to_string()));
            }
        }
        NameSlot::Method => envelope["method"] = Value::String(canonical.to_string()),
    }
    envelope
}

/// POST `envelope` to the canonical endpoint and relay its answer
pub async fn relay(state: &AppState, envelope: &Value, id: Value) -> RpcReply {
    let url = &state.config.canonical_endpoint_url;
    debug!(target_url = %url, "Forwarding envelope");

    let response = state
        .http
        .post(url)
        .timeout(state.config.forward_timeout)
        .json(envelope)
        .send()
        .await;

    let outcome = match response {
        Ok(response) => {
            let status = response.status();
            response.bytes().await.map(|bytes| (status, bytes))
        }
        Err(err) => Err(err),
    };

    let err = match outcome {
        Ok((status, bytes)) if status.is_success() => return RpcReply::Relay(status, bytes),
        Ok((status, bytes)) => ToolError::Upstream(error_message(status.as_u16(), &bytes)),
        Err(err) => ToolError::from(err),
    };
    warn!(error = %err, "Forwarding to canonical endpoint failed");
    RpcReply::ok(rpc_error(id, err.code(), err.to_string()))
}
