//! MCP Protocol Models and Constants
//!
//! This module contains the data structures and constants of the JSON-RPC
//! envelope the endpoints speak.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ToolError;

// =============================================================================
// MCP Constants
// =============================================================================

/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2024-11-05";
/// The only accepted `jsonrpc` value
pub const JSONRPC_VERSION: &str = "2.0";
/// Version reported in `serverInfo` and the status check
pub const SERVER_VERSION: &str = "1.0.0";

pub const METHOD_INITIALIZE: &str = "initialize";
pub const METHOD_INITIALIZED: &str = "notifications/initialized";
pub const METHOD_PING: &str = "ping";
pub const METHOD_TOOLS_LIST: &str = "tools/list";
pub const METHOD_TOOLS_CALL: &str = "tools/call";

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (must be "2.0")
    pub jsonrpc: Option<String>,

    /// Method name to invoke
    pub method: String,

    /// Parameters for the method
    pub params: Option<Value>,

    /// Request identifier
    pub id: Option<Value>,
}

/// `params` of a `tools/call` request
#[derive(Debug, Default, Deserialize)]
pub struct ToolCallParams {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub arguments: Value,
}

/// Tool arguments as a map; `null` or absent means no arguments
pub fn arguments_map(tool: &str, arguments: Value) -> Result<Map<String, Value>, ToolError> {
    match arguments {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        _ => Err(ToolError::InvalidArgument {
            operation: tool.to_string(),
            field: "arguments".to_string(),
            reason: "expected an object".to_string(),
        }),
    }
}
