//! Tool catalog returned by `tools/list`

use serde_json::{json, Value};

use super::Endpoint;

/// `{"tools": [{name, description, inputSchema}, ...]}` for `endpoint`
pub fn tool_list(endpoint: &Endpoint) -> Value {
    let tools: Vec<Value> = endpoint
        .tools()
        .into_iter()
        .map(|(name, op)| {
            json!({
                "name": name,
                "description": op.summary,
                "inputSchema": op.input_schema(),
            })
        })
        .collect();

    json!({ "tools": tools })
}
