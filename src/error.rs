//! Tool-level error types
//!
//! Every failure that can happen between accepting a `tools/call` and
//! producing its result is a [`ToolError`]. The envelope layer turns all of
//! them into a JSON-RPC error with [`TOOL_ERROR_CODE`] inside an HTTP 200.

/// JSON-RPC code for every tool, upstream and configuration failure
pub const TOOL_ERROR_CODE: i32 = -32000;
/// JSON-RPC code for malformed request bodies
pub const PARSE_ERROR_CODE: i32 = -32700;
/// JSON-RPC code for protocol-level rejections (bad version, verb, endpoint)
pub const METHOD_NOT_ALLOWED_CODE: i32 = -32601;

/// Errors raised while validating, resolving or executing a tool call
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// A credential is missing from both the request and the process defaults
    #[error("{0}")]
    Configuration(String),

    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// Required argument missing; the message is fully formed by the caller
    #[error("{0}")]
    MissingField(String),

    #[error("Filter '{key}' is not supported by {operation}")]
    UnsupportedFilter { operation: String, key: String },

    #[error("Invalid argument '{field}' for {operation}: {reason}")]
    InvalidArgument {
        operation: String,
        field: String,
        reason: String,
    },

    #[error("Method {tool} not allowed in {endpoint} endpoint. Available: {}", .allowed.join(", "))]
    OutOfScope {
        tool: String,
        endpoint: String,
        allowed: Vec<String>,
    },

    /// The remote REST call (or forward relay) failed
    #[error("API error: {0}")]
    Upstream(String),
}

impl ToolError {
    /// JSON-RPC error code for this failure
    pub fn code(&self) -> i32 {
        TOOL_ERROR_CODE
    }

    /// Builds the "X is required" family of validation messages
    pub fn missing(label: &str, purpose: Option<&str>) -> Self {
        match purpose {
            Some(purpose) => ToolError::MissingField(format!("{} is required for {}", label, purpose)),
            None => ToolError::MissingField(format!("{} is required", label)),
        }
    }

    /// "A and b are required" when any of several jointly required fields is absent
    pub fn missing_together(labels: &[&str], purpose: Option<&str>) -> Self {
        let Some((last, rest)) = labels.split_last() else {
            return ToolError::missing("Arguments", purpose);
        };
        if rest.is_empty() {
            return ToolError::missing(last, purpose);
        }
        let names: Vec<String> = rest
            .iter()
            .enumerate()
            .map(|(i, label)| if i == 0 { label.to_string() } else { lower_first(label) })
            .collect();
        let joined = format!("{} and {}", names.join(", "), lower_first(last));
        match purpose {
            Some(purpose) => ToolError::MissingField(format!("{} are required for {}", joined, purpose)),
            None => ToolError::MissingField(format!("{} are required", joined)),
        }
    }
}

fn lower_first(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<reqwest::Error> for ToolError {
    fn from(err: reqwest::Error) -> Self {
        // The URL carries query-string credentials; never surface it.
        ToolError::Upstream(err.without_url().to_string())
    }
}

/// Result type for tool execution
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_messages() {
        assert_eq!(
            ToolError::missing("Client ID", None).to_string(),
            "Client ID is required"
        );
        assert_eq!(
            ToolError::missing("Client ID", Some("updating a client")).to_string(),
            "Client ID is required for updating a client"
        );
    }

    #[test]
    fn jointly_required_fields_are_named_together() {
        assert_eq!(
            ToolError::missing_together(&["Title", "Content"], Some("creating a post")).to_string(),
            "Title and content are required for creating a post"
        );
        assert_eq!(
            ToolError::missing_together(&["Title"], None).to_string(),
            "Title is required"
        );
    }

    #[test]
    fn out_of_scope_lists_allowed_tools() {
        let err = ToolError::OutOfScope {
            tool: "fakt_delete_invoice".into(),
            endpoint: "fakturownia-clients".into(),
            allowed: vec!["fakt_get_clients".into(), "fakt_get_client".into()],
        };
        assert_eq!(
            err.to_string(),
            "Method fakt_delete_invoice not allowed in fakturownia-clients endpoint. \
             Available: fakt_get_clients, fakt_get_client"
        );
        assert_eq!(err.code(), -32000);
    }
}
