//! Operation descriptors
//!
//! Each tool is a static [`Operation`]: verb, path template, the arguments it
//! reads and where they go. The dispatcher interprets these; nothing here
//! performs I/O.

use serde_json::{json, Value};

use super::credentials::credential_args;

/// Which upstream API family (and therefore which auth scheme) an operation uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Invoicing API, `api_token` query parameter
    Fakturownia,
    /// WordPress core REST API, HTTP Basic
    WordPress,
    /// WooCommerce REST API, consumer key/secret query parameters
    WooCommerce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_method(self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Patch => reqwest::Method::PATCH,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }
}

/// JSON type of an argument, used for schema generation and query rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Number,
    Text,
    Boolean,
    Object,
    Any,
}

impl ArgKind {
    pub fn schema(self) -> Value {
        match self {
            ArgKind::Number => json!({ "type": "number" }),
            ArgKind::Text => json!({ "type": "string" }),
            ArgKind::Boolean => json!({ "type": "boolean" }),
            ArgKind::Object => json!({ "type": "object" }),
            ArgKind::Any => json!({}),
        }
    }
}

/// Value used when the caller omits an optional argument
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    Int(i64),
    Text(&'static str),
    Bool(bool),
}

impl DefaultValue {
    pub fn to_json(self) -> Value {
        match self {
            DefaultValue::Int(n) => json!(n),
            DefaultValue::Text(s) => json!(s),
            DefaultValue::Bool(b) => json!(b),
        }
    }
}

/// An identifier substituted into the path template (`{arg}`)
#[derive(Debug, Clone, Copy)]
pub struct PathId {
    pub arg: &'static str,
    pub label: &'static str,
    pub kind: ArgKind,
}

impl PathId {
    pub const fn number(arg: &'static str, label: &'static str) -> Self {
        Self {
            arg,
            label,
            kind: ArgKind::Number,
        }
    }

    pub const fn text(arg: &'static str, label: &'static str) -> Self {
        Self {
            arg,
            label,
            kind: ArgKind::Text,
        }
    }
}

/// A scalar argument rendered into the query string or a body field
#[derive(Debug, Clone, Copy)]
pub struct Param {
    /// Argument name as the caller sends it (camelCase)
    pub arg: &'static str,
    /// Name on the wire (snake_case upstream key)
    pub key: &'static str,
    pub kind: ArgKind,
    pub default: Option<DefaultValue>,
    /// Human label when the argument is required
    pub required: Option<&'static str>,
}

impl Param {
    pub const fn new(arg: &'static str, key: &'static str, kind: ArgKind) -> Self {
        Self {
            arg,
            key,
            kind,
            default: None,
            required: None,
        }
    }

    pub const fn or(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn required(mut self, label: &'static str) -> Self {
        self.required = Some(label);
        self
    }
}

/// Request body shape
#[derive(Debug, Clone, Copy)]
pub enum Body {
    None,
    /// Payload argument nested under a resource key, e.g. `{"invoice": invoiceData}`
    Wrapped {
        arg: &'static str,
        label: &'static str,
        key: &'static str,
    },
    /// Payload argument sent as the body itself
    Raw {
        arg: &'static str,
        label: &'static str,
    },
    /// Individual scalar arguments collected into an object
    Fields(&'static [Param]),
}

/// How the key-value annotations of a parent entity are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaShape {
    /// `[{"id": 1, "key": "k", "value": v}, ...]` under `field`
    List { field: &'static str },
    /// `{"k": v, ...}` under `field`
    Map { field: &'static str },
}

impl MetaShape {
    pub fn field(self) -> &'static str {
        match self {
            MetaShape::List { field } | MetaShape::Map { field } => field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAction {
    Read,
    Upsert,
    Remove,
}

/// Read-modify-write meta operation against the parent at the operation path
#[derive(Debug, Clone, Copy)]
pub struct MetaSpec {
    pub action: MetaAction,
    pub shape: MetaShape,
    /// Verb used to write the collection back
    pub write: Verb,
}

#[derive(Debug, Clone, Copy)]
pub enum ResponseKind {
    Json,
    /// Raw bytes returned base64-encoded with the declared content type
    Binary { content_type: &'static str },
    Meta(MetaSpec),
}

/// Arguments used by meta operations
pub const META_KEY_ARG: &str = "metaKey";
pub const META_VALUE_ARG: &str = "metaValue";
/// Argument holding the caller's free-form filter map
pub const FILTERS_ARG: &str = "filters";

/// One entry of the method dispatch table
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub family: Family,
    pub verb: Verb,
    pub path: &'static str,
    pub summary: &'static str,
    pub ids: &'static [PathId],
    pub body: Body,
    pub query: &'static [Param],
    pub filters: &'static [&'static str],
    pub response: ResponseKind,
    /// Completes "X is required for ..." messages, e.g. "updating a client"
    pub purpose: Option<&'static str>,
}

impl Operation {
    pub const fn new(
        name: &'static str,
        family: Family,
        verb: Verb,
        path: &'static str,
        summary: &'static str,
    ) -> Self {
        Self {
            name,
            family,
            verb,
            path,
            summary,
            ids: &[],
            body: Body::None,
            query: &[],
            filters: &[],
            response: ResponseKind::Json,
            purpose: None,
        }
    }

    pub const fn ids(mut self, ids: &'static [PathId]) -> Self {
        self.ids = ids;
        self
    }

    pub const fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    pub const fn query(mut self, query: &'static [Param]) -> Self {
        self.query = query;
        self
    }

    pub const fn filters(mut self, filters: &'static [&'static str]) -> Self {
        self.filters = filters;
        self
    }

    pub const fn response(mut self, response: ResponseKind) -> Self {
        self.response = response;
        self
    }

    pub const fn purpose(mut self, purpose: &'static str) -> Self {
        self.purpose = Some(purpose);
        self
    }

    pub const fn meta(self, action: MetaAction, shape: MetaShape, write: Verb) -> Self {
        self.response(ResponseKind::Meta(MetaSpec {
            action,
            shape,
            write,
        }))
    }

    /// JSON input schema advertised in `tools/list`
    ///
    /// Credential overrides are listed but never required.
    pub fn input_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required: Vec<&str> = Vec::new();

        for id in self.ids {
            properties.insert(id.arg.to_string(), id.kind.schema());
            required.push(id.arg);
        }

        for param in self.query {
            properties.insert(param.arg.to_string(), param.kind.schema());
            if param.required.is_some() {
                required.push(param.arg);
            }
        }

        match self.body {
            Body::None => {}
            Body::Wrapped { arg, .. } | Body::Raw { arg, .. } => {
                properties.insert(arg.to_string(), ArgKind::Object.schema());
                required.push(arg);
            }
            Body::Fields(fields) => {
                for field in fields {
                    properties.insert(field.arg.to_string(), field.kind.schema());
                    if field.required.is_some() {
                        required.push(field.arg);
                    }
                }
            }
        }

        if let ResponseKind::Meta(spec) = self.response {
            properties.insert(META_KEY_ARG.to_string(), ArgKind::Text.schema());
            match spec.action {
                MetaAction::Read => {}
                MetaAction::Upsert => {
                    properties.insert(META_VALUE_ARG.to_string(), ArgKind::Any.schema());
                    required.push(META_KEY_ARG);
                    required.push(META_VALUE_ARG);
                }
                MetaAction::Remove => required.push(META_KEY_ARG),
            }
        }

        if !self.filters.is_empty() {
            properties.insert(
                FILTERS_ARG.to_string(),
                json!({
                    "type": "object",
                    "description": format!("Supported keys: {}", self.filters.join(", ")),
                }),
            );
        }

        for (arg, description) in credential_args(self.family) {
            properties.insert(
                arg.to_string(),
                json!({ "type": "string", "description": description }),
            );
        }

        let mut schema = json!({ "type": "object", "properties": properties });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }
}
