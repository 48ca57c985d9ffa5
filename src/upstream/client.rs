//! Upstream HTTP client factory
//!
//! Wraps the shared [`reqwest::Client`] with one call's resolved target.
//! Non-2xx responses are unwrapped into [`ToolError::Upstream`] here so the
//! dispatcher only ever sees successful bodies.

use std::time::Duration;

use axum::body::Bytes;
use reqwest::{Method, Url};
use serde_json::Value;

use super::credentials::{UpstreamAuth, UpstreamTarget};
use crate::error::{ToolError, ToolResult};

pub struct UpstreamClient<'a> {
    http: &'a reqwest::Client,
    target: UpstreamTarget,
    timeout: Duration,
}

impl<'a> UpstreamClient<'a> {
    pub fn new(http: &'a reqwest::Client, target: UpstreamTarget, timeout: Duration) -> Self {
        Self {
            http,
            target,
            timeout,
        }
    }

    /// Base URL joined with already-rendered path segments (each percent-encoded)
    pub fn url(&self, segments: &[String]) -> ToolResult<Url> {
        let mut url = Url::parse(&self.target.base_url).map_err(|e| {
            ToolError::Configuration(format!("Invalid upstream base URL: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| ToolError::Configuration("Upstream base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send one request and return the body of a successful response
    pub async fn send(
        &self,
        method: Method,
        segments: &[String],
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> ToolResult<Bytes> {
        let url = self.url(segments)?;
        let mut request = self.http.request(method, url).timeout(self.timeout);

        request = match &self.target.auth {
            UpstreamAuth::QueryToken { token } => request.query(&[("api_token", token)]),
            UpstreamAuth::Basic { username, password } => request.basic_auth(username, Some(password)),
            UpstreamAuth::ConsumerKey { key, secret } => {
                request.query(&[("consumer_key", key), ("consumer_secret", secret)])
            }
        };
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            Ok(bytes)
        } else {
            Err(ToolError::Upstream(error_message(status.as_u16(), &bytes)))
        }
    }
}

/// Message for a non-2xx upstream response
///
/// Uses the body's `message` when present (a string, or the first string
/// nested inside an object or array), else a generic status line.
pub fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(first_string))
        .unwrap_or_else(|| format!("Request failed with status code {}", status))
}

fn first_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_string),
        Value::Object(map) => map.values().find_map(first_string),
        _ => None,
    }
}

/// Interpret a successful body: empty is `null`, non-JSON is returned as text
pub fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
