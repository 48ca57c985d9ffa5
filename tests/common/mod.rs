//! Shared helpers for integration tests
//!
//! `FakeUpstream` is an in-process axum server on 127.0.0.1:0 that records
//! every request and answers with scripted responses (default `200 {"ok":true}`).

#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use mcp_rest_bridge::config::Config;
use mcp_rest_bridge::router::create_app_router;
use mcp_rest_bridge::state::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt; // for `oneshot`

/// One request as seen by the fake upstream
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub body: Value,
}

impl Recorded {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone)]
struct Scripted {
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
}

#[derive(Clone, Default)]
struct FakeState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    responses: Arc<Mutex<HashMap<(Method, String), Scripted>>>,
}

pub struct FakeUpstream {
    pub addr: SocketAddr,
    state: FakeState,
}

impl FakeUpstream {
    pub async fn spawn() -> Self {
        let state = FakeState::default();
        let app = Router::new().fallback(record).with_state(state.clone());
        let addr = serve(app).await;
        Self { addr, state }
    }

    /// Script a JSON response for `method path`
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_raw(
            method,
            path,
            status,
            "application/json",
            serde_json::to_vec(&body).unwrap(),
        );
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, content_type: &'static str, body: Vec<u8>) {
        self.state.responses.lock().unwrap().insert(
            (method, path.to_string()),
            Scripted {
                status: StatusCode::from_u16(status).unwrap(),
                content_type,
                body,
            },
        );
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

async fn record(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let parsed = reqwest::Url::parse(&format!("http://fake{}", uri)).unwrap();
    let recorded = Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect(),
        authorization: headers
            .get("authorization")
            .map(|v| v.to_str().unwrap().to_string()),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    state.requests.lock().unwrap().push(recorded);

    let scripted = state
        .responses
        .lock()
        .unwrap()
        .get(&(method, uri.path().to_string()))
        .cloned();
    match scripted {
        Some(s) => (s.status, [("content-type", s.content_type)], s.body).into_response(),
        None => (StatusCode::OK, axum::Json(json!({ "ok": true }))).into_response(),
    }
}

/// Serve `app` on an ephemeral local port
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Configuration pointing every upstream at `upstream`
pub fn test_config(upstream: &FakeUpstream) -> Config {
    let mut config = Config::default();
    config.fakturownia.domain = Some("acme".into());
    config.fakturownia.api_token = Some("test-token".into());
    config.fakturownia.base_url_template = format!("http://{}/{{domain}}", upstream.addr);
    config.wordpress.site_url = Some(upstream.url("/shop"));
    config.wordpress.username = Some("admin".into());
    config.wordpress.password = Some("secret".into());
    config.wordpress.consumer_key = Some("ck_test".into());
    config.wordpress.consumer_secret = Some("cs_test".into());
    config
}

pub fn create_app(config: Config) -> Router {
    let state = Arc::new(AppState::new(config).unwrap());
    create_app_router(state)
}

/// App with no credentials and an unreachable upstream
pub fn create_offline_app() -> Router {
    let mut config = Config::default();
    config.canonical_endpoint_url = "http://127.0.0.1:9/.netlify/functions/fakturownia-server".into();
    create_app(config)
}

pub fn endpoint(variant: &str) -> String {
    format!("/.netlify/functions/{}", variant)
}

/// Send a raw request and return status, headers and body bytes
pub async fn send_raw(app: &Router, method: &str, uri: &str, body: Body) -> (StatusCode, HeaderMap, Bytes) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body_bytes)
}

/// Helper function to POST a JSON body and get the response
pub async fn send_json(app: &Router, variant: &str, body: Value) -> (StatusCode, Value) {
    let (status, _, bytes) = send_raw(
        app,
        "POST",
        &endpoint(variant),
        Body::from(serde_json::to_string(&body).unwrap()),
    )
    .await;
    let body: Value = serde_json::from_slice(&bytes).unwrap_or(json!({}));
    (status, body)
}

/// Helper function to send a JSON-RPC request and get the response
pub async fn send_jsonrpc_request(
    app: &Router,
    variant: &str,
    method: &str,
    params: Option<Value>,
    id: i32,
) -> (StatusCode, Value) {
    let request_body = json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": id
    });
    send_json(app, variant, request_body).await
}

/// `tools/call` helper
pub async fn call_tool(app: &Router, variant: &str, name: &str, arguments: Value) -> (StatusCode, Value) {
    send_jsonrpc_request(
        app,
        variant,
        "tools/call",
        Some(json!({ "name": name, "arguments": arguments })),
        1,
    )
    .await
}

/// Parse the pretty-printed JSON inside a `tools/call` text content result
pub fn tool_result(body: &Value) -> Value {
    let text = body["result"]["content"][0]["text"]
        .as_str()
        .unwrap_or_else(|| panic!("no text content in {}", body));
    serde_json::from_str(text).unwrap()
}
