//! Routing module for the REST bridge

use crate::state::SharedState;
use axum::{body::Body, extract::Request, middleware::Next, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests inside a span carrying a request id
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let request_id = Uuid::new_v4();
        let span = info_span!("request", id = %request_id);
        async move {
            info!(method = %req.method(), uri = %req.uri(), "REQ");
            let res = next.run(req).await;
            if !res.status().is_success() {
                warn!(status = %res.status(), "RES (Error)");
            }
            res
        }
        .instrument(span)
        .await
    });

    // Middleware: CORS (any origin, method and header)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .merge(crate::mcp::routes())
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}
