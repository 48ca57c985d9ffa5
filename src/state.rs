//! Application state shared by every request

use std::sync::Arc;

use crate::config::Config;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Immutable configuration plus the pooled HTTP client used for upstream and
/// forward calls
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }
}
