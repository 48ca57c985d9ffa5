//! MCP REST Bridge Library
//!
//! JSON-RPC/MCP endpoints that translate tool calls into REST calls against
//! the Fakturownia invoicing API and the WordPress/WooCommerce APIs.

// Domain modules
pub mod endpoints;
pub mod mcp;
pub mod upstream;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
