//! Model Context Protocol (MCP) Module
//!
//! This module contains the JSON-RPC envelope handling shared by every
//! endpoint variant:
//! - Protocol models (JsonRpcRequest, ToolCallParams, constants)
//! - RPC helpers (success/error envelopes, text content, reply type)
//! - Handlers (initialize, tools/list, tools/call, legacy direct calls)
//! - Forwarding to the canonical endpoint

pub mod forward;
pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types and functions
pub use handlers::routes;
