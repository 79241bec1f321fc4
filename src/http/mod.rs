//! HTTP transport adapter
//!
//! Depends on mcp/ for the dispatcher. Owns everything transport-shaped:
//! routing, status mapping, request logging, CORS.

pub mod handlers;
pub mod middleware;

use crate::mcp::handlers::ProtocolHandlers;
use axum::{routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use handlers::{mcp_handler, sse_handler};

/// Build the MCP router
///
/// Both path aliases accept POST (JSON-RPC) and GET (SSE placeholder).
pub fn router(handlers: Arc<ProtocolHandlers>) -> Router {
    Router::new()
        .route("/", post(mcp_handler).get(sse_handler))
        .route("/mcp", post(mcp_handler).get(sse_handler))
        .layer(axum::middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        .with_state(handlers)
}
