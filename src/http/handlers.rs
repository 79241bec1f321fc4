//! HTTP request handlers for the MCP endpoints
//!
//! POST / and /mcp carry the JSON-RPC traffic; GET on the same paths
//! serves the SSE placeholder stream.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::mcp::error::McpError;
use crate::mcp::handlers::{McpResponse, ProtocolHandlers};
use crate::mcp::protocol::JsonRpcRequest;

/// Transport-level status mapping for dispatcher faults
///
/// Caller-input faults are the client's problem; everything else
/// (backend, serialization) is a server fault. Recognized-method outcomes
/// never take this path.
impl IntoResponse for McpError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// MCP JSON-RPC handler
///
/// Every syntactically valid request to a recognized method yields HTTP
/// 200, including the -32601 error envelopes.
pub async fn mcp_handler(
    State(handlers): State<Arc<ProtocolHandlers>>,
    Json(request): Json<JsonRpcRequest>,
) -> Result<Json<serde_json::Value>, McpError> {
    match handlers.dispatch(request).await? {
        McpResponse::Rpc(response) => Ok(Json(serde_json::to_value(response)?)),
        McpResponse::Empty => Ok(Json(json!({}))),
    }
}

/// SSE placeholder: a single static endpoint event
pub async fn sse_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        "event: endpoint\ndata: {}\n\n",
    )
}
