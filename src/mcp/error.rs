//! MCP-specific error types

use crate::chroma::ChromaError;
use thiserror::Error;

/// Faults that escape the dispatcher
///
/// Unknown methods and unknown tool names are not errors at this level;
/// they are -32601 envelopes inside a normal response. What remains is
/// either a caller-input fault (rejected before any backend interaction)
/// or a backend fault propagated untranslated.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Chroma(#[from] ChromaError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// True when the caller's input did not conform to the schema
    ///
    /// The transport maps these to a client-error status; everything else
    /// is a server-error status.
    pub fn is_client_error(&self) -> bool {
        matches!(self, McpError::InvalidParams(_))
    }
}
