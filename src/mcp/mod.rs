//! MCP (Model Context Protocol) adapter
//!
//! A JSON-RPC 2.0 compliant MCP dispatcher exposing Chroma collections
//! as MCP tools. Depends on chroma/; never imports from http/.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod tools;

pub use error::McpError;
pub use handlers::{McpResponse, ProtocolHandlers};
