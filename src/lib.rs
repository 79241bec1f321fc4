//! Chroma MCP HTTP Server
//!
//! A protocol adapter exposing a ChromaDB vector-database backend through
//! the Model Context Protocol (JSON-RPC 2.0 over HTTP POST).
//!
//! # Architecture
//!
//! - **mcp**: the dispatcher and its protocol contracts
//!   - protocol (JSON-RPC envelopes, MCP payloads)
//!   - handlers (method routing, tool invocation)
//!   - tools (typed argument sets per tool)
//!
//! - **chroma**: backend collaborator (trait seam + REST client)
//!
//! - **http**: transport adapter (axum routing, status mapping, SSE)
//!
//! - **config**: environment-driven settings with defaults
//!
//! The dispatcher is stateless across requests and treats the backend as
//! an opaque capability: argument validation happens before any backend
//! call, backend faults propagate untranslated.

pub mod chroma;
pub mod config;
pub mod http;
pub mod mcp;

pub use chroma::{ChromaClient, ChromaCollection, ChromaError, ChromaProvider};
pub use config::Config;
pub use mcp::{McpError, McpResponse, ProtocolHandlers};
