//! MCP tool implementations
//!
//! One module per tool: the typed argument set, the advertised schema,
//! and the backend invocation.

pub mod add_texts;
pub mod query;

use crate::mcp::error::McpError;
use crate::mcp::protocol::ToolSchema;
use serde_json::Value;

pub use add_texts::AddTextsArgs;
pub use query::QueryArgs;

/// Descriptors for tools/list, in their advertised order
pub fn tool_schemas() -> Vec<ToolSchema> {
    vec![query::schema(), add_texts::schema()]
}

/// A tool call decoded into its typed argument set
///
/// Decoding happens at the boundary, before any backend interaction.
/// An unrecognized tool name is not an invocation (the caller falls
/// through to the method-not-found envelope).
#[derive(Debug, Clone)]
pub enum ToolInvocation {
    Query(QueryArgs),
    AddTexts(AddTextsArgs),
}

impl ToolInvocation {
    pub fn decode(name: &str, arguments: Value) -> Result<Option<Self>, McpError> {
        match name {
            query::TOOL_NAME => {
                let args = serde_json::from_value(arguments)
                    .map_err(|e| McpError::InvalidParams(e.to_string()))?;
                Ok(Some(ToolInvocation::Query(args)))
            }
            add_texts::TOOL_NAME => {
                let args = serde_json::from_value(arguments)
                    .map_err(|e| McpError::InvalidParams(e.to_string()))?;
                Ok(Some(ToolInvocation::AddTexts(args)))
            }
            _ => Ok(None),
        }
    }
}
