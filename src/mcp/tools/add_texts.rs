//! chroma.add_texts tool

use crate::chroma::ChromaClient;
use crate::mcp::error::McpError;
use crate::mcp::protocol::ToolSchema;
use serde::Deserialize;
use serde_json::{json, Map, Value};

pub const TOOL_NAME: &str = "chroma.add_texts";

/// Arguments for inserting documents
///
/// No ids/documents length matching is performed here; mismatched lengths
/// pass through to the backend as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct AddTextsArgs {
    pub collection: String,
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    #[serde(default)]
    pub metadatas: Option<Vec<Map<String, Value>>>,
}

/// Descriptor advertised via tools/list
pub fn schema() -> ToolSchema {
    ToolSchema {
        name: TOOL_NAME.to_string(),
        description: "Add documents to a Chroma collection".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Name of the collection; created if missing"
                },
                "ids": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Document ids"
                },
                "documents": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Document texts"
                },
                "metadatas": {
                    "type": "array",
                    "items": { "type": "object" },
                    "description": "Optional metadata, one object per document"
                }
            },
            "required": ["collection", "ids", "documents"]
        }),
    }
}

/// Insert the documents, creating the collection if needed
///
/// The backend's return value is discarded; success is reported as the
/// literal string "ok".
pub async fn execute(args: AddTextsArgs, client: &dyn ChromaClient) -> Result<Value, McpError> {
    let collection = client.get_or_create_collection(&args.collection).await?;
    collection
        .add(&args.ids, &args.documents, args.metadatas.as_deref())
        .await?;
    Ok(json!("ok"))
}
