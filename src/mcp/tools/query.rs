//! chroma.query tool

use crate::chroma::ChromaClient;
use crate::mcp::error::McpError;
use crate::mcp::protocol::ToolSchema;
use serde::Deserialize;
use serde_json::{json, Value};

pub const TOOL_NAME: &str = "chroma.query";

fn default_n_results() -> usize {
    5
}

/// Arguments for a similarity query
///
/// `query_texts` may be empty; `n_results` has no enforced upper bound.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryArgs {
    pub collection: String,
    pub query_texts: Vec<String>,
    #[serde(default = "default_n_results")]
    pub n_results: usize,
}

/// Descriptor advertised via tools/list
pub fn schema() -> ToolSchema {
    ToolSchema {
        name: TOOL_NAME.to_string(),
        description: "Query documents from a Chroma collection".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "collection": {
                    "type": "string",
                    "description": "Name of the collection to query"
                },
                "query_texts": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Texts to embed and match against the collection"
                },
                "n_results": {
                    "type": "integer",
                    "description": "Number of results per query text",
                    "default": 5
                }
            },
            "required": ["collection", "query_texts"]
        }),
    }
}

/// Run the query against the backend
///
/// The collection must already exist; the backend's payload (parallel
/// arrays of ids/documents/metadatas/distances per query text) is returned
/// verbatim.
pub async fn execute(args: QueryArgs, client: &dyn ChromaClient) -> Result<Value, McpError> {
    let collection = client.get_collection(&args.collection).await?;
    let result = collection.query(&args.query_texts, args.n_results).await?;
    Ok(result)
}
