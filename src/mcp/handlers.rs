//! MCP protocol method dispatch
//!
//! Maps one decoded JSON-RPC request to exactly one reply. Protocol-level
//! problems (unknown method, unknown tool) become -32601 envelopes inside
//! a normal reply; caller-input and backend faults escape as `McpError`
//! for the transport to classify.

use crate::chroma::ChromaProvider;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, McpMethod, ToolCallParams,
};
use crate::mcp::tools::{self, ToolInvocation};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Reply produced by the dispatcher
///
/// `notifications/initialized` is acknowledged with a bare empty object,
/// not a JSON-RPC envelope.
#[derive(Debug)]
pub enum McpResponse {
    Rpc(JsonRpcResponse),
    Empty,
}

pub struct ProtocolHandlers {
    provider: Arc<dyn ChromaProvider>,
}

impl ProtocolHandlers {
    pub fn new(provider: Arc<dyn ChromaProvider>) -> Self {
        Self { provider }
    }

    /// Route a request by method name
    ///
    /// Stateless across requests; a fresh backend handle is obtained from
    /// the provider per tool call.
    pub async fn dispatch(&self, request: JsonRpcRequest) -> Result<McpResponse, McpError> {
        debug!(method = %request.method, "dispatching");

        match McpMethod::parse(&request.method) {
            McpMethod::Initialize => Ok(McpResponse::Rpc(self.handle_initialize(request)?)),
            McpMethod::Initialized => Ok(self.handle_initialized()),
            McpMethod::ToolsList => Ok(McpResponse::Rpc(self.handle_tools_list(request)?)),
            McpMethod::ToolsCall => self.handle_tools_call(request).await,
            McpMethod::Other(method) => Ok(McpResponse::Rpc(JsonRpcResponse::method_not_found(
                request.id, &method,
            ))),
        }
    }

    /// Pure capability announcement; request params are ignored
    fn handle_initialize(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, McpError> {
        info!("Client initialized");

        let result = serde_json::to_value(InitializeResult::current())?;
        Ok(JsonRpcResponse::success(request.id, result))
    }

    /// Bare acknowledgment; notifications consume no id
    fn handle_initialized(&self) -> McpResponse {
        info!("Client ready");
        McpResponse::Empty
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse, McpError> {
        let tools = serde_json::to_value(tools::tool_schemas())?;
        Ok(JsonRpcResponse::success(request.id, json!({ "tools": tools })))
    }

    /// Decode arguments, invoke the backend, wrap the raw result
    ///
    /// Argument validation happens strictly before the backend handle is
    /// even constructed. An unrecognized tool name falls through to the
    /// same -32601 envelope as an unknown method, carrying the outer
    /// method name.
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> Result<McpResponse, McpError> {
        let JsonRpcRequest {
            id, method, params, ..
        } = request;

        let params: ToolCallParams =
            serde_json::from_value(params.unwrap_or_else(|| json!({})))
                .map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let invocation = match ToolInvocation::decode(&params.name, params.arguments)? {
            Some(invocation) => invocation,
            None => {
                return Ok(McpResponse::Rpc(JsonRpcResponse::method_not_found(
                    id, &method,
                )));
            }
        };

        let client = self.provider.client();
        let result: Value = match invocation {
            ToolInvocation::Query(args) => tools::query::execute(args, client.as_ref()).await?,
            ToolInvocation::AddTexts(args) => {
                tools::add_texts::execute(args, client.as_ref()).await?
            }
        };

        Ok(McpResponse::Rpc(JsonRpcResponse::success(id, result)))
    }
}
