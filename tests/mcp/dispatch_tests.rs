//! Dispatcher unit tests against a mock backend

use crate::common::{FailPoint, MockBackend, MockCall};
use chroma_mcp_http_server::mcp::error::McpError;
use chroma_mcp_http_server::mcp::handlers::{McpResponse, ProtocolHandlers};
use chroma_mcp_http_server::mcp::protocol::*;
use serde_json::json;
use std::sync::Arc;

fn create_handlers(backend: &MockBackend) -> ProtocolHandlers {
    ProtocolHandlers::new(Arc::new(backend.clone()))
}

fn request(method: &str, id: Option<serde_json::Value>, params: Option<serde_json::Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id,
        method: method.to_string(),
        params,
    }
}

/// Unwrap the envelope variant
fn rpc(response: McpResponse) -> JsonRpcResponse {
    match response {
        McpResponse::Rpc(response) => response,
        McpResponse::Empty => panic!("expected an envelope, got the empty ack"),
    }
}

#[tokio::test]
async fn test_initialize_announces_fixed_identity() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    let response = rpc(handlers
        .dispatch(request("initialize", Some(json!("init-1")), None))
        .await
        .unwrap());

    assert_eq!(response.jsonrpc, "2.0");
    assert_eq!(response.id, Some(json!("init-1")));
    assert!(response.error.is_none());

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "chroma-mcp-http-server");
    assert_eq!(result["serverInfo"]["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(result["capabilities"]["tools"]["supported"], true);
    assert_eq!(result["capabilities"]["tools"]["listChanged"], true);
}

#[tokio::test]
async fn test_initialize_echoes_integer_id() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    let response = rpc(handlers
        .dispatch(request("initialize", Some(json!(42)), None))
        .await
        .unwrap());

    assert_eq!(response.id, Some(json!(42)));
}

#[tokio::test]
async fn test_initialize_without_id() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    let response = rpc(handlers
        .dispatch(request("initialize", None, None))
        .await
        .unwrap());

    assert!(response.id.is_none());
}

#[tokio::test]
async fn test_initialized_notification_is_bare_ack() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    let response = handlers
        .dispatch(request("notifications/initialized", None, None))
        .await
        .unwrap();

    assert!(matches!(response, McpResponse::Empty));
}

#[tokio::test]
async fn test_tools_list_advertises_both_tools_in_order() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    let response = rpc(handlers
        .dispatch(request("tools/list", Some(json!("tools-1")), None))
        .await
        .unwrap());

    let result = response.result.unwrap();
    let tools = result["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 2);

    assert_eq!(tools[0]["name"], "chroma.query");
    assert_eq!(
        tools[0]["description"],
        "Query documents from a Chroma collection"
    );
    assert_eq!(
        tools[0]["inputSchema"]["required"],
        json!(["collection", "query_texts"])
    );

    assert_eq!(tools[1]["name"], "chroma.add_texts");
    assert_eq!(
        tools[1]["description"],
        "Add documents to a Chroma collection"
    );
    assert_eq!(
        tools[1]["inputSchema"]["required"],
        json!(["collection", "ids", "documents"])
    );
}

#[tokio::test]
async fn test_unknown_method_yields_method_not_found() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    let response = rpc(handlers
        .dispatch(request("resources/list", Some(json!(9)), None))
        .await
        .unwrap());

    assert!(response.result.is_none());
    let error = response.error.unwrap();
    assert_eq!(error.code, METHOD_NOT_FOUND);
    assert_eq!(error.message, "Method not found: resources/list");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_tool_falls_through_to_method_not_found() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    let response = rpc(handlers
        .dispatch(request(
            "tools/call",
            Some(json!("unknown-test")),
            Some(json!({ "name": "unknown.tool", "arguments": {} })),
        ))
        .await
        .unwrap());

    let error = response.error.unwrap();
    assert_eq!(error.code, METHOD_NOT_FOUND);
    // The message carries the outer method name, not the tool name
    assert_eq!(error.message, "Method not found: tools/call");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_query_invokes_backend_and_passes_result_through() {
    let payload = json!({
        "ids": [["id1", "id2"]],
        "documents": [["doc1", "doc2"]],
        "metadatas": [[{"key": "value"}, null]],
        "distances": [[0.1, 0.2]]
    });
    let backend = MockBackend::with_query_result(payload.clone());
    let handlers = create_handlers(&backend);

    let response = rpc(handlers
        .dispatch(request(
            "tools/call",
            Some(json!("query-test")),
            Some(json!({
                "name": "chroma.query",
                "arguments": {
                    "collection": "test_collection",
                    "query_texts": ["test query"],
                    "n_results": 3
                }
            })),
        ))
        .await
        .unwrap());

    assert_eq!(response.id, Some(json!("query-test")));
    assert_eq!(response.result.unwrap(), payload);

    assert_eq!(
        backend.calls(),
        vec![
            MockCall::GetCollection("test_collection".to_string()),
            MockCall::Query {
                query_texts: vec!["test query".to_string()],
                n_results: 3,
            },
        ]
    );
}

#[tokio::test]
async fn test_query_defaults_n_results_to_five() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    handlers
        .dispatch(request(
            "tools/call",
            Some(json!(1)),
            Some(json!({
                "name": "chroma.query",
                "arguments": { "collection": "c1", "query_texts": ["q"] }
            })),
        ))
        .await
        .unwrap();

    assert!(backend.calls().contains(&MockCall::Query {
        query_texts: vec!["q".to_string()],
        n_results: 5,
    }));
}

#[tokio::test]
async fn test_add_texts_reports_literal_ok() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    let response = rpc(handlers
        .dispatch(request(
            "tools/call",
            Some(json!("add-test")),
            Some(json!({
                "name": "chroma.add_texts",
                "arguments": {
                    "collection": "test_collection",
                    "ids": ["id1", "id2"],
                    "documents": ["doc1", "doc2"],
                    "metadatas": [{"key": "value"}, {"key2": "value2"}]
                }
            })),
        ))
        .await
        .unwrap());

    assert_eq!(response.result.unwrap(), json!("ok"));

    let calls = backend.calls();
    assert_eq!(
        calls[0],
        MockCall::GetOrCreateCollection("test_collection".to_string())
    );
    match &calls[1] {
        MockCall::Add {
            ids,
            documents,
            metadatas,
        } => {
            assert_eq!(ids, &vec!["id1".to_string(), "id2".to_string()]);
            assert_eq!(documents, &vec!["doc1".to_string(), "doc2".to_string()]);
            let metadatas = metadatas.as_ref().unwrap();
            assert_eq!(metadatas[0]["key"], "value");
            assert_eq!(metadatas[1]["key2"], "value2");
        }
        other => panic!("expected an add call, got {other:?}"),
    }
}

#[tokio::test]
async fn test_add_texts_without_metadatas_passes_absent() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    handlers
        .dispatch(request(
            "tools/call",
            Some(json!("add-no-meta")),
            Some(json!({
                "name": "chroma.add_texts",
                "arguments": { "collection": "c1", "ids": ["id1"], "documents": ["doc1"] }
            })),
        ))
        .await
        .unwrap();

    match &backend.calls()[1] {
        MockCall::Add { metadatas, .. } => assert!(metadatas.is_none()),
        other => panic!("expected an add call, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_required_argument_rejected_before_backend() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    let result = handlers
        .dispatch(request(
            "tools/call",
            Some(json!("invalid-query")),
            Some(json!({
                "name": "chroma.query",
                "arguments": { "collection": "test_collection" }
            })),
        ))
        .await;

    assert!(matches!(result, Err(McpError::InvalidParams(_))));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_tools_call_without_params_rejected() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    let result = handlers
        .dispatch(request("tools/call", Some(json!(3)), None))
        .await;

    assert!(matches!(result, Err(McpError::InvalidParams(_))));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_missing_collection_fault_propagates() {
    let backend = MockBackend::failing_at(FailPoint::GetCollection);
    let handlers = create_handlers(&backend);

    let result = handlers
        .dispatch(request(
            "tools/call",
            Some(json!(5)),
            Some(json!({
                "name": "chroma.query",
                "arguments": { "collection": "missing", "query_texts": ["q"] }
            })),
        ))
        .await;

    assert!(matches!(result, Err(McpError::Chroma(_))));
}

#[tokio::test]
async fn test_backend_query_fault_propagates() {
    let backend = MockBackend::failing_at(FailPoint::Query);
    let handlers = create_handlers(&backend);

    let result = handlers
        .dispatch(request(
            "tools/call",
            Some(json!(6)),
            Some(json!({
                "name": "chroma.query",
                "arguments": { "collection": "c1", "query_texts": ["q"] }
            })),
        ))
        .await;

    assert!(matches!(result, Err(McpError::Chroma(_))));
}

#[tokio::test]
async fn test_backend_add_fault_propagates() {
    let backend = MockBackend::failing_at(FailPoint::Add);
    let handlers = create_handlers(&backend);

    let result = handlers
        .dispatch(request(
            "tools/call",
            Some(json!(7)),
            Some(json!({
                "name": "chroma.add_texts",
                "arguments": { "collection": "c1", "ids": ["d1"], "documents": ["x"] }
            })),
        ))
        .await;

    assert!(matches!(result, Err(McpError::Chroma(_))));
}

#[tokio::test]
async fn test_tools_list_is_idempotent() {
    let backend = MockBackend::new();
    let handlers = create_handlers(&backend);

    let first = rpc(handlers
        .dispatch(request("tools/list", Some(json!(1)), None))
        .await
        .unwrap());
    let second = rpc(handlers
        .dispatch(request("tools/list", Some(json!(1)), None))
        .await
        .unwrap());

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    assert!(backend.calls().is_empty());
}
