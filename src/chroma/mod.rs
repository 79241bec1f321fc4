//! Chroma backend collaborator
//!
//! The dispatcher consumes the backend through the traits defined here;
//! the HTTP implementation talks to a remote ChromaDB instance via its
//! REST API. Never imports from mcp/ or http/.

pub mod client;
pub mod error;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

pub use client::{HttpChromaClient, HttpChromaProvider};
pub use error::ChromaError;

/// Per-request factory for backend handles
///
/// Resolved once per tool call; implementations may pool connections
/// internally, which is opaque to the dispatcher.
pub trait ChromaProvider: Send + Sync {
    fn client(&self) -> Arc<dyn ChromaClient>;
}

/// A connected Chroma backend
#[async_trait]
pub trait ChromaClient: Send + Sync {
    /// Look up an existing collection; fails if it does not exist
    async fn get_collection(&self, name: &str) -> Result<Box<dyn ChromaCollection>, ChromaError>;

    /// Look up or create a collection; never fails on a missing one
    async fn get_or_create_collection(
        &self,
        name: &str,
    ) -> Result<Box<dyn ChromaCollection>, ChromaError>;
}

/// A named collection of documents in the backend store
#[async_trait]
pub trait ChromaCollection: Send + Sync {
    /// Similarity query; the result payload is backend-defined and passed
    /// through verbatim
    async fn query(&self, query_texts: &[String], n_results: usize)
        -> Result<Value, ChromaError>;

    /// Insert documents; the backend's return value is discarded
    async fn add(
        &self,
        ids: &[String],
        documents: &[String],
        metadatas: Option<&[Map<String, Value>]>,
    ) -> Result<(), ChromaError>;
}
