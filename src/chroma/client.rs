//! HTTP client for the ChromaDB REST API

use super::{ChromaClient, ChromaCollection, ChromaError, ChromaProvider};
use crate::config::ChromaConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Connects to a ChromaDB instance over its REST API
pub struct HttpChromaClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpChromaClient {
    /// Build a client from connection parameters
    pub fn new(host: &str, port: u16, ssl: bool, http: reqwest::Client) -> Self {
        let scheme = if ssl { "https" } else { "http" };
        Self {
            base_url: format!("{scheme}://{host}:{port}/api/v1"),
            http,
        }
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Collection record as returned by the Chroma API
#[derive(Debug, Deserialize)]
struct CollectionRecord {
    id: String,
}

/// Reject non-2xx responses with the backend's own status and body
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ChromaError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ChromaError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ChromaClient for HttpChromaClient {
    async fn get_collection(&self, name: &str) -> Result<Box<dyn ChromaCollection>, ChromaError> {
        let url = format!("{}/collections/{name}", self.base_url);
        debug!("GET {url}");

        let response = self.http.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ChromaError::CollectionNotFound(name.to_string()));
        }

        let record: CollectionRecord = check(response).await?.json().await?;
        Ok(Box::new(HttpCollection {
            id: record.id,
            base_url: self.base_url.clone(),
            http: self.http.clone(),
        }))
    }

    async fn get_or_create_collection(
        &self,
        name: &str,
    ) -> Result<Box<dyn ChromaCollection>, ChromaError> {
        let url = format!("{}/collections", self.base_url);
        debug!("POST {url} (get_or_create {name})");

        let response = self
            .http
            .post(&url)
            .json(&json!({ "name": name, "get_or_create": true }))
            .send()
            .await?;

        let record: CollectionRecord = check(response).await?.json().await?;
        Ok(Box::new(HttpCollection {
            id: record.id,
            base_url: self.base_url.clone(),
            http: self.http.clone(),
        }))
    }
}

/// A resolved collection, addressed by backend id
struct HttpCollection {
    id: String,
    base_url: String,
    http: reqwest::Client,
}

#[async_trait]
impl ChromaCollection for HttpCollection {
    async fn query(
        &self,
        query_texts: &[String],
        n_results: usize,
    ) -> Result<Value, ChromaError> {
        let url = format!("{}/collections/{}/query", self.base_url, self.id);

        let response = self
            .http
            .post(&url)
            .json(&json!({
                "query_texts": query_texts,
                "n_results": n_results,
            }))
            .send()
            .await?;

        let result = check(response).await?.json().await?;
        Ok(result)
    }

    async fn add(
        &self,
        ids: &[String],
        documents: &[String],
        metadatas: Option<&[Map<String, Value>]>,
    ) -> Result<(), ChromaError> {
        let url = format!("{}/collections/{}/add", self.base_url, self.id);

        let response = self
            .http
            .post(&url)
            .json(&json!({
                "ids": ids,
                "documents": documents,
                "metadatas": metadatas,
            }))
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}

/// Default provider: one shared reqwest client, a fresh handle per request
#[derive(Clone)]
pub struct HttpChromaProvider {
    config: ChromaConfig,
    http: reqwest::Client,
}

impl HttpChromaProvider {
    pub fn new(config: ChromaConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

impl ChromaProvider for HttpChromaProvider {
    fn client(&self) -> Arc<dyn ChromaClient> {
        Arc::new(HttpChromaClient::new(
            &self.config.host,
            self.config.port,
            self.config.ssl,
            self.http.clone(),
        ))
    }
}
