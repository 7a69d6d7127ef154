//! Client for an external retrieval service.
//!
//! The index itself (ingestion, embeddings, persistence) lives behind a
//! service boundary; this client only speaks its query endpoint.

use crate::{CollaboratorError, Retriever};
use ragcore::ContextDoc;
use serde::{Deserialize, Serialize};

const DEFAULT_TOP_K: u32 = 4;

#[derive(Debug, Serialize)]
struct RetrieveRequest<'a> {
    query: &'a str,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
struct RetrieveResponse {
    #[serde(default)]
    documents: Vec<RetrievedDoc>,
}

#[derive(Debug, Deserialize)]
struct RetrievedDoc {
    content: String,
    #[serde(default)]
    source: Option<String>,
}

/// Retriever backed by a retrieval service exposing a single query
/// endpoint: `POST {endpoint}` with `{query, top_k}` returning
/// `{documents: [{content, source?}]}`.
pub struct HttpRetriever {
    endpoint: String,
    top_k: u32,
    client: reqwest::Client,
}

impl HttpRetriever {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            top_k: DEFAULT_TOP_K,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }
}

#[async_trait::async_trait]
impl Retriever for HttpRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<ContextDoc>, CollaboratorError> {
        tracing::debug!("Querying retrieval service at {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&RetrieveRequest {
                query,
                top_k: self.top_k,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Api { status, message });
        }

        let body: RetrieveResponse = response.json().await?;
        Ok(body
            .documents
            .into_iter()
            .map(|doc| ContextDoc {
                content: doc.content,
                source: doc.source,
            })
            .collect())
    }
}
