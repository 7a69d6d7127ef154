//! Contracts for the external capabilities the workflow consumes.
//!
//! The engine treats retrieval, web search, and text generation as
//! pluggable collaborators behind these traits. Live HTTP clients live in
//! [`crate::providers`]; tests substitute scripted implementations.

use async_trait::async_trait;
use ragcore::ContextDoc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Index retrieval: given a query, return context documents.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Vec<ContextDoc>, CollaboratorError>;
}

/// Live web search: given a query, return result snippets.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CollaboratorError>;
}

/// Single-shot text completion. One capability serves all four prompt
/// templates: rewriting, relevance grading, answer generation, and answer
/// grading.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CollaboratorError>;
}

/// One raw web search result. Providers do not guarantee a content field;
/// entries without one are dropped by the web-search step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

/// Text completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System prompt (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// The user prompt to complete against
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}
