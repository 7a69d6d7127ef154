//! Tavily web search client.

use crate::{CollaboratorError, SearchResult, WebSearcher};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";
const DEFAULT_MAX_RESULTS: u32 = 5;

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// Search client for the Tavily API. Result entries may lack a content
/// field; they are passed through as-is and filtered by the web-search
/// step.
pub struct TavilySearcher {
    base_url: String,
    api_key: String,
    max_results: u32,
    client: reqwest::Client,
}

impl TavilySearcher {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            max_results: DEFAULT_MAX_RESULTS,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }
}

#[async_trait::async_trait]
impl WebSearcher for TavilySearcher {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CollaboratorError> {
        tracing::debug!("Searching the web for: {}", query);

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&TavilyRequest {
                api_key: &self.api_key,
                query,
                max_results: self.max_results,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Api { status, message });
        }

        let body: TavilyResponse = response.json().await?;
        Ok(body.results)
    }
}
