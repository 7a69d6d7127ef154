//! Live HTTP-backed collaborator clients.

mod http_retriever;
mod openai;
mod tavily;

pub use http_retriever::HttpRetriever;
pub use openai::OpenAiGenerator;
pub use tavily::TavilySearcher;

use crate::Collaborators;
use std::sync::Arc;

/// Connection settings for the live collaborators. Reading these from the
/// environment (or anywhere else) is the caller's business.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub llm_api_key: String,
    pub llm_base_url: Option<String>,
    pub llm_model: Option<String>,
    pub tavily_api_key: String,
    pub retriever_url: String,
}

impl ProviderConfig {
    /// Build the live collaborator set from this configuration.
    pub fn collaborators(self) -> Collaborators {
        let mut generator = OpenAiGenerator::new(self.llm_api_key);
        if let Some(base_url) = self.llm_base_url {
            generator = generator.with_base_url(base_url);
        }
        if let Some(model) = self.llm_model {
            generator = generator.with_model(model);
        }

        Collaborators {
            retriever: Arc::new(HttpRetriever::new(self.retriever_url)),
            searcher: Arc::new(TavilySearcher::new(self.tavily_api_key)),
            generator: Arc::new(generator),
        }
    }
}
