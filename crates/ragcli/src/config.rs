use anyhow::{anyhow, Result};
use ragnodes::providers::ProviderConfig;

/// Assemble the provider configuration from the environment. Required
/// keys fail fast with a clear error instead of surfacing later as an
/// opaque HTTP failure.
pub fn provider_config_from_env() -> Result<ProviderConfig> {
    Ok(ProviderConfig {
        llm_api_key: require_env("RAG_LLM_API_KEY")?,
        llm_base_url: std::env::var("RAG_LLM_BASE_URL").ok(),
        llm_model: std::env::var("RAG_LLM_MODEL").ok(),
        tavily_api_key: require_env("TAVILY_API_KEY")?,
        retriever_url: require_env("RAG_RETRIEVER_URL")?,
    })
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| anyhow!("{} not found in the environment.", key))
}
