use crate::{workflow::WEB_SEARCH, WebSearcher};
use async_trait::async_trait;
use ragcore::{ContextDoc, Node, NodeContext, NodeError, StateUpdate, WorkflowState};
use std::sync::Arc;

/// Web search step: replaces `docs` with the content of the search
/// results. Results without a content field are dropped silently; that
/// degrades result quality, it does not fail the run.
pub struct WebSearchNode {
    searcher: Arc<dyn WebSearcher>,
}

impl WebSearchNode {
    pub fn new(searcher: Arc<dyn WebSearcher>) -> Self {
        Self { searcher }
    }
}

#[async_trait]
impl Node for WebSearchNode {
    fn name(&self) -> &str {
        WEB_SEARCH
    }

    async fn run(
        &self,
        ctx: NodeContext,
        state: &WorkflowState,
    ) -> Result<StateUpdate, NodeError> {
        let results = self
            .searcher
            .search(&state.question)
            .await
            .map_err(|e| NodeError::ExecutionFailed(format!("Web search failed: {}", e)))?;

        let total = results.len();
        let docs: Vec<ContextDoc> = results
            .into_iter()
            .filter_map(|result| {
                let content = result.content?;
                let mut doc = ContextDoc::new(content);
                doc.source = result.url;
                Some(doc)
            })
            .collect();

        if docs.len() < total {
            ctx.events
                .warn(format!("Dropped {} results without content", total - docs.len()));
        }
        ctx.events.info(format!("Web search produced {} snippets", docs.len()));

        Ok(StateUpdate::docs(docs))
    }
}
