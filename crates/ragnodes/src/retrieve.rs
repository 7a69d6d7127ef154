use crate::{workflow::VECTORSTORE, Retriever};
use async_trait::async_trait;
use ragcore::{Node, NodeContext, NodeError, StateUpdate, WorkflowState};
use std::sync::Arc;

/// Index retrieval step: replaces `docs` with whatever the retriever
/// returns for the current question. The question passes through
/// unchanged.
pub struct VectorstoreNode {
    retriever: Arc<dyn Retriever>,
}

impl VectorstoreNode {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait]
impl Node for VectorstoreNode {
    fn name(&self) -> &str {
        VECTORSTORE
    }

    async fn run(
        &self,
        ctx: NodeContext,
        state: &WorkflowState,
    ) -> Result<StateUpdate, NodeError> {
        let docs = self
            .retriever
            .retrieve(&state.question)
            .await
            .map_err(|e| NodeError::ExecutionFailed(format!("Retrieval failed: {}", e)))?;

        ctx.events.info(format!("Retrieved {} documents", docs.len()));

        Ok(StateUpdate::docs(docs))
    }
}
