use crate::{prompts, workflow::REWRITE, TextGenerator};
use async_trait::async_trait;
use ragcore::{Node, NodeContext, NodeError, StateUpdate, WorkflowState};
use std::sync::Arc;

/// Query rewrite step: replaces `question` with a version the language
/// capability thinks retrieves better. Every other field is left alone,
/// so docs, answer, and verdicts from the previous iteration stay visible
/// until the next node overwrites them.
pub struct RewriteNode {
    generator: Arc<dyn TextGenerator>,
}

impl RewriteNode {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Node for RewriteNode {
    fn name(&self) -> &str {
        REWRITE
    }

    async fn run(
        &self,
        ctx: NodeContext,
        state: &WorkflowState,
    ) -> Result<StateUpdate, NodeError> {
        let rewritten = self
            .generator
            .complete(prompts::rewrite_request(&state.question))
            .await
            .map_err(|e| NodeError::ExecutionFailed(format!("Rewrite failed: {}", e)))?;

        ctx.events.info(format!("Rewrote question to: {}", rewritten));

        Ok(StateUpdate::question(rewritten))
    }
}
