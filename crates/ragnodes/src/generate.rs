use crate::{prompts, workflow::GENERATE, TextGenerator};
use async_trait::async_trait;
use ragcore::{Node, NodeContext, NodeError, StateUpdate, WorkflowState};
use std::sync::Arc;

/// Answer generation step: asks the language capability for an answer
/// grounded in the current docs and sets `answer`. Question and docs pass
/// through unchanged.
pub struct GenerateNode {
    generator: Arc<dyn TextGenerator>,
}

impl GenerateNode {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Node for GenerateNode {
    fn name(&self) -> &str {
        GENERATE
    }

    async fn run(
        &self,
        ctx: NodeContext,
        state: &WorkflowState,
    ) -> Result<StateUpdate, NodeError> {
        let answer = self
            .generator
            .complete(prompts::generation_request(&state.question, &state.docs))
            .await
            .map_err(|e| NodeError::ExecutionFailed(format!("Generation failed: {}", e)))?;

        ctx.events
            .info(format!("Generated answer from {} docs", state.docs.len()));

        Ok(StateUpdate::answer(answer))
    }
}
