use crate::workflow::ROUTER;
use async_trait::async_trait;
use ragcore::{Node, NodeContext, NodeError, StateUpdate, WorkflowState};

/// Entry step. Writes nothing into the state: the routing decision is
/// consumed directly by the conditional edge that follows this node.
pub struct RouterNode;

#[async_trait]
impl Node for RouterNode {
    fn name(&self) -> &str {
        ROUTER
    }

    async fn run(
        &self,
        ctx: NodeContext,
        state: &WorkflowState,
    ) -> Result<StateUpdate, NodeError> {
        ctx.events.info(format!("Routing question: {}", state.question));
        Ok(StateUpdate::none())
    }
}
