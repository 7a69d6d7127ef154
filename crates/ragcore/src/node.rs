use crate::{events::EventEmitter, NodeError, RunId, StateUpdate, WorkflowState};
use async_trait::async_trait;

/// Core trait that all workflow steps implement
#[async_trait]
pub trait Node: Send + Sync {
    /// Step identifier used in traces and logs (e.g. "vectorstore")
    fn name(&self) -> &str;

    /// Execute the step against the current state and return a partial
    /// update. The interpreter merges the update; the node never sees
    /// state from any other run.
    async fn run(&self, ctx: NodeContext, state: &WorkflowState)
        -> Result<StateUpdate, NodeError>;
}

/// Execution context passed to each node invocation
#[derive(Clone)]
pub struct NodeContext {
    /// Run this invocation belongs to
    pub run_id: RunId,

    /// Event emitter for real-time updates
    pub events: EventEmitter,
}

impl NodeContext {
    pub fn new(run_id: RunId, events: EventEmitter) -> Self {
        Self { run_id, events }
    }
}
