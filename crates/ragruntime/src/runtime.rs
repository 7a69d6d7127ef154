use crate::{interpreter::RunConfig, validate, WorkflowInterpreter};
use ragcore::{EngineError, EventBus, WorkflowGraph, WorkflowState};
use std::sync::Arc;
use tokio::time::Duration;

/// Runtime facade binding a validated workflow graph to an interpreter
/// and an event bus. One instance serves any number of independent runs;
/// each run owns its own state record.
pub struct RagRuntime {
    graph: WorkflowGraph,
    interpreter: WorkflowInterpreter,
    event_bus: Arc<EventBus>,
}

impl RagRuntime {
    /// Create a runtime with default settings. Fails if the graph is
    /// structurally invalid.
    pub fn new(graph: WorkflowGraph) -> Result<Self, EngineError> {
        Self::with_config(graph, RuntimeConfig::default())
    }

    /// Create a runtime with custom configuration.
    pub fn with_config(graph: WorkflowGraph, config: RuntimeConfig) -> Result<Self, EngineError> {
        validate(&graph)?;

        let interpreter = WorkflowInterpreter::new(RunConfig {
            max_steps: config.max_steps,
            node_timeout: config.node_timeout,
        });
        let event_bus = Arc::new(EventBus::new(config.event_buffer_size));

        Ok(Self {
            graph,
            interpreter,
            event_bus,
        })
    }

    /// Run the workflow once for the given question and return the final
    /// state.
    pub async fn ask(&self, question: impl Into<String>) -> Result<WorkflowState, EngineError> {
        let state = WorkflowState::new(question);
        self.interpreter.run(&self.graph, state, &self.event_bus).await
    }

    /// Subscribe to execution events.
    pub fn subscribe_events(&self) -> tokio::sync::broadcast::Receiver<ragcore::ExecutionEvent> {
        self.event_bus.subscribe()
    }

    /// Get the event bus for direct access.
    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }

    /// Step names of the underlying graph.
    pub fn node_names(&self) -> Vec<&str> {
        self.graph.node_names()
    }
}

/// Configuration for the runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub max_steps: usize,
    pub node_timeout: Option<Duration>,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let run = RunConfig::default();
        Self {
            max_steps: run.max_steps,
            node_timeout: run.node_timeout,
            event_buffer_size: 1000,
        }
    }
}
