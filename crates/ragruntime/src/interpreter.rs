use chrono::Utc;
use ragcore::{
    EngineError, EventBus, ExecutionEvent, GraphError, NodeContext, NodeError, RunId, Target,
    WorkflowGraph, WorkflowState,
};
use std::time::Instant;
use tokio::time::{timeout, Duration};

/// Per-run execution limits.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Maximum node executions before the run is aborted. The two grading
    /// loops have no exit of their own when the graders keep saying no,
    /// so the interpreter enforces the bound.
    pub max_steps: usize,

    /// Optional wall-clock limit per node execution. With None, a stuck
    /// collaborator call stalls the run.
    pub node_timeout: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_steps: 32,
            node_timeout: None,
        }
    }
}

/// Runs a workflow graph to completion, one node at a time.
///
/// Execution is strictly sequential: each node finishes and its update is
/// merged before the next transition is evaluated. A node error aborts the
/// run; there is no per-node recovery or fallback edge.
pub struct WorkflowInterpreter {
    config: RunConfig,
}

impl WorkflowInterpreter {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Execute one run from the entry node to the terminal marker and
    /// return the final state.
    pub async fn run(
        &self,
        graph: &WorkflowGraph,
        state: WorkflowState,
        event_bus: &EventBus,
    ) -> Result<WorkflowState, EngineError> {
        let run_id = RunId::new_v4();
        let start_time = Instant::now();

        event_bus.emit(ExecutionEvent::RunStarted {
            run_id,
            workflow: graph.name().to_string(),
            timestamp: Utc::now(),
        });

        tracing::info!("Starting run {} of workflow {}", run_id, graph.name());

        let result = self.drive(graph, state, event_bus, run_id).await;

        event_bus.emit(ExecutionEvent::RunCompleted {
            run_id,
            success: result.is_ok(),
            duration_ms: start_time.elapsed().as_millis() as u64,
            timestamp: Utc::now(),
        });

        result
    }

    async fn drive(
        &self,
        graph: &WorkflowGraph,
        mut state: WorkflowState,
        event_bus: &EventBus,
        run_id: RunId,
    ) -> Result<WorkflowState, EngineError> {
        let entry = graph.entry().ok_or(GraphError::NoEntryPoint)?;
        let mut current = entry;
        let mut steps = 0usize;

        loop {
            if steps >= self.config.max_steps {
                tracing::warn!(
                    "Run {} exceeded the iteration limit of {} steps at node {}",
                    run_id,
                    self.config.max_steps,
                    current
                );
                return Err(EngineError::IterationLimit {
                    limit: self.config.max_steps,
                });
            }

            let node = graph
                .node(current)
                .ok_or_else(|| GraphError::UnknownNode(current.to_string()))?;

            event_bus.emit(ExecutionEvent::NodeStarted {
                run_id,
                node: current.to_string(),
                timestamp: Utc::now(),
            });

            let ctx = NodeContext::new(run_id, event_bus.create_emitter(run_id, current));
            let node_start = Instant::now();

            let result = match self.config.node_timeout {
                Some(limit) => match timeout(limit, node.run(ctx, &state)).await {
                    Ok(result) => result,
                    Err(_) => Err(NodeError::Timeout {
                        seconds: limit.as_secs(),
                    }),
                },
                None => node.run(ctx, &state).await,
            };

            let duration_ms = node_start.elapsed().as_millis() as u64;

            let update = match result {
                Ok(update) => update,
                Err(e) => {
                    tracing::error!("Node {} failed: {}", current, e);
                    event_bus.emit(ExecutionEvent::NodeFailed {
                        run_id,
                        node: current.to_string(),
                        error: e.to_string(),
                        timestamp: Utc::now(),
                    });
                    return Err(e.into());
                }
            };

            state.apply(update);
            steps += 1;

            tracing::debug!("Node {} completed in {}ms", current, duration_ms);
            event_bus.emit(ExecutionEvent::NodeCompleted {
                run_id,
                node: current.to_string(),
                duration_ms,
                timestamp: Utc::now(),
            });

            let transition = graph
                .transition(current)
                .ok_or_else(|| GraphError::MissingEdge(current.to_string()))?;

            match transition.resolve(current, &state)? {
                Target::Node(next) => current = next,
                Target::End => break,
            }
        }

        tracing::info!("Run {} finished after {} steps", run_id, steps);
        Ok(state)
    }
}

impl Default for WorkflowInterpreter {
    fn default() -> Self {
        Self::new(RunConfig::default())
    }
}
