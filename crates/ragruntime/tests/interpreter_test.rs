use async_trait::async_trait;
use ragcore::{
    EngineError, EventBus, ExecutionEvent, GraphError, Node, NodeContext, NodeError, StateUpdate,
    Target, WorkflowGraph, WorkflowState,
};
use ragruntime::{validate, RunConfig, WorkflowInterpreter};
use std::time::Duration;

/// Node that sets the answer field and nothing else.
struct SetAnswer {
    name: &'static str,
    answer: &'static str,
}

#[async_trait]
impl Node for SetAnswer {
    fn name(&self) -> &str {
        self.name
    }

    async fn run(&self, _ctx: NodeContext, _state: &WorkflowState) -> Result<StateUpdate, NodeError> {
        Ok(StateUpdate::answer(self.answer))
    }
}

/// Node that does nothing, for topology-only tests.
struct Noop(&'static str);

#[async_trait]
impl Node for Noop {
    fn name(&self) -> &str {
        self.0
    }

    async fn run(&self, _ctx: NodeContext, _state: &WorkflowState) -> Result<StateUpdate, NodeError> {
        Ok(StateUpdate::none())
    }
}

/// Node that always fails.
struct Failing(&'static str);

#[async_trait]
impl Node for Failing {
    fn name(&self) -> &str {
        self.0
    }

    async fn run(&self, _ctx: NodeContext, _state: &WorkflowState) -> Result<StateUpdate, NodeError> {
        Err(NodeError::ExecutionFailed("collaborator down".to_string()))
    }
}

/// Node that sleeps past any reasonable test timeout.
struct Slow(&'static str);

#[async_trait]
impl Node for Slow {
    fn name(&self) -> &str {
        self.0
    }

    async fn run(&self, _ctx: NodeContext, _state: &WorkflowState) -> Result<StateUpdate, NodeError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(StateUpdate::none())
    }
}

fn two_step_graph() -> WorkflowGraph {
    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Noop("first")));
    graph.add_node(Box::new(SetAnswer {
        name: "second",
        answer: "done",
    }));
    graph.set_entry("first");
    graph.add_edge("first", "second");
    graph.add_terminal_edge("second");
    graph
}

#[tokio::test]
async fn runs_a_straight_line_graph_to_completion() {
    let graph = two_step_graph();
    let bus = EventBus::new(100);
    let interpreter = WorkflowInterpreter::default();

    let state = interpreter
        .run(&graph, WorkflowState::new("q"), &bus)
        .await
        .unwrap();

    assert_eq!(state.answer.as_deref(), Some("done"));
    assert_eq!(state.question, "q");
}

#[tokio::test]
async fn emits_run_and_node_events_in_order() {
    let graph = two_step_graph();
    let bus = EventBus::new(100);
    let mut rx = bus.subscribe();
    let interpreter = WorkflowInterpreter::default();

    interpreter
        .run(&graph, WorkflowState::new("q"), &bus)
        .await
        .unwrap();

    let mut kinds = Vec::new();
    while let Ok(event) = rx.try_recv() {
        kinds.push(match event {
            ExecutionEvent::RunStarted { .. } => "run_started",
            ExecutionEvent::NodeStarted { .. } => "node_started",
            ExecutionEvent::NodeCompleted { .. } => "node_completed",
            ExecutionEvent::NodeFailed { .. } => "node_failed",
            ExecutionEvent::RunCompleted { .. } => "run_completed",
            ExecutionEvent::NodeEvent { .. } => "node_event",
        });
    }

    assert_eq!(
        kinds,
        vec![
            "run_started",
            "node_started",
            "node_completed",
            "node_started",
            "node_completed",
            "run_completed",
        ]
    );
}

#[tokio::test]
async fn conditional_edges_follow_the_decision_function() {
    fn decide(state: &WorkflowState) -> &'static str {
        if state.question.contains("left") {
            "left"
        } else {
            "right"
        }
    }

    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Noop("fork")));
    graph.add_node(Box::new(SetAnswer {
        name: "left",
        answer: "went left",
    }));
    graph.add_node(Box::new(SetAnswer {
        name: "right",
        answer: "went right",
    }));
    graph.set_entry("fork");
    graph.add_conditional_edges(
        "fork",
        decide,
        vec![("left", Target::Node("left")), ("right", Target::Node("right"))],
    );
    graph.add_terminal_edge("left");
    graph.add_terminal_edge("right");

    let bus = EventBus::new(100);
    let interpreter = WorkflowInterpreter::default();

    let state = interpreter
        .run(&graph, WorkflowState::new("go left"), &bus)
        .await
        .unwrap();
    assert_eq!(state.answer.as_deref(), Some("went left"));

    let state = interpreter
        .run(&graph, WorkflowState::new("anything else"), &bus)
        .await
        .unwrap();
    assert_eq!(state.answer.as_deref(), Some("went right"));
}

#[tokio::test]
async fn unknown_route_label_is_an_error() {
    fn decide(_state: &WorkflowState) -> &'static str {
        "nowhere"
    }

    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Noop("fork")));
    graph.add_node(Box::new(Noop("only")));
    graph.set_entry("fork");
    graph.add_conditional_edges("fork", decide, vec![("somewhere", Target::Node("only"))]);
    graph.add_terminal_edge("only");

    let bus = EventBus::new(100);
    let result = WorkflowInterpreter::default()
        .run(&graph, WorkflowState::new("q"), &bus)
        .await;

    match result {
        Err(EngineError::Graph(GraphError::UnknownRoute { node, label })) => {
            assert_eq!(node, "fork");
            assert_eq!(label, "nowhere");
        }
        other => panic!("expected UnknownRoute, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn cycles_stop_at_the_iteration_limit() {
    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Noop("spin")));
    graph.set_entry("spin");
    graph.add_edge("spin", "spin");

    let bus = EventBus::new(100);
    let interpreter = WorkflowInterpreter::new(RunConfig {
        max_steps: 5,
        node_timeout: None,
    });

    let result = interpreter.run(&graph, WorkflowState::new("q"), &bus).await;

    assert!(matches!(
        result,
        Err(EngineError::IterationLimit { limit: 5 })
    ));
}

#[tokio::test]
async fn iteration_limit_marks_the_run_failed_on_the_bus() {
    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Noop("spin")));
    graph.set_entry("spin");
    graph.add_edge("spin", "spin");

    let bus = EventBus::new(100);
    let mut rx = bus.subscribe();
    let interpreter = WorkflowInterpreter::new(RunConfig {
        max_steps: 3,
        node_timeout: None,
    });

    let _ = interpreter.run(&graph, WorkflowState::new("q"), &bus).await;

    let mut completed_success = None;
    while let Ok(event) = rx.try_recv() {
        if let ExecutionEvent::RunCompleted { success, .. } = event {
            completed_success = Some(success);
        }
    }
    assert_eq!(completed_success, Some(false));
}

#[tokio::test]
async fn node_failure_aborts_the_run() {
    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Failing("broken")));
    graph.add_node(Box::new(Noop("after")));
    graph.set_entry("broken");
    graph.add_edge("broken", "after");
    graph.add_terminal_edge("after");

    let bus = EventBus::new(100);
    let mut rx = bus.subscribe();

    let result = WorkflowInterpreter::default()
        .run(&graph, WorkflowState::new("q"), &bus)
        .await;

    assert!(matches!(
        result,
        Err(EngineError::Node(NodeError::ExecutionFailed(_)))
    ));

    let mut saw_failure = false;
    let mut saw_after_start = false;
    while let Ok(event) = rx.try_recv() {
        match event {
            ExecutionEvent::NodeFailed { node, .. } => saw_failure = node == "broken",
            ExecutionEvent::NodeStarted { node, .. } if node == "after" => saw_after_start = true,
            _ => {}
        }
    }
    assert!(saw_failure);
    assert!(!saw_after_start, "no node may run after a failure");
}

#[tokio::test(start_paused = true)]
async fn slow_node_times_out_when_a_limit_is_set() {
    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Slow("stuck")));
    graph.set_entry("stuck");
    graph.add_terminal_edge("stuck");

    let bus = EventBus::new(100);
    let interpreter = WorkflowInterpreter::new(RunConfig {
        max_steps: 8,
        node_timeout: Some(Duration::from_secs(1)),
    });

    let result = interpreter.run(&graph, WorkflowState::new("q"), &bus).await;

    assert!(matches!(
        result,
        Err(EngineError::Node(NodeError::Timeout { seconds: 1 }))
    ));
}

#[test]
fn validation_rejects_a_missing_entry_point() {
    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Noop("only")));
    graph.add_terminal_edge("only");

    assert!(matches!(validate(&graph), Err(GraphError::NoEntryPoint)));
}

#[test]
fn validation_rejects_a_dangling_edge_target() {
    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Noop("start")));
    graph.set_entry("start");
    graph.add_edge("start", "ghost");

    assert!(matches!(validate(&graph), Err(GraphError::UnknownNode(n)) if n == "ghost"));
}

#[test]
fn validation_rejects_a_node_without_an_outgoing_edge() {
    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Noop("start")));
    graph.add_node(Box::new(Noop("sink")));
    graph.set_entry("start");
    graph.add_edge("start", "sink");

    assert!(matches!(validate(&graph), Err(GraphError::MissingEdge(n)) if n == "sink"));
}

#[test]
fn validation_rejects_an_unreachable_node() {
    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Noop("start")));
    graph.add_node(Box::new(Noop("island")));
    graph.set_entry("start");
    graph.add_terminal_edge("start");
    graph.add_terminal_edge("island");

    assert!(matches!(validate(&graph), Err(GraphError::Unreachable(n)) if n == "island"));
}

#[test]
fn validation_accepts_cycles() {
    let mut graph = WorkflowGraph::new("test");
    graph.add_node(Box::new(Noop("a")));
    graph.add_node(Box::new(Noop("b")));
    graph.set_entry("a");
    graph.add_edge("a", "b");
    graph.add_edge("b", "a");

    assert!(validate(&graph).is_ok());
}
