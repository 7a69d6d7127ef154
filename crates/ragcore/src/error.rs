use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Node error: {0}")]
    Node(#[from] NodeError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Iteration limit exceeded after {limit} steps")]
    IterationLimit { limit: usize },
}

#[derive(Error, Debug, Clone)]
pub enum NodeError {
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Unrecognized verdict: {0:?}")]
    UnrecognizedVerdict(String),

    #[error("Timeout after {seconds}s")]
    Timeout { seconds: u64 },
}

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("No entry point declared")]
    NoEntryPoint,

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Node has no outgoing edge: {0}")]
    MissingEdge(String),

    #[error("No route {label:?} out of node {node}")]
    UnknownRoute { node: String, label: String },

    #[error("Node unreachable from entry: {0}")]
    Unreachable(String),
}
