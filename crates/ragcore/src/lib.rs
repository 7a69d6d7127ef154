//! Core abstractions for the adaptive retrieval workflow
//!
//! This crate provides the fundamental types and traits that all other
//! components depend on: the shared state record, the node trait, the
//! workflow graph, and the execution event layer.

mod error;
mod events;
mod graph;
mod node;
mod state;

pub use error::{EngineError, GraphError, NodeError};
pub use events::{EventBus, EventEmitter, ExecutionEvent, NodeEvent, RunId};
pub use graph::{RouteLabel, Target, Transition, WorkflowGraph};
pub use node::{Node, NodeContext};
pub use state::{AnswerQuality, ContextDoc, Relevance, StateUpdate, WorkflowState};

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
