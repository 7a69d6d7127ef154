//! Workflow execution runtime
//!
//! This crate provides the interpreter that runs a workflow graph to
//! completion, the structural validation of the graph, and the runtime
//! facade binaries embed.

mod interpreter;
mod runtime;
mod validate;

pub use interpreter::{RunConfig, WorkflowInterpreter};
pub use runtime::{RagRuntime, RuntimeConfig};
pub use validate::validate;
