use crate::{GraphError, Node, WorkflowState};
use std::collections::HashMap;

/// Label returned by a routing decision, matched against the route table
/// of the conditional edge that follows the node.
pub type RouteLabel = &'static str;

/// Where an edge leads: another node, or the terminal marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Node(&'static str),
    End,
}

/// Outgoing transition of a node.
///
/// Conditional transitions pair a pure decision function over the shared
/// state with a (label -> target) lookup table, so the routing logic stays
/// enumerable and unit-testable.
pub enum Transition {
    To(&'static str),
    End,
    Conditional {
        decide: fn(&WorkflowState) -> RouteLabel,
        routes: Vec<(RouteLabel, Target)>,
    },
}

impl Transition {
    /// Resolve this transition against the current state.
    pub fn resolve(&self, from: &str, state: &WorkflowState) -> Result<Target, GraphError> {
        match self {
            Transition::To(next) => Ok(Target::Node(*next)),
            Transition::End => Ok(Target::End),
            Transition::Conditional { decide, routes } => {
                let label = decide(state);
                routes
                    .iter()
                    .find(|(candidate, _)| *candidate == label)
                    .map(|(_, target)| target.clone())
                    .ok_or_else(|| GraphError::UnknownRoute {
                        node: from.to_string(),
                        label: label.to_string(),
                    })
            }
        }
    }
}

/// Fixed topology of named steps and the edges between them.
///
/// Declared once at startup, then handed to the interpreter. Cycles are
/// legal: the retry loops of the workflow re-enter earlier nodes.
pub struct WorkflowGraph {
    name: String,
    entry: Option<&'static str>,
    nodes: HashMap<String, Box<dyn Node>>,
    transitions: HashMap<String, Transition>,
}

impl WorkflowGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry: None,
            nodes: HashMap::new(),
            transitions: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a step. The node's own `name()` is its identifier.
    pub fn add_node(&mut self, node: Box<dyn Node>) {
        self.nodes.insert(node.name().to_string(), node);
    }

    pub fn set_entry(&mut self, name: &'static str) {
        self.entry = Some(name);
    }

    /// Unconditional edge `from -> to`.
    pub fn add_edge(&mut self, from: &str, to: &'static str) {
        self.transitions.insert(from.to_string(), Transition::To(to));
    }

    /// Edge from `from` straight to the terminal marker.
    pub fn add_terminal_edge(&mut self, from: &str) {
        self.transitions.insert(from.to_string(), Transition::End);
    }

    /// Conditional edge: after `from` executes, `decide` picks a label and
    /// the route table maps it to a target.
    pub fn add_conditional_edges(
        &mut self,
        from: &str,
        decide: fn(&WorkflowState) -> RouteLabel,
        routes: Vec<(RouteLabel, Target)>,
    ) {
        self.transitions
            .insert(from.to_string(), Transition::Conditional { decide, routes });
    }

    pub fn entry(&self) -> Option<&'static str> {
        self.entry
    }

    pub fn node(&self, name: &str) -> Option<&dyn Node> {
        self.nodes.get(name).map(|n| n.as_ref())
    }

    pub fn transition(&self, name: &str) -> Option<&Transition> {
        self.transitions.get(name)
    }

    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.keys().map(|k| k.as_str()).collect()
    }

    /// All edges as (from, target) pairs, conditional routes flattened.
    pub fn edges(&self) -> Vec<(&str, Target)> {
        let mut edges = Vec::new();
        for (from, transition) in &self.transitions {
            match transition {
                Transition::To(next) => edges.push((from.as_str(), Target::Node(*next))),
                Transition::End => edges.push((from.as_str(), Target::End)),
                Transition::Conditional { routes, .. } => {
                    for (_, target) in routes {
                        edges.push((from.as_str(), target.clone()));
                    }
                }
            }
        }
        edges
    }
}
