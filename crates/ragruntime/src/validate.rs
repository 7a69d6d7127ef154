use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use ragcore::{GraphError, Target, WorkflowGraph};
use std::collections::HashMap;

/// Structural validation of a workflow graph.
///
/// Checks that the entry point is declared and resolvable, that every node
/// has an outgoing transition, that every edge target names a known node,
/// and that every node is reachable from the entry. Cycles are not an
/// error: the retry loops of the workflow depend on them.
pub fn validate(workflow: &WorkflowGraph) -> Result<(), GraphError> {
    let entry = workflow.entry().ok_or(GraphError::NoEntryPoint)?;
    if workflow.node(entry).is_none() {
        return Err(GraphError::UnknownNode(entry.to_string()));
    }

    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut indices: HashMap<String, NodeIndex> = HashMap::new();

    for name in workflow.node_names() {
        let idx = graph.add_node(name.to_string());
        indices.insert(name.to_string(), idx);
    }

    for name in workflow.node_names() {
        if workflow.transition(name).is_none() {
            return Err(GraphError::MissingEdge(name.to_string()));
        }
    }

    for (from, target) in workflow.edges() {
        if let Target::Node(to) = target {
            let from_idx = indices
                .get(from)
                .ok_or_else(|| GraphError::UnknownNode(from.to_string()))?;
            let to_idx = indices
                .get(to)
                .ok_or_else(|| GraphError::UnknownNode(to.to_string()))?;
            graph.add_edge(*from_idx, *to_idx, ());
        }
    }

    // Every node must be reachable from the entry, otherwise it can never
    // run and the graph definition is wrong.
    let mut reached = vec![false; graph.node_count()];
    let mut dfs = Dfs::new(&graph, indices[entry]);
    while let Some(idx) = dfs.next(&graph) {
        reached[idx.index()] = true;
    }

    for (name, idx) in &indices {
        if !reached[idx.index()] {
            return Err(GraphError::Unreachable(name.clone()));
        }
    }

    Ok(())
}
