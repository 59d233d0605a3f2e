use crate::dep_graph::domain::{DependencyIdentity, PackageGraph, ROOT_NODE_ID};
use tracing::debug;

/// Label key carrying the Maven scope of a node
pub const SCOPE_LABEL: &str = "maven:build_scope";

/// ScopeLabeler - records each dependency's Maven scope as a node label
///
/// Node ids of materialized nodes are coordinates, so the scope is read back
/// from the id. The root and placeholders are left alone.
pub struct ScopeLabeler;

impl ScopeLabeler {
    /// Returns the number of labelled nodes
    pub fn label(graph: &mut PackageGraph) -> usize {
        let scoped: Vec<(String, String)> = graph
            .nodes()
            .filter(|(id, node)| *id != ROOT_NODE_ID && !node.is_pruned())
            .filter_map(|(id, _)| {
                let identity = DependencyIdentity::parse(id);
                identity
                    .scope()
                    .map(|scope| (id.to_string(), scope.to_string()))
            })
            .collect();

        for (id, scope) in &scoped {
            graph.add_label(id, SCOPE_LABEL, scope);
        }
        debug!(labelled = scoped.len(), "added scope labels");
        scoped.len()
    }
}
