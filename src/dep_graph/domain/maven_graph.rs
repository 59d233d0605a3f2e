use super::DependencyIdentity;
use std::collections::HashMap;

/// Node of the intermediate adjacency graph, keyed by its coordinate string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphNode {
    depends_on: Vec<String>,
    parents: Vec<String>,
    reaches_prod_dep: bool,
}

impl GraphNode {
    /// Children in first-seen order
    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// True if this node, or anything it transitively depends on, is not
    /// exclusively test-scoped
    pub fn reaches_prod_dep(&self) -> bool {
        self.reaches_prod_dep
    }
}

/// Adjacency graph for one module, built edge by edge from tool output
///
/// The root node always exists. Edges are idempotent and the
/// `reaches_prod_dep` flag only ever goes from false to true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenGraph {
    root_id: String,
    nodes: HashMap<String, GraphNode>,
}

impl MavenGraph {
    pub fn new(root_id: impl Into<String>) -> Self {
        let root_id = root_id.into();
        let mut nodes = HashMap::new();
        nodes.insert(root_id.clone(), GraphNode::default());
        Self { root_id, nodes }
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.depends_on.len()).sum()
    }

    /// Adds the edge `parent_id -> child_id`, creating nodes on first reference
    ///
    /// A child that is not test-scoped reaches production; a parent of any
    /// node that reaches production does too.
    pub fn add_edge(&mut self, parent_id: &str, child_id: &str) {
        let parent = self.nodes.entry(parent_id.to_string()).or_default();
        if !parent.depends_on.iter().any(|d| d == child_id) {
            parent.depends_on.push(child_id.to_string());
        }

        let child = self.nodes.entry(child_id.to_string()).or_default();
        if !child.parents.iter().any(|p| p == parent_id) {
            child.parents.push(parent_id.to_string());
        }

        if child.reaches_prod_dep {
            self.mark_reaches_prod_dep(parent_id);
        } else if !DependencyIdentity::parse(child_id).is_test_scoped() {
            self.mark_reaches_prod_dep(child_id);
        }
    }

    /// Flood-fills the flag upwards, stopping at nodes already flagged
    fn mark_reaches_prod_dep(&mut self, start_id: &str) {
        let mut worklist = vec![start_id.to_string()];
        while let Some(id) = worklist.pop() {
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };
            if node.reaches_prod_dep {
                continue;
            }
            node.reaches_prod_dep = true;
            worklist.extend(node.parents.iter().cloned());
        }
    }
}
