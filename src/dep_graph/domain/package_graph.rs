use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// Node id of the root in every [`PackageGraph`]
pub const ROOT_NODE_ID: &str = "root-node";

/// Label key marking placeholder nodes
pub const PRUNED_LABEL: &str = "pruned";

/// Package identity in the final graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PkgInfo {
    name: String,
    version: String,
}

impl PkgInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Synthetic package id: `name@version`
    pub fn id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Node of the compacted graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkgNode {
    pkg_id: String,
    children: Vec<String>,
    labels: BTreeMap<String, String>,
}

impl PkgNode {
    pub fn pkg_id(&self) -> &str {
        &self.pkg_id
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    /// True for `pruned=true` and `pruned=cyclic` placeholders
    pub fn is_pruned(&self) -> bool {
        self.labels.contains_key(PRUNED_LABEL)
    }
}

/// PackageGraph aggregate: the durable, deduplicated output of compaction
///
/// Packages and nodes keep insertion order so that serialized output is
/// reproducible for identical input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageGraph {
    pkgs: Vec<PkgInfo>,
    pkg_index: HashMap<String, usize>,
    nodes: Vec<(String, PkgNode)>,
    node_index: HashMap<String, usize>,
}

impl PackageGraph {
    pub fn new(root_pkg: PkgInfo) -> Self {
        let mut graph = Self {
            pkgs: Vec::new(),
            pkg_index: HashMap::new(),
            nodes: Vec::new(),
            node_index: HashMap::new(),
        };
        graph.add_pkg_node(root_pkg, ROOT_NODE_ID, BTreeMap::new());
        graph
    }

    /// Adds a node for `pkg`; a node id that already exists is left untouched
    pub fn add_pkg_node(&mut self, pkg: PkgInfo, node_id: &str, labels: BTreeMap<String, String>) {
        if self.node_index.contains_key(node_id) {
            return;
        }
        let pkg_id = pkg.id();
        if !self.pkg_index.contains_key(&pkg_id) {
            self.pkg_index.insert(pkg_id.clone(), self.pkgs.len());
            self.pkgs.push(pkg);
        }
        self.node_index.insert(node_id.to_string(), self.nodes.len());
        self.nodes.push((
            node_id.to_string(),
            PkgNode {
                pkg_id,
                children: Vec::new(),
                labels,
            },
        ));
    }

    /// Connects two existing nodes; returns false if either is missing
    /// or the parent is a placeholder
    pub fn connect_dep(&mut self, parent_id: &str, child_id: &str) -> bool {
        if !self.node_index.contains_key(child_id) {
            return false;
        }
        let Some(parent) = self.node_mut(parent_id) else {
            return false;
        };
        if parent.is_pruned() {
            return false;
        }
        if !parent.children.iter().any(|c| c == child_id) {
            parent.children.push(child_id.to_string());
        }
        true
    }

    /// Adds or replaces a label on an existing node. Never changes topology.
    pub fn add_label(&mut self, node_id: &str, key: &str, value: &str) -> bool {
        match self.node_mut(node_id) {
            Some(node) => {
                node.labels.insert(key.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    fn node_mut(&mut self, node_id: &str) -> Option<&mut PkgNode> {
        let index = *self.node_index.get(node_id)?;
        self.nodes.get_mut(index).map(|(_, node)| node)
    }

    pub fn root_node_id(&self) -> &str {
        ROOT_NODE_ID
    }

    pub fn root_pkg(&self) -> &PkgInfo {
        // The root package is always inserted first by `new`
        &self.pkgs[0]
    }

    pub fn pkgs(&self) -> &[PkgInfo] {
        &self.pkgs
    }

    pub fn pkg(&self, pkg_id: &str) -> Option<&PkgInfo> {
        self.pkg_index.get(pkg_id).map(|&i| &self.pkgs[i])
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &PkgNode)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }

    pub fn node(&self, node_id: &str) -> Option<&PkgNode> {
        self.node_index.get(node_id).map(|&i| &self.nodes[i].1)
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node_index.contains_key(node_id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn pkg_count(&self) -> usize {
        self.pkgs.len()
    }

    pub fn pruned_node_count(&self) -> usize {
        self.nodes.iter().filter(|(_, n)| n.is_pruned()).count()
    }

    /// Number of parents that point at `node_id`
    pub fn in_degree(&self, node_id: &str) -> usize {
        self.nodes
            .iter()
            .filter(|(_, n)| n.children.iter().any(|c| c == node_id))
            .count()
    }

    /// Node ids reachable from the root, in breadth-first order
    pub fn reachable_node_ids(&self) -> Vec<&str> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([ROOT_NODE_ID]);
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            if let Some(node) = self.node(id) {
                queue.extend(node.children.iter().map(String::as_str));
            }
        }
        order
    }
}
