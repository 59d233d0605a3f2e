use crate::dep_graph::domain::{
    DependencyIdentity, MavenGraph, PackageGraph, PkgInfo, PRUNED_LABEL, ROOT_NODE_ID,
};
use crate::dep_graph::policies::DependencyKeyPolicy;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use tracing::debug;

/// Placeholder flavours attached to the discovering parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prune {
    Seen,
    Cyclic,
}

impl Prune {
    fn suffix(self) -> &'static str {
        match self {
            Prune::Seen => "pruned",
            Prune::Cyclic => "pruned-cyclic",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Prune::Seen => "true",
            Prune::Cyclic => "cyclic",
        }
    }
}

/// Node materialized for a logical dependency key
#[derive(Debug, Clone)]
struct Materialized {
    node_id: String,
    pkg: PkgInfo,
}

/// Pending visit in verbose mode; ancestry is shared by siblings
struct Frame {
    parent_id: String,
    coordinate: String,
    ancestry: Rc<[String]>,
}

/// GraphCompactor - turns a [`MavenGraph`] into a deduplicated [`PackageGraph`]
///
/// Each logical dependency is materialized once. Later encounters become
/// placeholder nodes (`pruned=true`, or `pruned=cyclic` for back edges in
/// verbose mode) that never get children, so the output is finite even for
/// cyclic input.
pub struct GraphCompactor<'g> {
    maven: &'g MavenGraph,
    include_test_scope: bool,
    verbose: bool,
    graph: PackageGraph,
    visited: HashMap<String, Materialized>,
}

impl<'g> GraphCompactor<'g> {
    /// Compacts `maven` in breadth-first order, or depth-first when `verbose`
    pub fn compact(maven: &'g MavenGraph, include_test_scope: bool, verbose: bool) -> PackageGraph {
        let root_identity = DependencyIdentity::parse(maven.root_id());
        let root_pkg = PkgInfo::new(root_identity.package_name(), root_identity.version());

        let mut compactor = Self {
            maven,
            include_test_scope,
            verbose,
            graph: PackageGraph::new(root_pkg.clone()),
            visited: HashMap::new(),
        };
        compactor.visited.insert(
            DependencyKeyPolicy::visited_key(&root_identity, verbose),
            Materialized {
                node_id: ROOT_NODE_ID.to_string(),
                pkg: root_pkg,
            },
        );

        if verbose {
            let root_key = DependencyKeyPolicy::visited_key(&root_identity, true);
            compactor.walk_depth_first(Rc::from(vec![root_key]));
        } else {
            compactor.walk_breadth_first();
        }

        debug!(
            root = maven.root_id(),
            verbose,
            nodes = compactor.graph.node_count(),
            pruned = compactor.graph.pruned_node_count(),
            "compacted graph"
        );
        compactor.graph
    }

    fn walk_breadth_first(&mut self) {
        let mut queue: VecDeque<(String, String)> = self
            .children_of(self.maven.root_id())
            .into_iter()
            .map(|child| (ROOT_NODE_ID.to_string(), child))
            .collect();

        while let Some((parent_id, coordinate)) = queue.pop_front() {
            if let Some(node_id) = self.visit(&parent_id, &coordinate, &[]) {
                queue.extend(
                    self.children_of(&coordinate)
                        .into_iter()
                        .map(|child| (node_id.clone(), child)),
                );
            }
        }
    }

    fn walk_depth_first(&mut self, root_ancestry: Rc<[String]>) {
        let mut stack: Vec<Frame> = self
            .children_of(self.maven.root_id())
            .into_iter()
            .map(|coordinate| Frame {
                parent_id: ROOT_NODE_ID.to_string(),
                coordinate,
                ancestry: Rc::clone(&root_ancestry),
            })
            .collect();

        while let Some(frame) = stack.pop() {
            let Some(node_id) = self.visit(&frame.parent_id, &frame.coordinate, &frame.ancestry)
            else {
                continue;
            };
            let key = self.key_of(&frame.coordinate);
            let ancestry: Rc<[String]> = frame
                .ancestry
                .iter()
                .cloned()
                .chain(std::iter::once(key))
                .collect();
            stack.extend(
                self.children_of(&frame.coordinate)
                    .into_iter()
                    .map(|coordinate| Frame {
                        parent_id: node_id.clone(),
                        coordinate,
                        ancestry: Rc::clone(&ancestry),
                    }),
            );
        }
    }

    /// Places one encounter of `coordinate` under `parent_id`
    ///
    /// Returns the new node id when the coordinate was materialized and its
    /// children should be expanded.
    fn visit(&mut self, parent_id: &str, coordinate: &str, ancestry: &[String]) -> Option<String> {
        let reaches_prod_dep = self
            .maven
            .node(coordinate)
            .is_some_and(|node| node.reaches_prod_dep());
        let identity = DependencyIdentity::parse(coordinate);
        if identity.is_test_scoped() && !reaches_prod_dep && !self.include_test_scope {
            return None;
        }

        let key = DependencyKeyPolicy::visited_key(&identity, self.verbose);
        if self.verbose && ancestry.contains(&key) {
            self.add_placeholder(parent_id, &key, Prune::Cyclic);
            return None;
        }
        if self.visited.contains_key(&key) {
            self.add_placeholder(parent_id, &key, Prune::Seen);
            return None;
        }

        let pkg = PkgInfo::new(identity.package_name(), identity.version());
        self.graph
            .add_pkg_node(pkg.clone(), coordinate, BTreeMap::new());
        self.graph.connect_dep(parent_id, coordinate);
        self.visited.insert(
            key,
            Materialized {
                node_id: coordinate.to_string(),
                pkg,
            },
        );
        Some(coordinate.to_string())
    }

    fn add_placeholder(&mut self, parent_id: &str, key: &str, prune: Prune) {
        let Some(original) = self.visited.get(key) else {
            return;
        };
        let placeholder_id = format!("{}:{}", original.node_id, prune.suffix());
        let labels = BTreeMap::from([(PRUNED_LABEL.to_string(), prune.label().to_string())]);
        self.graph
            .add_pkg_node(original.pkg.clone(), &placeholder_id, labels);
        self.graph.connect_dep(parent_id, &placeholder_id);
    }

    fn children_of(&self, coordinate: &str) -> Vec<String> {
        self.maven
            .node(coordinate)
            .map(|node| node.depends_on().to_vec())
            .unwrap_or_default()
    }

    fn key_of(&self, coordinate: &str) -> String {
        DependencyKeyPolicy::visited_key(&DependencyIdentity::parse(coordinate), self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROOT: &str = "com.example:app:jar:1.0";
    const A: &str = "org.a:a:jar:1.0:compile";
    const B: &str = "org.b:b:jar:1.0:compile";
    const C: &str = "org.c:c:jar:1.0:compile";
    const D: &str = "org.d:d:jar:1.0:compile";

    fn scenario_b() -> MavenGraph {
        let mut graph = MavenGraph::new(ROOT);
        graph.add_edge(ROOT, A);
        graph.add_edge(ROOT, C);
        graph.add_edge(A, B);
        graph.add_edge(B, A);
        graph.add_edge(C, D);
        graph.add_edge(ROOT, D);
        graph
    }

    fn label<'a>(graph: &'a PackageGraph, node_id: &str) -> Option<&'a str> {
        graph
            .node(node_id)
            .and_then(|n| n.labels().get(PRUNED_LABEL))
            .map(String::as_str)
    }

    #[test]
    fn test_root_only() {
        let graph = GraphCompactor::compact(&MavenGraph::new(ROOT), false, false);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.root_pkg().id(), "com.example:app@1.0");
    }

    #[test]
    fn test_test_scoped_parent_of_prod_dep_is_kept() {
        let mut maven = MavenGraph::new(ROOT);
        maven.add_edge(ROOT, "org.a:a:jar:1.0:test");
        maven.add_edge("org.a:a:jar:1.0:test", B);

        let graph = GraphCompactor::compact(&maven, false, false);
        assert_eq!(
            graph.node(ROOT_NODE_ID).unwrap().children(),
            ["org.a:a:jar:1.0:test"]
        );
        assert_eq!(graph.node("org.a:a:jar:1.0:test").unwrap().children(), [B]);
    }

    #[test]
    fn test_test_only_subtree_is_skipped() {
        let mut maven = MavenGraph::new(ROOT);
        maven.add_edge(ROOT, "junit:junit:jar:4.13:test");
        maven.add_edge("junit:junit:jar:4.13:test", "org.hamcrest:hamcrest-core:jar:1.3:test");
        maven.add_edge(ROOT, A);

        let graph = GraphCompactor::compact(&maven, false, false);
        assert_eq!(graph.node_count(), 2);
        assert!(!graph.contains_node("junit:junit:jar:4.13:test"));

        let with_tests = GraphCompactor::compact(&maven, true, false);
        assert_eq!(with_tests.node_count(), 4);
    }

    #[test]
    fn test_scenario_b_verbose() {
        let graph = GraphCompactor::compact(&scenario_b(), false, true);

        assert_eq!(graph.node(ROOT_NODE_ID).unwrap().children(), [D, C, A]);
        assert_eq!(graph.node(A).unwrap().children(), [B]);
        assert_eq!(
            graph.node(B).unwrap().children(),
            [format!("{}:pruned-cyclic", A)]
        );
        assert_eq!(
            graph.node(C).unwrap().children(),
            [format!("{}:pruned", D)]
        );
        assert_eq!(label(&graph, &format!("{}:pruned-cyclic", A)), Some("cyclic"));
        assert_eq!(label(&graph, &format!("{}:pruned", D)), Some("true"));
        assert_eq!(graph.pruned_node_count(), 2);
    }

    #[test]
    fn test_scenario_b_breadth_first() {
        let graph = GraphCompactor::compact(&scenario_b(), false, false);

        assert_eq!(graph.node(ROOT_NODE_ID).unwrap().children(), [A, C, D]);
        assert_eq!(
            graph.node(C).unwrap().children(),
            [format!("{}:pruned", D)]
        );
        assert_eq!(
            graph.node(B).unwrap().children(),
            [format!("{}:pruned", A)]
        );
        assert_eq!(label(&graph, &format!("{}:pruned", A)), Some("true"));
        assert!(!graph.contains_node(&format!("{}:pruned-cyclic", A)));
    }

    #[test]
    fn test_versions_collapse_unless_verbose() {
        let mut maven = MavenGraph::new(ROOT);
        maven.add_edge(ROOT, A);
        maven.add_edge(ROOT, B);
        maven.add_edge(B, "org.a:a:jar:2.0:compile");

        let compact = GraphCompactor::compact(&maven, false, false);
        assert_eq!(
            compact.node(B).unwrap().children(),
            [format!("{}:pruned", A)]
        );
        assert_eq!(compact.pkg_count(), 3);

        let verbose = GraphCompactor::compact(&maven, false, true);
        assert_eq!(
            verbose.node(B).unwrap().children(),
            ["org.a:a:jar:2.0:compile"]
        );
        assert!(verbose.pkg("org.a:a@2.0").is_some());
    }

    #[test]
    fn test_placeholder_points_at_materialized_package() {
        let graph = GraphCompactor::compact(&scenario_b(), false, false);
        let placeholder = graph.node(&format!("{}:pruned", D)).unwrap();
        assert_eq!(placeholder.pkg_id(), "org.d:d@1.0");
        assert!(placeholder.children().is_empty());
    }

    #[test]
    fn test_self_loop_terminates() {
        let mut maven = MavenGraph::new(ROOT);
        maven.add_edge(ROOT, A);
        maven.add_edge(A, A);

        let verbose = GraphCompactor::compact(&maven, false, true);
        assert_eq!(
            verbose.node(A).unwrap().children(),
            [format!("{}:pruned-cyclic", A)]
        );
        let compact = GraphCompactor::compact(&maven, false, false);
        assert_eq!(compact.node(A).unwrap().children(), [format!("{}:pruned", A)]);
    }

    #[test]
    fn test_output_is_deterministic() {
        let first = GraphCompactor::compact(&scenario_b(), false, true);
        let second = GraphCompactor::compact(&scenario_b(), false, true);
        assert_eq!(first, second);
    }

    proptest! {
        /// A dependency shared by k distinct parents is materialized once and
        /// referenced k-1 times through its placeholder
        #[test]
        fn prop_shared_dependency_cardinality(k in 2usize..8, verbose in any::<bool>()) {
            let mut maven = MavenGraph::new(ROOT);
            for i in 0..k {
                let parent = format!("org.p:p{}:jar:1.0:compile", i);
                maven.add_edge(ROOT, &parent);
                maven.add_edge(&parent, D);
            }
            let graph = GraphCompactor::compact(&maven, false, verbose);

            let materialized = graph.nodes().filter(|(id, _)| *id == D).count();
            prop_assert_eq!(materialized, 1);
            prop_assert_eq!(graph.in_degree(D), 1);
            prop_assert_eq!(graph.in_degree(&format!("{}:pruned", D)), k - 1);
        }

        #[test]
        fn prop_compaction_terminates_on_dense_graphs(
            edges in proptest::collection::vec((0usize..6, 0usize..6), 0..30),
            verbose in any::<bool>(),
        ) {
            let ids: Vec<String> = (0..6).map(|i| format!("org.n:n{}:jar:1.0:compile", i)).collect();
            let mut maven = MavenGraph::new(ROOT);
            maven.add_edge(ROOT, &ids[0]);
            for (from, to) in edges {
                maven.add_edge(&ids[from], &ids[to]);
            }
            let graph = GraphCompactor::compact(&maven, false, verbose);

            // Each distinct coordinate is materialized at most once
            for id in &ids {
                prop_assert!(graph.nodes().filter(|(n, _)| *n == id.as_str()).count() <= 1);
            }
            for (_, node) in graph.nodes().filter(|(_, n)| n.is_pruned()) {
                prop_assert!(node.children().is_empty());
            }
        }
    }
}
