use crate::dep_graph::domain::{DependencyIdentity, MavenGraph};
use crate::dep_graph::services::VersionResolver;
use crate::shared::error::GraphError;
use crate::shared::Result;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid quoted coordinate regex"));

/// `"from" -> "to"` with an optional trailing `;`
static EDGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"([^"]+)"\s*->\s*"([^"]+)"\s*;?$"#).expect("valid digraph edge regex")
});

/// Max characters of a block quoted in a missing-root error
const BLOCK_EXCERPT_LEN: usize = 80;

/// DigraphBuilder - accumulates edges into a [`MavenGraph`]
///
/// Every id passed to [`DigraphBuilder::connect`] goes through the attached
/// resolver first, in the context of the current project id.
pub struct DigraphBuilder<'r> {
    graph: MavenGraph,
    resolver: Option<&'r dyn VersionResolver>,
    project_id: Option<String>,
    module_roots: HashSet<String>,
}

impl<'r> DigraphBuilder<'r> {
    /// Builder without a resolver; ids are used verbatim
    pub fn new(root_id: &str) -> Self {
        Self {
            graph: MavenGraph::new(root_id),
            resolver: None,
            project_id: None,
            module_roots: HashSet::new(),
        }
    }

    /// Builder whose ids (root included) are resolved against `project_id`
    pub fn with_resolver(
        root_id: &str,
        resolver: &'r dyn VersionResolver,
        project_id: Option<&str>,
    ) -> Self {
        let root = resolver.resolve(root_id, project_id);
        Self {
            graph: MavenGraph::new(root),
            resolver: Some(resolver),
            project_id: project_id.map(str::to_string),
            module_roots: HashSet::new(),
        }
    }

    /// Registers the root of a module taking part in an aggregated build
    ///
    /// Non-test references to a registered root, such as
    /// `com.example:core:jar:1.0:compile`, are folded onto the root id
    /// `com.example:core:jar:1.0`, so a module's own edges and the edges of
    /// modules depending on it meet in one node.
    pub fn register_module_root(&mut self, root_id: &str) {
        self.module_roots.insert(root_id.to_string());
    }

    /// Changes the project context for subsequent edges
    pub fn set_project_id(&mut self, project_id: Option<&str>) {
        self.project_id = project_id.map(str::to_string);
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Adds `parent_id -> child_id` after resolving both ids. Idempotent.
    pub fn connect(&mut self, parent_id: &str, child_id: &str) {
        let parent = self.resolve(parent_id);
        let child = self.resolve(child_id);
        self.graph.add_edge(&parent, &child);
    }

    fn resolve(&self, id: &str) -> String {
        let resolved = match self.resolver {
            Some(resolver) => resolver.resolve(id, self.project_id.as_deref()),
            None => id.to_string(),
        };
        self.module_root_of(&resolved).unwrap_or(resolved)
    }

    /// Registered module root that a scoped reference points at
    fn module_root_of(&self, id: &str) -> Option<String> {
        if self.module_roots.is_empty() {
            return None;
        }
        let identity = DependencyIdentity::parse(id);
        if identity.scope().is_none() || identity.is_test_scoped() {
            return None;
        }
        let (unscoped, _) = id.rsplit_once(':')?;
        self.module_roots
            .contains(unscoped)
            .then(|| unscoped.to_string())
    }

    pub fn graph(&self) -> &MavenGraph {
        &self.graph
    }

    pub fn build(self) -> MavenGraph {
        self.graph
    }

    /// Builds the graph for a single `digraph "root" { ... }` block
    ///
    /// The project id used for resolution is the root's `groupId:artifactId`.
    ///
    /// # Errors
    /// - [`GraphError::MissingRoot`] when the first line has no quoted coordinate
    /// - [`GraphError::MalformedDigraph`] for any unrecognised statement
    pub fn from_digraph(block: &str, resolver: &'r dyn VersionResolver) -> Result<MavenGraph> {
        let root = Self::digraph_root(block)?;
        let project_id = DependencyIdentity::parse(&root).package_name();
        let mut builder = Self::with_resolver(&root, resolver, Some(&project_id));
        builder.extend_from_digraph(block)?;
        Ok(builder.build())
    }

    /// Feeds the edges of another digraph block into this builder
    ///
    /// Used for aggregation: the project id switches to the block's root
    /// while its edges are added, and is left pointing at that project.
    pub fn extend_from_digraph(&mut self, block: &str) -> Result<()> {
        let root = Self::digraph_root(block)?;
        let project_id = DependencyIdentity::parse(&root).package_name();
        self.set_project_id(Some(&project_id));

        let mut edges = 0usize;
        for line in block.lines().skip(1) {
            let statement = line.trim();
            if statement.is_empty() {
                continue;
            }
            if statement.starts_with('}') {
                break;
            }
            let Some(caps) = EDGE.captures(statement) else {
                return Err(GraphError::MalformedDigraph {
                    line: statement.to_string(),
                }
                .into());
            };
            self.connect(&caps[1], &caps[2]);
            edges += 1;
        }

        debug!(root = %root, edges, nodes = self.graph.node_count(), "built digraph");
        Ok(())
    }

    /// Root coordinate from the first line: `digraph "root" {`
    pub fn digraph_root(block: &str) -> Result<String> {
        let first_line = block.lines().next().unwrap_or_default();
        match QUOTED.captures(first_line) {
            Some(caps) => Ok(caps[1].to_string()),
            None => Err(GraphError::MissingRoot {
                block: block.chars().take(BLOCK_EXCERPT_LEN).collect(),
            }
            .into()),
        }
    }
}
