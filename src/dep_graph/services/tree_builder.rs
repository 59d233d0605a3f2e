use crate::dep_graph::domain::{DependencyIdentity, MavenGraph};
use crate::dep_graph::services::{DigraphBuilder, TextSegmenter, VersionResolver};
use crate::shared::error::GraphError;
use crate::shared::Result;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

static CONFLICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"omitted for conflict with ([^;)\s]+)").expect("valid conflict regex")
});

/// How a tree line relates to the dependency it names
#[derive(Debug, Clone, PartialEq, Eq)]
enum Omission {
    None,
    Duplicate,
    Cycle,
    /// Lost mediation against the given version
    Conflict(String),
}

/// One parsed line of `mvn dependency:tree` text output
#[derive(Debug, Clone)]
struct TreeLine<'a> {
    depth: usize,
    raw: &'a str,
    identity: DependencyIdentity,
    omission: Omission,
}

/// TreeBuilder - builds a [`MavenGraph`] from indented tree output
///
/// ```text
/// com.example:app:jar:1.0
/// +- org.a:b:jar:1.0:compile
/// |  \- (org.c:d:jar:1.0:compile - omitted for conflict with 2.0)
/// \- org.c:d:jar:2.0:compile
/// ```
///
/// Edges go through a [`DigraphBuilder`], so resolution and the
/// production-reachability flag behave exactly as for digraph input.
pub struct TreeBuilder;

impl TreeBuilder {
    /// Builds the graph for one tree block (plugin banner optional)
    ///
    /// # Errors
    /// [`GraphError::MissingRoot`] for an empty block and
    /// [`GraphError::MalformedTreeLine`] for lines that cannot be placed
    pub fn from_tree(block: &str, resolver: &dyn VersionResolver) -> Result<MavenGraph> {
        let lines = Self::parse_lines(block)?;
        let root = &lines[0];
        let project_id = root.identity.package_name();
        let mut builder =
            DigraphBuilder::with_resolver(&root.identity.build(), resolver, Some(&project_id));
        Self::attach_lines(&mut builder, &lines)?;
        Ok(builder.build())
    }

    /// Feeds the edges of a tree block into an existing builder
    pub fn extend(builder: &mut DigraphBuilder<'_>, block: &str) -> Result<()> {
        let lines = Self::parse_lines(block)?;
        builder.set_project_id(Some(&lines[0].identity.package_name()));
        Self::attach_lines(builder, &lines)
    }

    /// Root coordinate of a tree block
    pub fn tree_root(block: &str) -> Result<String> {
        let lines = Self::parse_lines(block)?;
        Ok(lines[0].identity.build())
    }

    /// Parses every line; the first entry is always the root
    fn parse_lines(block: &str) -> Result<Vec<TreeLine<'_>>> {
        let mut lines = Vec::new();
        for (index, raw) in block.lines().enumerate() {
            if raw.trim().is_empty() || (index == 0 && TextSegmenter::is_tree_banner(raw)) {
                continue;
            }
            lines.push(Self::parse_line(raw)?);
        }
        if lines.is_empty() {
            return Err(GraphError::MissingRoot {
                block: block.to_string(),
            }
            .into());
        }
        Ok(lines)
    }

    fn parse_line(raw: &str) -> Result<TreeLine<'_>> {
        let malformed = |reason: &str| GraphError::MalformedTreeLine {
            line: raw.to_string(),
            reason: reason.to_string(),
        };

        let depth = raw
            .find(|c: char| !matches!(c, '+' | '-' | '\\' | '|' | ' '))
            .ok_or_else(|| malformed("line has no coordinate"))?;
        let content = raw[depth..].trim_end();

        let (body, omission) = match content.strip_prefix('(') {
            Some(inner) => {
                let omission = if let Some(caps) = CONFLICT.captures(inner) {
                    Omission::Conflict(caps[1].to_string())
                } else if inner.contains("omitted for cycle") {
                    Omission::Cycle
                } else if inner.contains("omitted for duplicate") {
                    Omission::Duplicate
                } else {
                    Omission::None
                };
                (inner, omission)
            }
            None => (content, Omission::None),
        };

        // Trailing annotations like `(version managed from 1.0)` follow the coordinate
        let coordinate = body
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .trim_end_matches(')');
        let identity = DependencyIdentity::parse(coordinate);
        if identity.is_unknown() {
            return Err(malformed("coordinate could not be parsed").into());
        }

        Ok(TreeLine {
            depth,
            raw,
            identity,
            omission,
        })
    }

    /// Highest version per `groupId:artifactId` among lines that were kept
    ///
    /// Versions compare as plain strings, so `"9.0" > "10.0"`.
    fn winning_versions<'l>(lines: &'l [TreeLine<'_>]) -> HashMap<String, &'l str> {
        let mut winners: HashMap<String, &str> = HashMap::new();
        for line in lines.iter().filter(|l| l.omission == Omission::None) {
            let version = line.identity.version();
            winners
                .entry(line.identity.package_name())
                .and_modify(|current| {
                    if version > *current {
                        *current = version;
                    }
                })
                .or_insert(version);
        }
        winners
    }

    /// Coordinate used as node id for a line
    fn node_id(line: &TreeLine<'_>, winners: &HashMap<String, &str>) -> String {
        match &line.omission {
            Omission::Conflict(cited) => {
                let version = winners
                    .get(&line.identity.package_name())
                    .copied()
                    .unwrap_or(cited.as_str());
                line.identity.with_version(version).build()
            }
            _ => line.identity.build(),
        }
    }

    /// Attaches every line to the nearest preceding shallower line
    fn attach_lines(builder: &mut DigraphBuilder<'_>, lines: &[TreeLine<'_>]) -> Result<()> {
        let winners = Self::winning_versions(lines);
        let root = &lines[0];
        let mut stack: Vec<(usize, String)> = vec![(root.depth, Self::node_id(root, &winners))];

        for line in &lines[1..] {
            while stack.last().is_some_and(|(depth, _)| *depth >= line.depth) {
                stack.pop();
            }
            let Some((_, parent_id)) = stack.last() else {
                return Err(GraphError::MalformedTreeLine {
                    line: line.raw.to_string(),
                    reason: "line is not nested below the root".to_string(),
                }
                .into());
            };
            let id = Self::node_id(line, &winners);
            builder.connect(parent_id, &id);
            stack.push((line.depth, id));
        }

        debug!(
            root = %root.identity,
            lines = lines.len(),
            nodes = builder.graph().node_count(),
            "built dependency tree"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dep_graph::services::NoopVersionResolver;

    const ROOT: &str = "com.example:app:jar:1.0";

    fn build(block: &str) -> MavenGraph {
        TreeBuilder::from_tree(block, &NoopVersionResolver).unwrap()
    }

    #[test]
    fn test_simple_tree() {
        let graph = build(
            "com.example:app:jar:1.0\n\
             +- junit:junit:jar:4.13:test\n\
             |  \\- org.hamcrest:hamcrest-core:jar:1.3:test\n\
             \\- com.google.guava:guava:jar:31.0:compile\n",
        );
        assert_eq!(graph.root_id(), ROOT);
        assert_eq!(
            graph.node(ROOT).unwrap().depends_on(),
            ["junit:junit:jar:4.13:test", "com.google.guava:guava:jar:31.0:compile"]
        );
        assert_eq!(
            graph.node("junit:junit:jar:4.13:test").unwrap().depends_on(),
            ["org.hamcrest:hamcrest-core:jar:1.3:test"]
        );
    }

    #[test]
    fn test_banner_is_dropped() {
        let graph = build(
            "--- maven-dependency-plugin:3.6.1:tree (default-cli) @ app ---\n\
             com.example:app:jar:1.0\n\
             \\- org.a:b:jar:1.0:compile\n",
        );
        assert_eq!(graph.root_id(), ROOT);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_deep_then_shallow_attaches_to_nearest_ancestor() {
        let graph = build(
            "com.example:app:jar:1.0\n\
             +- a:a:jar:1:compile\n\
             |  +- b:b:jar:1:compile\n\
             |  |  \\- c:c:jar:1:compile\n\
             |  \\- d:d:jar:1:compile\n\
             \\- e:e:jar:1:compile\n",
        );
        assert_eq!(
            graph.node("a:a:jar:1:compile").unwrap().depends_on(),
            ["b:b:jar:1:compile", "d:d:jar:1:compile"]
        );
        assert_eq!(
            graph.node(ROOT).unwrap().depends_on(),
            ["a:a:jar:1:compile", "e:e:jar:1:compile"]
        );
    }

    #[test]
    fn test_trailing_annotations_are_stripped() {
        let graph = build(
            "com.example:app:jar:1.0\n\
             \\- org.a:b:jar:2.0:compile (version managed from 1.0)\n",
        );
        assert!(graph.contains("org.a:b:jar:2.0:compile"));
    }

    #[test]
    fn test_conflict_uses_highest_kept_version() {
        let graph = build(
            "com.example:app:jar:1.0\n\
             +- org.a:b:jar:1.0:compile\n\
             |  \\- (org.c:d:jar:1.0:compile - omitted for conflict with 1.5)\n\
             \\- org.c:d:jar:2.0:compile\n",
        );
        assert_eq!(
            graph.node("org.a:b:jar:1.0:compile").unwrap().depends_on(),
            ["org.c:d:jar:2.0:compile"]
        );
        assert!(!graph.contains("org.c:d:jar:1.0:compile"));
    }

    #[test]
    fn test_conflict_falls_back_to_cited_version() {
        let graph = build(
            "com.example:app:jar:1.0\n\
             \\- org.a:b:jar:1.0:compile\n   \
                \\- (org.c:d:jar:1.0:compile - omitted for conflict with 1.5)\n",
        );
        assert!(graph.contains("org.c:d:jar:1.5:compile"));
    }

    #[test]
    fn test_version_comparison_is_lexical() {
        let graph = build(
            "com.example:app:jar:1.0\n\
             +- org.c:d:jar:9.0:compile\n\
             +- org.x:y:jar:1:compile\n\
             |  \\- org.c:d:jar:10.0:compile\n\
             \\- org.z:z:jar:1:compile\n   \
                \\- (org.c:d:jar:1.0:compile - omitted for conflict with 10.0)\n",
        );
        assert_eq!(
            graph.node("org.z:z:jar:1:compile").unwrap().depends_on(),
            ["org.c:d:jar:9.0:compile"]
        );
    }

    #[test]
    fn test_duplicate_and_cycle_keep_own_coordinate() {
        let graph = build(
            "com.example:app:jar:1.0\n\
             +- org.a:b:jar:1.0:compile\n\
             |  \\- (org.c:d:jar:1.0:compile - version managed from 0.9; omitted for duplicate)\n\
             \\- org.c:d:jar:1.0:compile\n   \
                \\- (org.a:b:jar:1.0:compile - omitted for cycle)\n",
        );
        assert_eq!(
            graph.node("org.a:b:jar:1.0:compile").unwrap().depends_on(),
            ["org.c:d:jar:1.0:compile"]
        );
        assert_eq!(
            graph.node("org.c:d:jar:1.0:compile").unwrap().depends_on(),
            ["org.a:b:jar:1.0:compile"]
        );
    }

    #[test]
    fn test_unparsable_line_is_malformed() {
        let err = TreeBuilder::from_tree(
            "com.example:app:jar:1.0\n\\- not-a-coordinate\n",
            &NoopVersionResolver,
        )
        .unwrap_err();
        match err.downcast_ref::<GraphError>() {
            Some(GraphError::MalformedTreeLine { line, .. }) => {
                assert_eq!(line, "\\- not-a-coordinate");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_second_root_level_line_is_malformed() {
        let err = TreeBuilder::from_tree(
            "com.example:app:jar:1.0\norg.a:b:jar:1.0:compile\n",
            &NoopVersionResolver,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GraphError>(),
            Some(GraphError::MalformedTreeLine { .. })
        ));
    }

    #[test]
    fn test_tree_root() {
        assert_eq!(
            TreeBuilder::tree_root("com.example:app:jar:1.0\n\\- a:a:jar:1:compile").unwrap(),
            ROOT
        );
        assert!(TreeBuilder::tree_root("\n\n").is_err());
    }

    #[test]
    fn test_extend_merges_into_builder() {
        let mut builder = DigraphBuilder::new(ROOT);
        TreeBuilder::extend(&mut builder, "com.example:app:jar:1.0\n\\- a:a:jar:1:compile").unwrap();
        TreeBuilder::extend(&mut builder, "com.example:lib:jar:1.0\n\\- b:b:jar:1:compile").unwrap();
        assert_eq!(builder.project_id(), Some("com.example:lib"));
        let graph = builder.build();
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains("com.example:lib:jar:1.0"));
    }
}
