use crate::application::dto::ModuleGraph;
use crate::application::use_cases::CHECKSUM_LABEL;
use crate::dep_graph::domain::{PackageGraph, PkgNode, PRUNED_LABEL};
use crate::dep_graph::services::SCOPE_LABEL;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use chrono::Utc;

/// Markdown table header for package information
const TABLE_HEADER: &str = "| Package | Version | Scope | SHA-256 |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|---------|---------|-------|---------|\n";

/// MarkdownFormatter adapter for a human-readable graph report
///
/// Renders, per module, a package table and the dependency tree with
/// pruned occurrences marked.
pub struct MarkdownFormatter {
    /// Fixed generation timestamp; `None` uses the current time
    timestamp: Option<String>,
}

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self { timestamp: None }
    }

    /// Formatter with a fixed timestamp, for reproducible output
    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
        }
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn label<'a>(node: &'a PkgNode, key: &str) -> Option<&'a str> {
        node.labels().get(key).map(String::as_str)
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String) {
        let timestamp = self
            .timestamp
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339());
        output.push_str("# Maven Dependency Graph\n\n");
        output.push_str(&format!(
            "Generated by {} {} at {}\n\n",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            timestamp
        ));
    }

    fn render_summary(&self, output: &mut String, graph: &PackageGraph) {
        let root = graph.root_pkg();
        output.push_str(&format!(
            "Root package `{}`: {} packages, {} nodes, {} pruned.\n\n",
            root.id(),
            graph.pkg_count(),
            graph.node_count(),
            graph.pruned_node_count()
        ));
    }

    /// One row per materialized dependency, in node order
    fn render_packages(&self, output: &mut String, graph: &PackageGraph) {
        output.push_str("### Packages\n\n");

        let rows: Vec<(&str, &PkgNode)> = graph
            .nodes()
            .filter(|(node_id, node)| *node_id != graph.root_node_id() && !node.is_pruned())
            .collect();
        if rows.is_empty() {
            output.push_str("*No dependencies*\n\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);
        for (_, node) in rows {
            let Some(pkg) = graph.pkg(node.pkg_id()) else {
                continue;
            };
            let scope = Self::label(node, SCOPE_LABEL).unwrap_or("N/A");
            let checksum = Self::label(node, CHECKSUM_LABEL)
                .map(|sha| format!("`{}`", sha))
                .unwrap_or_else(|| "N/A".to_string());
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(pkg.name()),
                Self::escape_markdown_table_cell(pkg.version()),
                Self::escape_markdown_table_cell(scope),
                checksum
            ));
        }
        output.push('\n');
    }

    /// Nested list walked depth-first from the root
    fn render_tree(&self, output: &mut String, graph: &PackageGraph) {
        output.push_str("### Dependency Tree\n\n");

        let mut stack: Vec<(&str, usize)> = vec![(graph.root_node_id(), 0)];
        while let Some((node_id, depth)) = stack.pop() {
            let Some(node) = graph.node(node_id) else {
                continue;
            };
            let indent = "  ".repeat(depth);
            let marker = match Self::label(node, PRUNED_LABEL) {
                Some("cyclic") => " *(cycle)*",
                Some(_) => " *(pruned)*",
                None => "",
            };
            output.push_str(&format!("{}- `{}`{}\n", indent, node.pkg_id(), marker));

            for child in node.children().iter().rev() {
                stack.push((child.as_str(), depth + 1));
            }
        }
        output.push('\n');
    }
}

impl GraphFormatter for MarkdownFormatter {
    fn format(&self, graphs: &[ModuleGraph]) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output);

        for module in graphs {
            output.push_str(&format!(
                "## {}\n\n",
                Self::escape_markdown_table_cell(&module.project_id)
            ));
            self.render_summary(&mut output, &module.graph);
            self.render_packages(&mut output, &module.graph);
            self.render_tree(&mut output, &module.graph);
        }

        Ok(output)
    }
}
