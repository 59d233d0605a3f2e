use crate::application::dto::ModuleGraph;
use crate::dep_graph::domain::PackageGraph;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;
use serde::Serialize;
use std::collections::BTreeMap;

const SCHEMA_VERSION: &str = "1.3.0";
const PKG_MANAGER: &str = "maven";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DepGraphDocument<'a> {
    schema_version: &'static str,
    pkg_manager: PkgManager,
    pkgs: Vec<Pkg<'a>>,
    graph: Graph<'a>,
}

#[derive(Debug, Serialize)]
struct PkgManager {
    name: &'static str,
}

#[derive(Debug, Serialize)]
struct Pkg<'a> {
    id: String,
    info: PkgInfoView<'a>,
}

#[derive(Debug, Serialize)]
struct PkgInfoView<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Graph<'a> {
    root_node_id: &'a str,
    nodes: Vec<Node<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Node<'a> {
    node_id: &'a str,
    pkg_id: &'a str,
    deps: Vec<NodeRef<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    info: Option<NodeInfo<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeRef<'a> {
    node_id: &'a str,
}

#[derive(Debug, Serialize)]
struct NodeInfo<'a> {
    labels: &'a BTreeMap<String, String>,
}

/// JsonFormatter adapter for dep-graph JSON
///
/// One document per module; several modules are emitted as a JSON array
/// in module order.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn build_document(graph: &PackageGraph) -> DepGraphDocument<'_> {
        let pkgs = graph
            .pkgs()
            .iter()
            .map(|pkg| Pkg {
                id: pkg.id(),
                info: PkgInfoView {
                    name: pkg.name(),
                    version: pkg.version(),
                },
            })
            .collect();

        let nodes = graph
            .nodes()
            .map(|(node_id, node)| Node {
                node_id,
                pkg_id: node.pkg_id(),
                deps: node
                    .children()
                    .iter()
                    .map(|child| NodeRef { node_id: child })
                    .collect(),
                info: (!node.labels().is_empty()).then(|| NodeInfo {
                    labels: node.labels(),
                }),
            })
            .collect();

        DepGraphDocument {
            schema_version: SCHEMA_VERSION,
            pkg_manager: PkgManager { name: PKG_MANAGER },
            pkgs,
            graph: Graph {
                root_node_id: graph.root_node_id(),
                nodes,
            },
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for JsonFormatter {
    fn format(&self, graphs: &[ModuleGraph]) -> Result<String> {
        let documents: Vec<DepGraphDocument<'_>> = graphs
            .iter()
            .map(|module| Self::build_document(&module.graph))
            .collect();

        let json = match documents.as_slice() {
            [single] => serde_json::to_string_pretty(single)?,
            _ => serde_json::to_string_pretty(&documents)?,
        };
        Ok(json)
    }
}
