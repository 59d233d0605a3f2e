pub mod dependency_identity;
pub mod maven_graph;
pub mod package_graph;
pub mod resolved_version;

pub use dependency_identity::{DependencyIdentity, UNKNOWN};
pub use maven_graph::{GraphNode, MavenGraph};
pub use package_graph::{PackageGraph, PkgInfo, PkgNode, PRUNED_LABEL, ROOT_NODE_ID};
pub use resolved_version::ResolvedVersion;
