mod digraph_builder;
mod graph_compactor;
mod scope_labeler;
mod text_segmenter;
mod tree_builder;
mod version_resolver;

pub use digraph_builder::DigraphBuilder;
pub use graph_compactor::GraphCompactor;
pub use scope_labeler::{ScopeLabeler, SCOPE_LABEL};
pub use text_segmenter::TextSegmenter;
pub use tree_builder::TreeBuilder;
pub use version_resolver::{
    NoopVersionResolver, ReportVersionResolver, VersionResolver, DEFAULT_PROJECT,
};
