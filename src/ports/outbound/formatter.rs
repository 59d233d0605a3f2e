use crate::application::dto::ModuleGraph;
use crate::shared::Result;

/// GraphFormatter port for serializing compacted graphs
///
/// Implementations exist for dep-graph JSON and a Markdown summary.
pub trait GraphFormatter {
    /// Formats every module graph into a single document
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, graphs: &[ModuleGraph]) -> Result<String>;
}
