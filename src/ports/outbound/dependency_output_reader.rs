use crate::shared::Result;
use std::path::Path;

/// DependencyOutputReader port for reading build tool output
///
/// Abstracts where `mvn dependency:tree` / `dependency:resolve` output comes
/// from: a saved log file, or a pipe on stdin.
pub trait DependencyOutputReader {
    /// Reads the complete output as text
    ///
    /// # Arguments
    /// * `path` - File to read; `None` means the reader's default source
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The file is a symlink or exceeds the size limit
    /// - The content cannot be read as UTF-8
    fn read_output(&self, path: Option<&Path>) -> Result<String>;
}
