use crate::ports::outbound::DependencyOutputReader;
use crate::shared::error::GraphError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// FileSystemReader adapter for reading saved build output
///
/// Files are checked before reading: symlinks, non-regular files and
/// oversized files are rejected.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn safe_read_file(&self, path: &Path) -> Result<String> {
        if !path.exists() && fs::symlink_metadata(path).is_err() {
            return Err(GraphError::InputNotFound {
                path: path.to_path_buf(),
                suggestion: "Save the output first, e.g. `mvn dependency:tree -DoutputType=dot > deps.txt`, or pipe it on stdin".to_string(),
            }
            .into());
        }

        validate_regular_file(path, "build output")?;

        fs::read_to_string(path).map_err(|e| {
            GraphError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyOutputReader for FileSystemReader {
    fn read_output(&self, path: Option<&Path>) -> Result<String> {
        match path {
            Some(path) => self.safe_read_file(path),
            None => Err(GraphError::Validation {
                message: "no input file given".to_string(),
            }
            .into()),
        }
    }
}

/// StdinReader adapter for piped build output
///
/// `mvn dependency:tree -DoutputType=dot | mvn-dep-graph`. A path, when
/// given, takes precedence and is read through [`FileSystemReader`].
pub struct StdinReader {
    files: FileSystemReader,
}

impl StdinReader {
    pub fn new() -> Self {
        Self {
            files: FileSystemReader::new(),
        }
    }
}

impl Default for StdinReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyOutputReader for StdinReader {
    fn read_output(&self, path: Option<&Path>) -> Result<String> {
        if path.is_some() {
            return self.files.read_output(path);
        }
        let mut content = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut content)
            .map_err(|e| anyhow::anyhow!("Failed to read from stdin: {}", e))?;
        Ok(content)
    }
}
