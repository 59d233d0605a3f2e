use mvn_dep_graph::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock DependencyOutputReader serving stdin content and named files
pub struct MockOutputReader {
    pub stdin: String,
    pub files: HashMap<PathBuf, String>,
}

impl MockOutputReader {
    pub fn stdin(content: &str) -> Self {
        Self {
            stdin: content.to_string(),
            files: HashMap::new(),
        }
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(PathBuf::from(path), content.to_string());
        self
    }
}

impl DependencyOutputReader for MockOutputReader {
    fn read_output(&self, path: Option<&Path>) -> Result<String> {
        match path {
            None => Ok(self.stdin.clone()),
            Some(path) => match self.files.get(path) {
                Some(content) => Ok(content.clone()),
                None => anyhow::bail!("Mock read failure: {}", path.display()),
            },
        }
    }
}
