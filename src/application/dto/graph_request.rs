use std::path::PathBuf;

/// Lookups issued concurrently per checksum window
pub const DEFAULT_CHECKSUM_CONCURRENCY: usize = 5;

/// Shape of the dependency listing in the build output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// `mvn dependency:tree -DoutputType=dot`
    #[default]
    Digraph,
    /// Plain indented `mvn dependency:tree` text
    Tree,
}

/// GraphRequest - Internal request DTO for the graph building use case
#[derive(Debug, Clone)]
pub struct GraphRequest {
    /// Saved build output; `None` reads the reader's default source (stdin)
    pub input_path: Option<PathBuf>,
    /// Output of `mvn dependency:resolve`, used to pin `RELEASE`/`LATEST`
    pub resolve_report_path: Option<PathBuf>,
    pub input_kind: InputKind,
    /// Keep test-only subtrees that never reach a production dependency
    pub include_test_scope: bool,
    /// Distinguish versions and scopes of the same artifact
    pub verbose: bool,
    /// Merge all modules into one graph rooted at the first module
    pub aggregate: bool,
    pub label_scopes: bool,
    pub checksums: bool,
    pub checksum_concurrency: usize,
}

impl GraphRequest {
    pub fn new(input_path: Option<PathBuf>) -> Self {
        Self {
            input_path,
            ..Self::default()
        }
    }
}

impl Default for GraphRequest {
    fn default() -> Self {
        Self {
            input_path: None,
            resolve_report_path: None,
            input_kind: InputKind::default(),
            include_test_scope: false,
            verbose: false,
            aggregate: false,
            label_scopes: false,
            checksums: false,
            checksum_concurrency: DEFAULT_CHECKSUM_CONCURRENCY,
        }
    }
}
