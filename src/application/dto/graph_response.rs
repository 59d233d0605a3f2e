use crate::dep_graph::domain::PackageGraph;

/// Compacted graph of one module (or of the whole reactor when aggregated)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGraph {
    /// `groupId:artifactId` of the module root
    pub project_id: String,
    pub graph: PackageGraph,
}

impl ModuleGraph {
    pub fn new(project_id: impl Into<String>, graph: PackageGraph) -> Self {
        Self {
            project_id: project_id.into(),
            graph,
        }
    }
}

/// Outcome of checksum decoration across all modules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChecksumSummary {
    pub found: usize,
    pub missing: usize,
    pub failed: usize,
}

impl ChecksumSummary {
    pub fn total(&self) -> usize {
        self.found + self.missing + self.failed
    }

    pub fn merge(&mut self, other: ChecksumSummary) {
        self.found += other.found;
        self.missing += other.missing;
        self.failed += other.failed;
    }
}

/// GraphResponse - Internal response DTO from the graph building use case
#[derive(Debug, Clone)]
pub struct GraphResponse {
    pub modules: Vec<ModuleGraph>,
    pub aggregated: bool,
    /// Present when checksum decoration ran
    pub checksum_summary: Option<ChecksumSummary>,
}

impl GraphResponse {
    pub fn new(
        modules: Vec<ModuleGraph>,
        aggregated: bool,
        checksum_summary: Option<ChecksumSummary>,
    ) -> Self {
        Self {
            modules,
            aggregated,
            checksum_summary,
        }
    }
}
