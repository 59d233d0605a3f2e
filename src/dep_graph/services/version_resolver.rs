use crate::dep_graph::domain::{DependencyIdentity, ResolvedVersion};
use crate::dep_graph::policies::DependencyKeyPolicy;
use crate::dep_graph::services::TextSegmenter;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// Bucket for resolutions listed before any project banner
pub const DEFAULT_PROJECT: &str = "default";

const RESOLVED_SECTION_MARKER: &str = "The following files have been resolved:";

/// `------------------< com.example:app >------------------`
static PROJECT_BANNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-*<\s*(\S+)\s*>-*$").expect("valid project banner regex"));

/// Rewrites floating versions (`RELEASE`, `LATEST`) to concrete ones
///
/// Implementations never fail: a coordinate that cannot be resolved is
/// returned unchanged.
pub trait VersionResolver {
    /// Resolves `coordinate` in the context of `project_id` (`groupId:artifactId`
    /// of the module whose graph is being built)
    fn resolve(&self, coordinate: &str, project_id: Option<&str>) -> String;
}

/// Resolver used when no resolve report is available
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVersionResolver;

impl VersionResolver for NoopVersionResolver {
    fn resolve(&self, coordinate: &str, _project_id: Option<&str>) -> String {
        coordinate.to_string()
    }
}

/// Resolver backed by `mvn dependency:resolve` output
///
/// Two-level lookup: project id, then `groupId:artifactId`. Sections that
/// precede any project banner land in [`DEFAULT_PROJECT`], which also serves
/// as the fallback for every project.
#[derive(Debug, Clone, Default)]
pub struct ReportVersionResolver {
    projects: HashMap<String, HashMap<String, ResolvedVersion>>,
}

impl ReportVersionResolver {
    /// Parses a resolve report. Lines that are not artifacts end the
    /// current resolved section; nothing here is an error.
    pub fn from_report(report: &str) -> Self {
        let cleaned = TextSegmenter::strip_log_labels(report);
        let mut projects: HashMap<String, HashMap<String, ResolvedVersion>> = HashMap::new();
        let mut current_project: Option<String> = None;
        let mut in_section = false;

        for line in cleaned.lines() {
            let trimmed = line.trim();

            if let Some(caps) = PROJECT_BANNER.captures(trimmed) {
                current_project = Some(caps[1].to_string());
                in_section = false;
                continue;
            }
            if trimmed.contains(RESOLVED_SECTION_MARKER) {
                in_section = true;
                continue;
            }
            if !in_section {
                continue;
            }
            if trimmed.is_empty() {
                in_section = false;
                continue;
            }
            if trimmed == "none" {
                continue;
            }

            // Newer plugins append ` -- module name (auto)`
            let token = trimmed.split_whitespace().next().unwrap_or_default();
            let identity = DependencyIdentity::parse(token);
            if identity.is_unknown() {
                in_section = false;
                continue;
            }

            let bucket = current_project.as_deref().unwrap_or(DEFAULT_PROJECT);
            let resolved = ResolvedVersion::from_identity(&identity, current_project.as_deref());
            projects
                .entry(bucket.to_string())
                .or_default()
                .insert(resolved.key(), resolved);
        }

        debug!(
            projects = projects.len(),
            artifacts = projects.values().map(HashMap::len).sum::<usize>(),
            "parsed resolve report"
        );
        Self { projects }
    }

    /// Looks up `key` (`groupId:artifactId`) in exactly one project bucket
    pub fn lookup(&self, project_id: &str, key: &str) -> Option<&ResolvedVersion> {
        self.projects.get(project_id)?.get(key)
    }

    /// Project ids seen in the report, sorted
    pub fn project_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.projects.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.projects.values().all(HashMap::is_empty)
    }
}

impl VersionResolver for ReportVersionResolver {
    fn resolve(&self, coordinate: &str, project_id: Option<&str>) -> String {
        let identity = DependencyIdentity::parse(coordinate);
        if identity.is_unknown() || !DependencyKeyPolicy::is_metaversion(identity.version()) {
            return coordinate.to_string();
        }

        let key = identity.package_name();
        let found = project_id
            .and_then(|project| self.lookup(project, &key))
            .or_else(|| self.lookup(DEFAULT_PROJECT, &key));

        match found {
            Some(resolved) => {
                debug!(
                    coordinate,
                    version = resolved.version(),
                    "resolved metaversion"
                );
                identity.with_version(resolved.version()).build()
            }
            None => {
                debug!(coordinate, "no resolution found for metaversion");
                coordinate.to_string()
            }
        }
    }
}
