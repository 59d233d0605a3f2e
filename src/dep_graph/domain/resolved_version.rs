use super::DependencyIdentity;

/// Concrete version reported by `dependency:resolve` for one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    group_id: String,
    artifact_id: String,
    version: String,
    scope: Option<String>,
    dep_type: Option<String>,
    classifier: Option<String>,
    project_id: Option<String>,
}

impl ResolvedVersion {
    pub fn from_identity(identity: &DependencyIdentity, project_id: Option<&str>) -> Self {
        Self {
            group_id: identity.group_id().to_string(),
            artifact_id: identity.artifact_id().to_string(),
            version: identity.version().to_string(),
            scope: identity.scope().map(str::to_string),
            dep_type: Some(identity.dep_type().to_string()),
            classifier: identity.classifier().map(str::to_string),
            project_id: project_id.map(str::to_string),
        }
    }

    /// Lookup key: `groupId:artifactId`
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn dep_type(&self) -> Option<&str> {
        self.dep_type.as_deref()
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}
