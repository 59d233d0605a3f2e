use std::fmt;

/// Placeholder used for every field that could not be parsed
pub const UNKNOWN: &str = "unknown";

/// Value object for a Maven coordinate
///
/// Wire format: `groupId:artifactId:type[:classifier]:version[:scope]`.
/// Parsing never fails: malformed coordinates become the unknown sentinel
/// so that a node can still be placed in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyIdentity {
    group_id: String,
    artifact_id: String,
    dep_type: String,
    version: String,
    classifier: Option<String>,
    scope: Option<String>,
}

impl DependencyIdentity {
    /// Parses a colon-delimited coordinate of 4 to 6 parts
    ///
    /// - 4 parts: `group:artifact:type:version`
    /// - 5 parts: `group:artifact:type:version:scope`
    /// - 6 parts: `group:artifact:type:classifier:version:scope`
    ///
    /// Any other arity yields [`DependencyIdentity::unknown`]. Empty fields
    /// are normalized to `"unknown"`.
    pub fn parse(coordinate: &str) -> Self {
        let parts: Vec<&str> = coordinate.split(':').collect();
        match parts.as_slice() {
            [group, artifact, dep_type, version] => {
                Self::from_parts(group, artifact, dep_type, version, None, None)
            }
            [group, artifact, dep_type, version, scope] => {
                Self::from_parts(group, artifact, dep_type, version, None, Some(scope))
            }
            [group, artifact, dep_type, classifier, version, scope] => Self::from_parts(
                group,
                artifact,
                dep_type,
                version,
                Some(classifier),
                Some(scope),
            ),
            _ => Self::unknown(),
        }
    }

    /// Same as [`DependencyIdentity::parse`], treating a missing value as malformed
    pub fn parse_optional(coordinate: Option<&str>) -> Self {
        coordinate.map(Self::parse).unwrap_or_else(Self::unknown)
    }

    /// The sentinel identity for unparseable coordinates
    pub fn unknown() -> Self {
        Self {
            group_id: UNKNOWN.to_string(),
            artifact_id: UNKNOWN.to_string(),
            dep_type: UNKNOWN.to_string(),
            version: UNKNOWN.to_string(),
            classifier: None,
            scope: None,
        }
    }

    fn from_parts(
        group_id: &str,
        artifact_id: &str,
        dep_type: &str,
        version: &str,
        classifier: Option<&str>,
        scope: Option<&str>,
    ) -> Self {
        Self {
            group_id: or_unknown(group_id),
            artifact_id: or_unknown(artifact_id),
            dep_type: or_unknown(dep_type),
            version: or_unknown(version),
            classifier: classifier.map(or_unknown),
            scope: scope.map(or_unknown),
        }
    }

    /// Builds the coordinate string; exact inverse of [`DependencyIdentity::parse`]
    pub fn build(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.group_id, &self.artifact_id, &self.dep_type];
        if let Some(classifier) = &self.classifier {
            parts.push(classifier);
        }
        parts.push(&self.version);
        if let Some(scope) = &self.scope {
            parts.push(scope);
        }
        parts.join(":")
    }

    /// Returns a copy with only the version replaced
    pub fn with_version(&self, version: &str) -> Self {
        Self {
            version: version.to_string(),
            ..self.clone()
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn dep_type(&self) -> &str {
        &self.dep_type
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// `groupId:artifactId`, the package name used in the final graph
    pub fn package_name(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    pub fn is_test_scoped(&self) -> bool {
        self.scope.as_deref() == Some("test")
    }

    pub fn is_unknown(&self) -> bool {
        self.group_id == UNKNOWN && self.artifact_id == UNKNOWN && self.version == UNKNOWN
    }
}

impl Default for DependencyIdentity {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for DependencyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.build())
    }
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}
