use crate::dep_graph::domain::DependencyIdentity;

/// Metaversion tokens that trigger a lookup in the resolve report
const METAVERSIONS: [&str; 2] = ["RELEASE", "LATEST"];

/// DependencyKeyPolicy - decides when two coordinates denote the same
/// logical dependency, and which versions are floating placeholders
///
/// Non-verbose graphs treat `group:artifact:type:classifier` as one
/// dependency regardless of version or scope. Verbose graphs keep every
/// version/scope combination apart, since verbose tree output shows the
/// losing sides of conflicts.
pub struct DependencyKeyPolicy;

impl DependencyKeyPolicy {
    /// Key under which a dependency is materialized at most once
    pub fn visited_key(identity: &DependencyIdentity, verbose: bool) -> String {
        let base = format!(
            "{}:{}:{}:{}",
            identity.group_id(),
            identity.artifact_id(),
            identity.dep_type(),
            identity.classifier().unwrap_or_default()
        );
        if verbose {
            format!(
                "{}:{}:{}",
                base,
                identity.version(),
                identity.scope().unwrap_or_default()
            )
        } else {
            base
        }
    }

    /// True for exactly `RELEASE` and `LATEST` (case-sensitive)
    pub fn is_metaversion(version: &str) -> bool {
        METAVERSIONS.contains(&version)
    }
}
