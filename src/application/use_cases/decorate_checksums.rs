use crate::application::dto::ChecksumSummary;
use crate::dep_graph::domain::{DependencyIdentity, PackageGraph, ROOT_NODE_ID};
use crate::ports::outbound::{ChecksumRepository, ProgressReporter};
use futures::future::join_all;
use tracing::{debug, warn};

/// Label key for artifact digests
pub const CHECKSUM_LABEL: &str = "checksum:sha256";

/// ChecksumDecorator - adds artifact digests to materialized nodes
///
/// Lookups run in fixed-size windows: every lookup in a window is awaited
/// together before the next window starts. Placeholders share their
/// package with a materialized node and are not looked up. Decoration only
/// adds labels; a failed lookup is reported and skipped.
pub struct ChecksumDecorator<'a, C: ChecksumRepository> {
    repository: &'a C,
    concurrency: usize,
}

impl<'a, C: ChecksumRepository> ChecksumDecorator<'a, C> {
    /// `concurrency` is clamped to at least 1
    pub fn new(repository: &'a C, concurrency: usize) -> Self {
        Self {
            repository,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn decorate<P: ProgressReporter + ?Sized>(
        &self,
        graph: &mut PackageGraph,
        progress: &P,
    ) -> ChecksumSummary {
        let targets: Vec<(String, DependencyIdentity)> = graph
            .nodes()
            .filter(|(id, node)| *id != ROOT_NODE_ID && !node.is_pruned())
            .map(|(id, _)| (id.to_string(), DependencyIdentity::parse(id)))
            .filter(|(_, identity)| !identity.is_unknown())
            .collect();

        let total = targets.len();
        let mut summary = ChecksumSummary::default();
        let mut done = 0usize;

        for window in targets.chunks(self.concurrency) {
            let lookups = window.iter().map(|(node_id, identity)| async move {
                (node_id, self.repository.fetch_checksum(identity).await)
            });

            for (node_id, result) in join_all(lookups).await {
                match result {
                    Ok(Some(checksum)) => {
                        graph.add_label(node_id, CHECKSUM_LABEL, &checksum);
                        summary.found += 1;
                    }
                    Ok(None) => {
                        debug!(node = %node_id, "no artifact for checksum");
                        summary.missing += 1;
                    }
                    Err(e) => {
                        warn!(node = %node_id, error = %e, "checksum lookup failed");
                        progress.report_error(&format!(
                            "Warning: Failed to compute checksum for {}: {}",
                            node_id, e
                        ));
                        summary.failed += 1;
                    }
                }
            }

            done += window.len();
            progress.report_progress(done, total, Some("Computing artifact checksums..."));
        }

        summary
    }
}
