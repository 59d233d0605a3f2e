use crate::application::dto::{
    ChecksumSummary, GraphRequest, GraphResponse, InputKind, ModuleGraph,
};
use crate::application::use_cases::ChecksumDecorator;
use crate::dep_graph::domain::{DependencyIdentity, MavenGraph};
use crate::dep_graph::services::{
    DigraphBuilder, GraphCompactor, NoopVersionResolver, ReportVersionResolver, ScopeLabeler,
    TextSegmenter, TreeBuilder, VersionResolver,
};
use crate::ports::outbound::{ChecksumRepository, DependencyOutputReader, ProgressReporter};
use crate::shared::error::GraphError;
use crate::shared::Result;
use tracing::{info, warn};

/// BuildDepGraphUseCase - Core use case turning build output into package graphs
///
/// This use case orchestrates the pipeline using generic dependency
/// injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `R` - DependencyOutputReader implementation (tool output and resolve report)
/// * `C` - ChecksumRepository implementation (optional)
/// * `P` - ProgressReporter implementation
pub struct BuildDepGraphUseCase<R, C, P> {
    output_reader: R,
    checksum_repository: Option<C>,
    progress_reporter: P,
}

impl<R, C, P> BuildDepGraphUseCase<R, C, P>
where
    R: DependencyOutputReader,
    C: ChecksumRepository,
    P: ProgressReporter,
{
    /// Creates a new BuildDepGraphUseCase with injected dependencies
    pub fn new(output_reader: R, checksum_repository: Option<C>, progress_reporter: P) -> Self {
        Self {
            output_reader,
            checksum_repository,
            progress_reporter,
        }
    }

    /// Executes the pipeline
    ///
    /// # Errors
    /// Returns an error if the build output cannot be read, contains no
    /// graphs, reports a failed build, or holds a malformed block. A missing
    /// or unreadable resolve report is only a warning.
    pub async fn execute(&self, request: GraphRequest) -> Result<GraphResponse> {
        // Step 1: Read build output
        let output = self.read_build_output(&request)?;

        // Step 2: Load the resolve report, if any
        let resolver = self.load_resolver(&request);

        // Step 3: Split output into per-module blocks
        let blocks = match request.input_kind {
            InputKind::Digraph => TextSegmenter::extract_digraphs(&output)?,
            InputKind::Tree => TextSegmenter::extract_trees(&output)?,
        };
        self.progress_reporter
            .report(&format!("✅ Found {} dependency graph(s)", blocks.len()));

        // Step 4: Build adjacency graphs
        let maven_graphs = if request.aggregate {
            vec![Self::build_aggregated(&blocks, request.input_kind, resolver.as_ref())?]
        } else {
            blocks
                .iter()
                .map(|block| Self::build_module(block, request.input_kind, resolver.as_ref()))
                .collect::<Result<Vec<_>>>()?
        };

        // Step 5: Compact and label
        let mut modules: Vec<ModuleGraph> = maven_graphs
            .iter()
            .map(|maven| self.compact(maven, &request))
            .collect();

        // Step 6: Checksums
        let checksum_summary = self.decorate_checksums(&mut modules, &request).await;

        self.progress_reporter.report_completion(&format!(
            "✅ Built {} package graph(s)",
            modules.len()
        ));

        Ok(GraphResponse::new(
            modules,
            request.aggregate,
            checksum_summary,
        ))
    }

    fn read_build_output(&self, request: &GraphRequest) -> Result<String> {
        match &request.input_path {
            Some(path) => self
                .progress_reporter
                .report(&format!("📖 Reading build output from: {}", path.display())),
            None => self
                .progress_reporter
                .report("📖 Reading build output from stdin"),
        }
        self.output_reader
            .read_output(request.input_path.as_deref())
    }

    /// Falls back to the no-op resolver when the report cannot be read
    fn load_resolver(&self, request: &GraphRequest) -> Box<dyn VersionResolver> {
        let Some(path) = &request.resolve_report_path else {
            return Box::new(NoopVersionResolver);
        };

        match self.output_reader.read_output(Some(path)) {
            Ok(report) => {
                let resolver = ReportVersionResolver::from_report(&report);
                info!(
                    path = %path.display(),
                    projects = resolver.project_ids().len(),
                    "loaded resolve report"
                );
                Box::new(resolver)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "resolve report unavailable");
                self.progress_reporter.report_error(&format!(
                    "Warning: Could not read resolve report {}; RELEASE/LATEST versions stay unresolved: {}",
                    path.display(),
                    e
                ));
                Box::new(NoopVersionResolver)
            }
        }
    }

    fn build_module(
        block: &str,
        kind: InputKind,
        resolver: &dyn VersionResolver,
    ) -> Result<MavenGraph> {
        match kind {
            InputKind::Digraph => DigraphBuilder::from_digraph(block, resolver),
            InputKind::Tree => TreeBuilder::from_tree(block, resolver),
        }
    }

    /// Feeds every block into one builder rooted at the first module
    ///
    /// Every module root is registered up front so that references between
    /// sibling modules land on the module's own node. Later module roots
    /// hang off the aggregated root, so no module drops out of the graph.
    fn build_aggregated(
        blocks: &[String],
        kind: InputKind,
        resolver: &dyn VersionResolver,
    ) -> Result<MavenGraph> {
        let roots = blocks
            .iter()
            .map(|block| match kind {
                InputKind::Digraph => DigraphBuilder::digraph_root(block),
                InputKind::Tree => TreeBuilder::tree_root(block),
            })
            .collect::<Result<Vec<_>>>()?;
        let Some(first_root) = roots.first() else {
            return Err(GraphError::NoGraphsFound.into());
        };

        let project_id = DependencyIdentity::parse(first_root).package_name();
        let mut builder = DigraphBuilder::with_resolver(first_root, resolver, Some(&project_id));
        for root in &roots {
            builder.register_module_root(root);
        }
        let aggregate_root = builder.graph().root_id().to_string();

        for (block, root) in blocks.iter().zip(&roots) {
            if root != first_root {
                builder.connect(&aggregate_root, root);
            }
            match kind {
                InputKind::Digraph => builder.extend_from_digraph(block)?,
                InputKind::Tree => TreeBuilder::extend(&mut builder, block)?,
            }
        }
        Ok(builder.build())
    }

    fn compact(&self, maven: &MavenGraph, request: &GraphRequest) -> ModuleGraph {
        let mut graph =
            GraphCompactor::compact(maven, request.include_test_scope, request.verbose);
        if request.label_scopes {
            ScopeLabeler::label(&mut graph);
        }
        let project_id = DependencyIdentity::parse(maven.root_id()).package_name();
        self.progress_reporter.report(&format!(
            "   - {}: {} package(s), {} node(s), {} pruned",
            project_id,
            graph.pkg_count(),
            graph.node_count(),
            graph.pruned_node_count()
        ));
        ModuleGraph::new(project_id, graph)
    }

    async fn decorate_checksums(
        &self,
        modules: &mut [ModuleGraph],
        request: &GraphRequest,
    ) -> Option<ChecksumSummary> {
        if !request.checksums {
            return None;
        }
        let Some(repository) = &self.checksum_repository else {
            self.progress_reporter
                .report_error("Warning: Checksums requested but no artifact repository is configured");
            return None;
        };

        self.progress_reporter
            .report("🔐 Computing artifact checksums...");
        let decorator = ChecksumDecorator::new(repository, request.checksum_concurrency);
        let mut summary = ChecksumSummary::default();
        for module in modules.iter_mut() {
            summary.merge(
                decorator
                    .decorate(&mut module.graph, &self.progress_reporter)
                    .await,
            );
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Checksums: {} found, {} not in repository, {} failed",
            summary.found, summary.missing, summary.failed
        ));
        Some(summary)
    }
}
