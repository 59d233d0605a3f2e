//! mvn-dep-graph - dependency graph builder for Maven projects
//!
//! This library turns the text printed by `mvn dependency:tree` (digraph or
//! indented form) into a normalized, deduplicated package graph, following
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dep_graph`): identities, graphs and the pure parsing/compaction services
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use mvn_dep_graph::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! let use_case = BuildDepGraphUseCase::new(
//!     FileSystemReader::new(),
//!     None::<LocalRepositoryChecksums>,
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = GraphRequest::new(Some(PathBuf::from("dependency-tree.txt")));
//! let response = use_case.execute(request).await?;
//!
//! let output = JsonFormatter::new().format(&response.modules)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```
//!
//! The pure core can also be used directly:
//!
//! ```
//! use mvn_dep_graph::prelude::*;
//!
//! let block = "digraph \"com.example:app:jar:1.0\" {\n\
//!              \"com.example:app:jar:1.0\" -> \"org.a:b:jar:1.0:compile\" ;\n}";
//! let maven = DigraphBuilder::from_digraph(block, &NoopVersionResolver).unwrap();
//! let graph = GraphCompactor::compact(&maven, false, false);
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.root_pkg().id(), "com.example:app@1.0");
//! ```

pub mod adapters;
pub mod application;
pub mod dep_graph;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::checksums::{
        CachingChecksumRepository, LocalRepositoryChecksums,
    };
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdinReader, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::application::dto::{
        ChecksumSummary, GraphRequest, GraphResponse, InputKind, ModuleGraph, OutputFormat,
    };
    pub use crate::application::use_cases::{BuildDepGraphUseCase, ChecksumDecorator};
    pub use crate::dep_graph::domain::{
        DependencyIdentity, MavenGraph, PackageGraph, PkgInfo, PkgNode,
    };
    pub use crate::dep_graph::policies::DependencyKeyPolicy;
    pub use crate::dep_graph::services::{
        DigraphBuilder, GraphCompactor, NoopVersionResolver, ReportVersionResolver,
        ScopeLabeler, TextSegmenter, TreeBuilder, VersionResolver,
    };
    pub use crate::ports::outbound::{
        ChecksumRepository, DependencyOutputReader, GraphFormatter, OutputPresenter,
        ProgressReporter,
    };
    pub use crate::shared::Result;
}
