/// Use cases module containing application business logic orchestration
mod build_dep_graph;
mod decorate_checksums;

pub use build_dep_graph::BuildDepGraphUseCase;
pub use decorate_checksums::{ChecksumDecorator, CHECKSUM_LABEL};
