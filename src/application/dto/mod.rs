/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the graph model isolated.
mod graph_request;
mod graph_response;
mod output_format;

pub use graph_request::{GraphRequest, InputKind, DEFAULT_CHECKSUM_CONCURRENCY};
pub use graph_response::{ChecksumSummary, GraphResponse, ModuleGraph};
pub use output_format::OutputFormat;
