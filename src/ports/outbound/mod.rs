/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the graph pipeline uses
/// to interact with external systems (file system, console, artifact storage).
pub mod checksum_repository;
pub mod dependency_output_reader;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;

pub use checksum_repository::ChecksumRepository;
pub use dependency_output_reader::DependencyOutputReader;
pub use formatter::GraphFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
