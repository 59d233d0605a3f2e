/// Mock implementations for testing
mod mock_checksum_repository;
mod mock_output_reader;
mod mock_progress_reporter;

pub use mock_checksum_repository::MockChecksumRepository;
pub use mock_output_reader::MockOutputReader;
pub use mock_progress_reporter::MockProgressReporter;
