use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Presenter type enumeration for factory pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

/// Factory for creating output presenters
///
/// Graph documents go to stdout unless an output file was requested.
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use mvn_dep_graph::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_file_presenter_writes_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let presenter = PresenterFactory::create(PresenterType::File(path.clone()));

        presenter.present("{\"schemaVersion\":\"1.3.0\"}").unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("schemaVersion"));
    }

    #[test]
    fn test_file_presenter_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("graph.json");
        let presenter = PresenterFactory::create(PresenterType::File(path));
        assert!(presenter.present("{}").is_err());
    }

    #[test]
    fn test_presenter_type_equality() {
        let stdout1 = PresenterType::Stdout;
        let stdout2 = PresenterType::Stdout;
        assert_eq!(stdout1, stdout2);

        let graph = PresenterType::File(PathBuf::from("graph.json"));
        assert_eq!(graph.clone(), PresenterType::File(PathBuf::from("graph.json")));
        assert_ne!(graph, PresenterType::File(PathBuf::from("graph.md")));
    }
}
