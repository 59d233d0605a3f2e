use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - graph(s) built and written
    Success = 0,
    /// The build tool output reports a failed build
    BuildFailure = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (malformed input, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for an error that aborted the run
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<GraphError>() {
            Some(GraphError::BuildFailure { .. }) => ExitCode::BuildFailure,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::BuildFailure => write!(f, "Build Failure (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency graph construction.
///
/// Parsing errors always carry the fragment that could not be understood,
/// so a partially built graph is never returned silently.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("No dependency graphs found in the build output\n\n💡 Hint: Run `mvn dependency:tree -DoutputType=dot` (or pass --tree for plain tree output)")]
    NoGraphsFound,

    #[error("The build tool reported errors:\n{excerpt}\n\n💡 Hint: Fix the build so that dependency:tree completes with BUILD SUCCESS")]
    BuildFailure { excerpt: String },

    #[error("Unexpected digraph line: {line}")]
    MalformedDigraph { line: String },

    #[error("Unexpected dependency tree line: {line}\nReason: {reason}")]
    MalformedTreeLine { line: String, reason: String },

    #[error("Could not find a root dependency in block: {block}")]
    MissingRoot { block: String },

    #[error("Input file not found: {path}\n\n💡 Hint: {suggestion}")]
    InputNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for configuration and request values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
