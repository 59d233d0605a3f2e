/// Shared utilities used across layers: error types, the Result alias,
/// and file security checks.
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
