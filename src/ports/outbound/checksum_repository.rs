use crate::dep_graph::domain::DependencyIdentity;
use crate::shared::Result;
use async_trait::async_trait;

/// ChecksumRepository port for looking up artifact digests
///
/// # Async Support
/// Lookups may touch the disk or a remote repository, so the port is async.
/// Implementations must be `Send + Sync` to support concurrent lookups.
#[async_trait]
pub trait ChecksumRepository: Send + Sync {
    /// Returns the lowercase hex SHA-256 of the artifact, if it is available
    ///
    /// `Ok(None)` means the artifact is simply not present.
    ///
    /// # Errors
    /// Returns an error if the artifact exists but could not be read
    async fn fetch_checksum(&self, identity: &DependencyIdentity) -> Result<Option<String>>;
}
