use crate::dep_graph::domain::DependencyIdentity;
use crate::ports::outbound::ChecksumRepository;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingChecksumRepository wraps a ChecksumRepository and memoizes lookups
///
/// The same artifact often appears in several module graphs; each one is
/// hashed once per run. Misses (`None`) are cached too, errors are not.
pub struct CachingChecksumRepository<R: ChecksumRepository> {
    inner: R,
    cache: Arc<DashMap<String, Option<String>>>,
}

impl<R: ChecksumRepository> CachingChecksumRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Artifact identity without scope; scope does not change the file
    fn cache_key(identity: &DependencyIdentity) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            identity.group_id(),
            identity.artifact_id(),
            identity.dep_type(),
            identity.classifier().unwrap_or_default(),
            identity.version()
        )
    }
}

#[async_trait]
impl<R: ChecksumRepository> ChecksumRepository for CachingChecksumRepository<R> {
    async fn fetch_checksum(&self, identity: &DependencyIdentity) -> Result<Option<String>> {
        let key = Self::cache_key(identity);

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        let checksum = self.inner.fetch_checksum(identity).await?;
        self.cache.insert(key, checksum.clone());
        Ok(checksum)
    }
}
