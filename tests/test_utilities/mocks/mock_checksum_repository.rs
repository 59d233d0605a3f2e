use async_trait::async_trait;
use mvn_dep_graph::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock ChecksumRepository keyed by `groupId:artifactId`
#[derive(Default, Clone)]
pub struct MockChecksumRepository {
    pub checksums: HashMap<String, String>,
    pub failing: HashSet<String>,
    pub calls: Arc<AtomicUsize>,
}

impl MockChecksumRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checksum(mut self, package: &str, sha256: &str) -> Self {
        self.checksums
            .insert(package.to_string(), sha256.to_string());
        self
    }

    pub fn with_failure(mut self, package: &str) -> Self {
        self.failing.insert(package.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChecksumRepository for MockChecksumRepository {
    async fn fetch_checksum(&self, identity: &DependencyIdentity) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let package = identity.package_name();
        if self.failing.contains(&package) {
            anyhow::bail!("Mock checksum failure for {}", package);
        }
        Ok(self.checksums.get(&package).cloned())
    }
}
