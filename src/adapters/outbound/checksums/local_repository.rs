use crate::dep_graph::domain::DependencyIdentity;
use crate::dep_graph::policies::DependencyKeyPolicy;
use crate::ports::outbound::ChecksumRepository;
use crate::shared::error::GraphError;
use crate::shared::security::validate_file_size;
use crate::shared::Result;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

/// Largest artifact that is hashed (1 GiB)
const MAX_ARTIFACT_SIZE: u64 = 1024 * 1024 * 1024;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// LocalRepositoryChecksums adapter hashing artifacts in a local Maven repository
///
/// Artifacts are looked up at the standard layout
/// `<repo>/<group path>/<artifact>/<version>/<artifact>-<version>[-<classifier>].<ext>`.
/// Missing artifacts are `Ok(None)`; only unreadable files are errors.
pub struct LocalRepositoryChecksums {
    root: PathBuf,
}

impl LocalRepositoryChecksums {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$HOME/.m2/repository`, if `HOME` is set
    pub fn default_location() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| Path::new(&home).join(".m2").join("repository"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the artifact file, or `None` for coordinates that cannot name one
    ///
    /// Every coordinate field must be a single plain path component, so the
    /// result always stays below the repository root.
    pub fn artifact_path(&self, identity: &DependencyIdentity) -> Option<PathBuf> {
        if identity.is_unknown() || DependencyKeyPolicy::is_metaversion(identity.version()) {
            return None;
        }
        let components = identity
            .group_id()
            .split('.')
            .chain([identity.artifact_id(), identity.version(), identity.dep_type()])
            .chain(identity.classifier());
        if let Some(bad) = components.into_iter().find(|c| !is_plain_component(c)) {
            warn!(coordinate = %identity, component = bad, "coordinate does not name a repository path");
            return None;
        }

        let (extension, implied_classifier) = match identity.dep_type() {
            "test-jar" => ("jar", Some("tests")),
            "bundle" | "maven-plugin" | "ejb" => ("jar", None),
            other => (other, None),
        };
        let classifier = identity.classifier().or(implied_classifier);
        let file_name = match classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                identity.artifact_id(),
                identity.version(),
                classifier,
                extension
            ),
            None => format!(
                "{}-{}.{}",
                identity.artifact_id(),
                identity.version(),
                extension
            ),
        };

        let mut path = self.root.clone();
        path.extend(identity.group_id().split('.'));
        path.push(identity.artifact_id());
        path.push(identity.version());
        path.push(file_name);
        Some(path)
    }
}

#[async_trait]
impl ChecksumRepository for LocalRepositoryChecksums {
    async fn fetch_checksum(&self, identity: &DependencyIdentity) -> Result<Option<String>> {
        let Some(path) = self.artifact_path(identity) else {
            return Ok(None);
        };

        let metadata = match tokio::fs::symlink_metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "artifact not in local repository");
                return Ok(None);
            }
            Err(e) => {
                return Err(GraphError::FileReadError {
                    path,
                    details: e.to_string(),
                }
                .into())
            }
        };
        if metadata.is_symlink() {
            return Err(GraphError::SecurityError {
                path,
                reason: "artifact is a symbolic link".to_string(),
                hint: "Point --repository at a repository holding real files".to_string(),
            }
            .into());
        }
        if !metadata.is_file() {
            return Err(GraphError::FileReadError {
                path,
                details: "artifact is not a regular file".to_string(),
            }
            .into());
        }
        validate_file_size(metadata.len(), &path, MAX_ARTIFACT_SIZE)?;

        match hash_file(&path).await {
            Ok(checksum) => Ok(Some(checksum)),
            Err(e) => Err(GraphError::FileReadError {
                path,
                details: e.to_string(),
            }
            .into()),
        }
    }
}

/// Streams the file through SHA-256
async fn hash_file(path: &Path) -> std::io::Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let read = file.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn is_plain_component(component: &str) -> bool {
    !component.is_empty()
        && component != "."
        && component != ".."
        && !component.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// SHA-256 of the ASCII bytes `hello`
    const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

    fn install(root: &Path, relative: &str, content: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_artifact_path_layout() {
        let repo = LocalRepositoryChecksums::new("/repo");
        let identity = DependencyIdentity::parse("org.apache.commons:commons-lang3:jar:3.14.0:compile");
        assert_eq!(
            repo.artifact_path(&identity).unwrap(),
            PathBuf::from("/repo/org/apache/commons/commons-lang3/3.14.0/commons-lang3-3.14.0.jar")
        );
    }

    #[test]
    fn test_artifact_path_with_classifier_and_test_jar() {
        let repo = LocalRepositoryChecksums::new("/repo");
        let native = DependencyIdentity::parse("io.netty:netty-tcnative:jar:linux-x86_64:2.0.0:runtime");
        assert!(repo
            .artifact_path(&native)
            .unwrap()
            .ends_with("netty-tcnative-2.0.0-linux-x86_64.jar"));

        let tests = DependencyIdentity::parse("com.example:core:test-jar:1.0:test");
        assert!(repo
            .artifact_path(&tests)
            .unwrap()
            .ends_with("core-1.0-tests.jar"));
    }

    #[test]
    fn test_artifact_path_skips_unresolvable() {
        let repo = LocalRepositoryChecksums::new("/repo");
        assert!(repo.artifact_path(&DependencyIdentity::unknown()).is_none());
        assert!(repo
            .artifact_path(&DependencyIdentity::parse("org.a:b:jar:LATEST:compile"))
            .is_none());
    }

    #[test]
    fn test_artifact_path_rejects_traversal() {
        let repo = LocalRepositoryChecksums::new("/repo");
        for coordinate in [
            "org.a:..:jar:1.0:compile",
            "org.a:b:jar:../../../etc:compile",
            "org..a:b:jar:1.0:compile",
            "org.a:b:jar:/etc/passwd:compile",
            "org.a:b:jar:x/../../y:1.0:compile",
        ] {
            let identity = DependencyIdentity::parse(coordinate);
            assert!(repo.artifact_path(&identity).is_none(), "{}", coordinate);
        }
    }

    #[tokio::test]
    async fn test_fetch_checksum_hashes_artifact() {
        let temp_dir = TempDir::new().unwrap();
        install(temp_dir.path(), "org/a/b/1.0/b-1.0.jar", b"hello");

        let repo = LocalRepositoryChecksums::new(temp_dir.path());
        let checksum = repo
            .fetch_checksum(&DependencyIdentity::parse("org.a:b:jar:1.0:compile"))
            .await
            .unwrap();

        assert_eq!(checksum.as_deref(), Some(HELLO_SHA256));
    }

    #[tokio::test]
    async fn test_fetch_checksum_missing_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let repo = LocalRepositoryChecksums::new(temp_dir.path());

        let checksum = repo
            .fetch_checksum(&DependencyIdentity::parse("org.a:b:jar:1.0:compile"))
            .await
            .unwrap();

        assert!(checksum.is_none());
    }

    #[tokio::test]
    async fn test_fetch_checksum_unreadable_is_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the jar should be cannot be read as a file
        fs::create_dir_all(temp_dir.path().join("org/a/b/1.0/b-1.0.jar")).unwrap();

        let repo = LocalRepositoryChecksums::new(temp_dir.path());
        let result = repo
            .fetch_checksum(&DependencyIdentity::parse("org.a:b:jar:1.0:compile"))
            .await;

        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_checksum_rejects_symlinked_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let outside = temp_dir.path().join("outside.txt");
        fs::write(&outside, b"hello").unwrap();
        let link = temp_dir.path().join("repo/org/a/b/1.0/b-1.0.jar");
        fs::create_dir_all(link.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&outside, &link).unwrap();

        let repo = LocalRepositoryChecksums::new(temp_dir.path().join("repo"));
        let err = repo
            .fetch_checksum(&DependencyIdentity::parse("org.a:b:jar:1.0:compile"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GraphError>(),
            Some(GraphError::SecurityError { .. })
        ));
    }
}
