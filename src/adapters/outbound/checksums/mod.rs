/// Checksum adapters backed by a local Maven repository
mod caching_checksum_repository;
mod local_repository;

pub use caching_checksum_repository::CachingChecksumRepository;
pub use local_repository::LocalRepositoryChecksums;
