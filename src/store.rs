//! Version store port and its adapters
//!
//! The engine only talks to the [`VersionStore`] trait. [`S3ObjectStore`]
//! talks to S3, [`FsObjectStore`] keeps containers as directories under a
//! root, and [`MemoryStore`] keeps everything in process for tests.

pub mod fs;
pub mod memory;
pub mod s3;

pub use fs::FsObjectStore;
pub use memory::{MemoryStore, StoreOperation};
pub use s3::S3ObjectStore;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::StoreError;
use crate::types::{ContainerId, ObjectLocation};

/// Blob storage for serialized version records
///
/// Writes are full overwrites. There is no conditional write; a
/// compare-and-swap variant can be added later as a provided method
/// without breaking existing adapters.
pub trait VersionStore {
    /// Creates the container if it does not exist yet
    fn ensure_container(&self, container: &ContainerId) -> Result<(), StoreError>;

    /// Returns whether the object exists
    ///
    /// Only "not found" maps to `Ok(false)`; any other failure is an error.
    fn exists(&self, location: &ObjectLocation) -> Result<bool, StoreError>;

    /// Reads the raw object contents
    fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StoreError>;

    /// Replaces the object contents
    fn put(&self, location: &ObjectLocation, bytes: &[u8]) -> Result<(), StoreError>;
}

impl<S: VersionStore + ?Sized> VersionStore for Box<S> {
    fn ensure_container(&self, container: &ContainerId) -> Result<(), StoreError> {
        (**self).ensure_container(container)
    }

    fn exists(&self, location: &ObjectLocation) -> Result<bool, StoreError> {
        (**self).exists(location)
    }

    fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StoreError> {
        (**self).get(location)
    }

    fn put(&self, location: &ObjectLocation, bytes: &[u8]) -> Result<(), StoreError> {
        (**self).put(location, bytes)
    }
}

/// Builds the configured store
///
/// # Errors
///
/// Returns `StoreError::Unavailable` if the S3 client cannot be set up.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn VersionStore>, StoreError> {
    match config.backend {
        StoreBackend::Fs => Ok(Box::new(FsObjectStore::new(config.root.clone()))),
        StoreBackend::S3 => Ok(Box::new(S3ObjectStore::connect(config)?)),
    }
}
