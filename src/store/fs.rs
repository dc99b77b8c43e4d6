//! Filesystem object store
//!
//! Layout: `<root>/<container>/<key>`. Keys containing `/` map to nested
//! directories. Objects are written to `<root>/.staging` first and then
//! renamed over the target. Container names start with an alphanumeric
//! character, so the staging directory never collides with a container.

use super::VersionStore;
use crate::error::StoreError;
use crate::types::{ContainerId, ObjectLocation};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

const STAGING_DIR: &str = ".staging";

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Object store backed by a local (or mounted) directory
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Create a store rooted at `root`
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn container_path(&self, container: &ContainerId) -> PathBuf {
        self.root.join(container.as_str())
    }

    fn object_path(&self, location: &ObjectLocation) -> PathBuf {
        let mut path = self.container_path(&location.container);
        path.extend(location.key.segments());
        path
    }

    fn staging_path(&self) -> PathBuf {
        let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
        self.root
            .join(STAGING_DIR)
            .join(format!("{}-{}.tmp", process::id(), seq))
    }

    fn io_error(operation: &'static str, path: PathBuf, source: std::io::Error) -> StoreError {
        StoreError::Io {
            operation,
            path,
            source,
        }
    }
}

impl VersionStore for FsObjectStore {
    fn ensure_container(&self, container: &ContainerId) -> Result<(), StoreError> {
        let path = self.container_path(container);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => return Ok(()),
            Ok(_) => {
                return Err(StoreError::Unavailable(format!(
                    "container path {} is not a directory",
                    path.display()
                )));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(Self::io_error("inspect container", path, e)),
        }

        debug!(container = %container, path = %path.display(), "creating container");
        fs::create_dir_all(&path).map_err(|e| Self::io_error("create container", path, e))
    }

    fn exists(&self, location: &ObjectLocation) -> Result<bool, StoreError> {
        let path = self.object_path(location);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(true),
            Ok(_) => Err(StoreError::Unavailable(format!(
                "object path {} is not a file",
                path.display()
            ))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Self::io_error("inspect object", path, e)),
        }
    }

    fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StoreError> {
        let path = self.object_path(location);
        debug!(object = %location, "reading object");
        fs::read(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(location.clone())
            } else {
                Self::io_error("read object", path, e)
            }
        })
    }

    fn put(&self, location: &ObjectLocation, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.object_path(location);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Self::io_error("create directory", parent.to_path_buf(), e))?;
        }

        let staging = self.staging_path();
        if let Some(staging_dir) = staging.parent() {
            fs::create_dir_all(staging_dir).map_err(|e| {
                Self::io_error("create staging directory", staging_dir.to_path_buf(), e)
            })?;
        }

        debug!(
            object = %location,
            bytes = bytes.len(),
            staging = %staging.display(),
            "writing object"
        );
        if let Err(e) = fs::write(&staging, bytes) {
            let _ = fs::remove_file(&staging);
            return Err(Self::io_error("write object", staging, e));
        }
        fs::rename(&staging, &path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            Self::io_error("replace object", path, e)
        })
    }
}
