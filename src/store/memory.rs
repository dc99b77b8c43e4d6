//! In-memory version store
//!
//! Deterministic stand-in for the object store. Counts writes and can be
//! told to fail specific operations so error paths can be exercised
//! without touching the filesystem.

use super::VersionStore;
use crate::error::StoreError;
use crate::types::{ContainerId, ObjectLocation};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

/// Store operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    EnsureContainer,
    Exists,
    Get,
    Put,
}

/// Single-threaded in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    containers: RefCell<HashSet<ContainerId>>,
    objects: RefCell<HashMap<ObjectLocation, Vec<u8>>>,
    failing: RefCell<HashSet<StoreOperation>>,
    puts: Cell<usize>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an object (and its container) without counting a write
    pub fn with_object(self, location: ObjectLocation, bytes: impl Into<Vec<u8>>) -> Self {
        self.containers
            .borrow_mut()
            .insert(location.container.clone());
        self.objects.borrow_mut().insert(location, bytes.into());
        self
    }

    /// Makes every subsequent call of `operation` fail
    pub fn fail_on(&self, operation: StoreOperation) {
        self.failing.borrow_mut().insert(operation);
    }

    /// Number of successful `put` calls
    pub fn put_count(&self) -> usize {
        self.puts.get()
    }

    /// Current contents of an object, if any
    pub fn object(&self, location: &ObjectLocation) -> Option<Vec<u8>> {
        self.objects.borrow().get(location).cloned()
    }

    pub fn has_container(&self, container: &ContainerId) -> bool {
        self.containers.borrow().contains(container)
    }

    fn check(&self, operation: StoreOperation) -> Result<(), StoreError> {
        if self.failing.borrow().contains(&operation) {
            return Err(StoreError::Unavailable(format!(
                "injected failure on {:?}",
                operation
            )));
        }
        Ok(())
    }
}

impl VersionStore for MemoryStore {
    fn ensure_container(&self, container: &ContainerId) -> Result<(), StoreError> {
        self.check(StoreOperation::EnsureContainer)?;
        self.containers.borrow_mut().insert(container.clone());
        Ok(())
    }

    fn exists(&self, location: &ObjectLocation) -> Result<bool, StoreError> {
        self.check(StoreOperation::Exists)?;
        Ok(self.objects.borrow().contains_key(location))
    }

    fn get(&self, location: &ObjectLocation) -> Result<Vec<u8>, StoreError> {
        self.check(StoreOperation::Get)?;
        self.objects
            .borrow()
            .get(location)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(location.clone()))
    }

    fn put(&self, location: &ObjectLocation, bytes: &[u8]) -> Result<(), StoreError> {
        self.check(StoreOperation::Put)?;
        self.objects
            .borrow_mut()
            .insert(location.clone(), bytes.to_vec());
        self.puts.set(self.puts.get() + 1);
        Ok(())
    }
}
