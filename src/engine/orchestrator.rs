//! Version read and update orchestration
//!
//! [`VersionManager`] ties the resolver, the cascade policy and a
//! [`VersionStore`] together. Store calls are sequential: ensure the
//! container, check for the object, read it, and for updates write the
//! new record back. There is no locking; two concurrent updates of the
//! same object can lose one of the writes.

use super::cascade::apply_cascade;
use super::resolver::{FieldMutation, NO_CHANGE};
use crate::error::{StoreError, VersionError};
use crate::store::VersionStore;
use crate::types::{Field, ObjectLocation, VersionRecord};
use tracing::{debug, info};

/// Raw flag values for the four fields
///
/// Absent flags hold the no-change sentinel `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFlags {
    pub major: String,
    pub minor: String,
    pub patch: String,
    pub build: String,
}

impl Default for FieldFlags {
    fn default() -> Self {
        FieldFlags {
            major: NO_CHANGE.to_string(),
            minor: NO_CHANGE.to_string(),
            patch: NO_CHANGE.to_string(),
            build: NO_CHANGE.to_string(),
        }
    }
}

impl FieldFlags {
    /// Builds flags from optional values, substituting `-` for missing ones
    pub fn from_options(
        major: Option<String>,
        minor: Option<String>,
        patch: Option<String>,
        build: Option<String>,
    ) -> Self {
        let or_keep = |value: Option<String>| value.unwrap_or_else(|| NO_CHANGE.to_string());
        FieldFlags {
            major: or_keep(major),
            minor: or_keep(minor),
            patch: or_keep(patch),
            build: or_keep(build),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Major => &self.major,
            Field::Minor => &self.minor,
            Field::Patch => &self.patch,
            Field::Build => &self.build,
        }
    }

    /// Parses all four flags, stopping at the first invalid one
    pub fn parse(&self) -> Result<[(Field, FieldMutation); 4], VersionError> {
        let mut parsed = Field::ALL.map(|field| (field, FieldMutation::Keep));
        for (field, mutation) in parsed.iter_mut() {
            *mutation = FieldMutation::parse(self.get(*field)).map_err(|source| {
                VersionError::Field {
                    field: *field,
                    source,
                }
            })?;
        }
        Ok(parsed)
    }
}

/// An operation against a stored version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Report the stored version
    Get { location: ObjectLocation },
    /// Apply field flags and persist the result
    Update {
        location: ObjectLocation,
        flags: FieldFlags,
    },
}

/// Outcome of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionReport {
    pub record: VersionRecord,
    /// Whether the record was written back to the store
    pub persisted: bool,
}

/// Reads and updates version records through a store
#[derive(Debug)]
pub struct VersionManager<S> {
    store: S,
}

impl<S: VersionStore> VersionManager<S> {
    pub fn new(store: S) -> Self {
        VersionManager { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs a request
    pub fn execute(&self, request: &Request) -> Result<VersionReport, VersionError> {
        match request {
            Request::Get { location } => Ok(VersionReport {
                record: self.get(location)?,
                persisted: false,
            }),
            Request::Update { location, flags } => Ok(VersionReport {
                record: self.update(location, flags)?,
                persisted: true,
            }),
        }
    }

    /// Returns the stored version, or `0.0.0.0` if there is none yet
    ///
    /// Never writes the object.
    pub fn get(&self, location: &ObjectLocation) -> Result<VersionRecord, VersionError> {
        self.load(location)
    }

    /// Applies field flags to the stored version and persists the result
    ///
    /// Flags are validated before the store is touched. Nothing is written
    /// unless every field resolves.
    pub fn update(
        &self,
        location: &ObjectLocation,
        flags: &FieldFlags,
    ) -> Result<VersionRecord, VersionError> {
        let mutations = flags.parse()?;

        let previous = self.load(location)?;
        let mut current = previous;
        for (field, mutation) in mutations {
            let value = mutation
                .apply(current.get(field))
                .map_err(|source| VersionError::Field { field, source })?;
            *current.get_mut(field) = value;
        }

        apply_cascade(&mut current, &previous);

        let bytes = current.to_json().map_err(VersionError::Encode)?;
        self.store
            .put(location, &bytes)
            .map_err(VersionError::Persist)?;

        info!(object = %location, from = %previous, to = %current, "version updated");
        Ok(current)
    }

    fn load(&self, location: &ObjectLocation) -> Result<VersionRecord, VersionError> {
        self.store.ensure_container(&location.container)?;

        if !self.store.exists(location)? {
            debug!(object = %location, "no stored version, using 0.0.0.0");
            return Ok(VersionRecord::default());
        }

        let bytes = match self.store.get(location) {
            Ok(bytes) => bytes,
            Err(StoreError::NotFound(_)) => {
                debug!(object = %location, "object vanished after existence check");
                return Ok(VersionRecord::default());
            }
            Err(e) => return Err(e.into()),
        };

        let record = VersionRecord::from_json(&bytes).map_err(|source| VersionError::Decode {
            location: location.clone(),
            source,
        })?;
        debug!(object = %location, version = %record, "loaded version");
        Ok(record)
    }
}
