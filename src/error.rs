//! Error types for semverctl
//!
//! This module defines the error types used throughout semverctl, following
//! a hierarchical structure with specific error variants for different
//! error categories.

use crate::types::{Field, ObjectLocation};
use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error while reading a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML syntax or unknown keys
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration parsed but failed validation
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Errors raised by a version store adapter
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object does not exist
    #[error("object not found: {0}")]
    NotFound(ObjectLocation),

    /// Filesystem failure inside the object store
    #[error("{operation} failed for {}: {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A request to a remote object store failed
    #[error("{operation} failed for {target}: {message}")]
    Remote {
        operation: &'static str,
        target: String,
        message: String,
    },

    /// The store could not be reached or refused the request
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors produced while resolving a single field flag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The flag value was an empty string
    #[error("invalid input: empty value")]
    Empty,

    /// The leading character is not a supported operator
    #[error("invalid input: {0} is not a valid operator (valid operators [ + ])")]
    InvalidOperator(char),

    /// The operand after the operator is not a plain number
    #[error("invalid input: {0} is not a numeric value")]
    NotNumeric(String),

    /// The number does not fit into a version field
    #[error("invalid input: {0} is out of range")]
    OutOfRange(String),

    /// Applying the increment would exceed the field's range
    #[error("invalid input: {current} + {delta} overflows")]
    Overflow { current: u64, delta: u64 },
}

/// Top-level error type for semverctl
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store failure before or while reading the record
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Store failure while writing the updated record
    #[error("Failed to persist version: {0}")]
    Persist(#[source] StoreError),

    /// A field flag could not be applied
    #[error("Invalid value for {field}: {source}")]
    Field {
        field: Field,
        #[source]
        source: ResolveError,
    },

    /// The stored record is not valid JSON for a version
    #[error("Stored version at {location} is corrupt: {source}")]
    Decode {
        location: ObjectLocation,
        #[source]
        source: serde_json::Error,
    },

    /// The record could not be serialized
    #[error("Failed to encode version: {0}")]
    Encode(#[source] serde_json::Error),

    /// The flags on the command line do not select a supported operation
    #[error("this combination of flags is not supported: {0}")]
    UnsupportedFlags(String),

    /// A bucket or file name failed validation
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContainerId, ObjectKey};

    #[test]
    fn test_resolve_error_messages() {
        assert_eq!(
            ResolveError::InvalidOperator('*').to_string(),
            "invalid input: * is not a valid operator (valid operators [ + ])"
        );
        assert_eq!(
            ResolveError::NotNumeric("abc".to_string()).to_string(),
            "invalid input: abc is not a numeric value"
        );
    }

    #[test]
    fn test_field_error_names_field() {
        let err = VersionError::Field {
            field: Field::Minor,
            source: ResolveError::InvalidOperator('-'),
        };
        assert!(err.to_string().starts_with("Invalid value for minor:"));
    }

    #[test]
    fn test_not_found_display() {
        let location = ObjectLocation::new(
            ContainerId::new("releases").unwrap(),
            ObjectKey::new("app/version.json").unwrap(),
        );
        let err = StoreError::NotFound(location);
        assert_eq!(err.to_string(), "object not found: releases/app/version.json");
    }
}
