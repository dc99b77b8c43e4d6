#![forbid(unsafe_code)]

//! semverctl: a four-part version record kept in an object store
//!
//! The record (`major.minor.patch.build`) lives as a small JSON object in a
//! bucket. Field flags either set a component, add to it, or leave it alone;
//! raising a component resets every component below it.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod store;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, ResolveError, StoreError, VersionError};

// Re-export core domain types for convenient access
pub use types::{ContainerId, Field, ObjectKey, ObjectLocation, VersionRecord};
