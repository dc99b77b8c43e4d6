//! Common helper functions shared by the CLI entry points
//!
//! This module provides exit codes, configuration loading with command
//! line overrides, and validation of the bucket/file location.

use crate::cli::args::Cli;
use crate::config::Config;
use crate::error::{ConfigError, VersionError};
use crate::logging::{self, LoggingError};
use crate::types::{ContainerId, ObjectKey, ObjectLocation};

pub const EXIT_SUCCESS: i32 = 0;
/// Unsupported flag combination or invalid bucket/file name
pub const EXIT_USAGE: i32 = 2;
/// A field flag could not be resolved
pub const EXIT_INVALID_FIELD: i32 = 3;
/// Container creation, existence check, read or decode failed
pub const EXIT_STORE: i32 = 4;
/// Writing the updated version failed
pub const EXIT_PERSIST: i32 = 5;
pub const EXIT_CONFIG: i32 = 6;

/// Maps an error to the process exit code
pub fn exit_code_for(error: &VersionError) -> i32 {
    match error {
        VersionError::UnsupportedFlags(_) | VersionError::InvalidLocation(_) => EXIT_USAGE,
        VersionError::Field { .. } => EXIT_INVALID_FIELD,
        VersionError::Store(_) | VersionError::Decode { .. } => EXIT_STORE,
        VersionError::Persist(_) | VersionError::Encode(_) => EXIT_PERSIST,
        VersionError::Config(_) => EXIT_CONFIG,
    }
}

/// Load configuration and apply `--store-root` / `--log-level` overrides
///
/// # Errors
///
/// Returns `ConfigError` if an explicit `--config` file is missing or any
/// configuration file is invalid.
pub(crate) fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = Config::discover(cli.config.as_deref())?;

    if let Some(root) = &cli.store_root {
        config.store.root = root.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Install the tracing subscriber for this process
///
/// A subscriber that is already installed is left in place.
pub(crate) fn init_logging(config: &Config) -> Result<(), ConfigError> {
    match logging::init(&config.logging) {
        Ok(()) | Err(LoggingError::AlreadyInitialized(_)) => Ok(()),
        Err(LoggingError::InvalidFilter(msg)) => Err(ConfigError::Validation(msg)),
    }
}

/// Validate the bucket and file names
pub(crate) fn resolve_location(bucket: &str, file: &str) -> Result<ObjectLocation, VersionError> {
    let container = ContainerId::new(bucket).ok_or_else(|| {
        VersionError::InvalidLocation(format!(
            "bucket '{}' must be 3-63 lowercase letters, digits, '-' or '.', starting and ending with a letter or digit",
            bucket
        ))
    })?;
    let key = ObjectKey::new(file).ok_or_else(|| {
        VersionError::InvalidLocation(format!(
            "file '{}' must be a relative key without empty, '.' or '..' segments",
            file
        ))
    })?;
    Ok(ObjectLocation::new(container, key))
}
