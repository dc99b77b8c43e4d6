//! Parsing and validation for semverctl.toml configuration files

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "semverctl.toml";

/// Main configuration struct for semverctl.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Object store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for an invocation
    ///
    /// An explicit path must exist. Without one, `semverctl.toml` in the
    /// working directory is used when present, otherwise the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "store.root must not be empty".to_string(),
            ));
        }

        for (key, value) in [
            ("store.region", &self.store.region),
            ("store.endpoint", &self.store.endpoint),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::Validation(format!("{} must not be empty", key)));
            }
        }

        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid logging.level '{}': {}",
                self.logging.level, e
            ))
        })?;

        Ok(())
    }
}

/// Which adapter backs the version store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Directories under `store.root`
    #[default]
    Fs,
    /// S3 or an S3-compatible server
    S3,
}

/// Object store section
///
/// Passed explicitly to the store factory. The S3 backend additionally
/// consults the AWS provider chain for credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory that holds one sub-directory per container
    #[serde(default = "default_store_root")]
    pub root: PathBuf,

    /// AWS region, overriding the provider chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Custom S3 endpoint URL; enables path-style addressing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            backend: StoreBackend::default(),
            root: default_store_root(),
            region: None,
            endpoint: None,
        }
    }
}

fn default_store_root() -> PathBuf {
    PathBuf::from(".semverctl")
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn` or `semverctl=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
