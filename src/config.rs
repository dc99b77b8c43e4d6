//! Configuration file parsing and validation

pub mod semverctl_toml;

pub use semverctl_toml::{
    CONFIG_FILE_NAME, Config, LogFormat, LoggingConfig, StoreBackend, StoreConfig,
};
