//! CLI argument parsing and command dispatch

pub mod args;
pub mod common;
pub mod dispatch;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, OutputFormat};
pub use dispatch::{Operation, run, select_operation};
