//! Version mutation engine: flag resolution, cascade reset, orchestration

pub mod cascade;
pub mod orchestrator;
pub mod resolver;

pub use cascade::apply_cascade;
pub use orchestrator::{FieldFlags, Request, VersionManager, VersionReport};
pub use resolver::{FieldMutation, NO_CHANGE, resolve};
