#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Emits a single `version` record per invocation, terminated by a newline.

use crate::engine::VersionReport;
use crate::error::VersionError;
use crate::types::ObjectLocation;
use serde::Serialize;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format a report as one JSON line
    pub fn format(
        &self,
        location: &ObjectLocation,
        report: &VersionReport,
    ) -> Result<String, VersionError> {
        let record = VersionLine {
            record_type: "version",
            version: report.record.to_string(),
            major: report.record.major,
            minor: report.record.minor,
            patch: report.record.patch,
            build: report.record.build,
            bucket: location.container.as_str(),
            file: location.key.as_str(),
            persisted: report.persisted,
        };

        let mut json = serde_json::to_string(&record).map_err(VersionError::Encode)?;
        json.push('\n');
        Ok(json)
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Version record for JSONL output
#[derive(Debug, Serialize)]
struct VersionLine<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    version: String,
    major: u64,
    minor: u64,
    patch: u64,
    build: u64,
    bucket: &'a str,
    file: &'a str,
    persisted: bool,
}
