//! Test utilities for semverctl integration tests

#![allow(dead_code)]

use semverctl::{ContainerId, ObjectKey, ObjectLocation, VersionRecord};
use std::fs;
use std::path::Path;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Build a location from raw names
pub fn location(bucket: &str, file: &str) -> ObjectLocation {
    ObjectLocation::new(
        assert_some!(ContainerId::new(bucket), "valid bucket"),
        assert_some!(ObjectKey::new(file), "valid key"),
    )
}

/// Write a record into a filesystem store layout
pub fn write_record(root: &Path, bucket: &str, file: &str, record: VersionRecord) {
    let path = root.join(bucket).join(file);
    if let Some(parent) = path.parent() {
        assert_ok!(fs::create_dir_all(parent));
    }
    assert_ok!(fs::write(&path, assert_ok!(record.to_json())));
}

/// Read a record back from a filesystem store layout
pub fn read_record(root: &Path, bucket: &str, file: &str) -> VersionRecord {
    let bytes = assert_ok!(fs::read(root.join(bucket).join(file)), "stored version");
    assert_ok!(VersionRecord::from_json(&bytes))
}
