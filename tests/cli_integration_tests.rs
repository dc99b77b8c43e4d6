//! CLI integration tests
//!
//! These run the `semverctl` binary against a temporary store root and
//! check stdout, stderr and exit codes for every path:
//! - --details on missing and existing records
//! - updates with set, increment and no-change values
//! - unsupported flag combinations
//! - invalid field values and locations
//! - configuration file discovery and errors

#[macro_use]
mod common;

use assert_cmd::Command;
use common::{read_record, write_record};
use predicates::prelude::*;
use semverctl::VersionRecord;
use semverctl::cli::common::{
    EXIT_CONFIG, EXIT_INVALID_FIELD, EXIT_PERSIST, EXIT_STORE, EXIT_USAGE,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Command preloaded with a store root and the `releases/version.json` location
fn semverctl(root: &Path) -> Command {
    let mut cmd = assert_ok!(Command::cargo_bin("semverctl"));
    cmd.current_dir(root)
        .env_remove("RUST_LOG")
        .arg("--store-root")
        .arg(root.join("store"))
        .args(["--bucket", "releases", "--file", "version.json"]);
    cmd
}

fn store_root(temp: &TempDir) -> std::path::PathBuf {
    temp.path().join("store")
}

// ============================================================================
// DETAILS
// ============================================================================

#[test]
fn test_details_on_missing_record_prints_zero() {
    let temp = TempDir::new().unwrap();

    semverctl(temp.path())
        .arg("--details")
        .assert()
        .success()
        .stdout("0.0.0.0\n");

    assert!(!store_root(&temp).join("releases/version.json").exists());
}

#[test]
fn test_details_on_existing_record() {
    let temp = TempDir::new().unwrap();
    write_record(
        &store_root(&temp),
        "releases",
        "version.json",
        VersionRecord::new(4, 3, 2, 1),
    );

    semverctl(temp.path())
        .arg("--details")
        .assert()
        .success()
        .stdout("4.3.2.1\n");
}

#[test]
fn test_details_jsonl_output() {
    let temp = TempDir::new().unwrap();
    write_record(
        &store_root(&temp),
        "releases",
        "version.json",
        VersionRecord::new(1, 2, 3, 4),
    );

    let output = semverctl(temp.path())
        .args(["--details", "--format", "jsonl"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let line = String::from_utf8(output).unwrap();
    let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(value["version"], "1.2.3.4");
    assert_eq!(value["persisted"], false);
}

// ============================================================================
// UPDATE
// ============================================================================

#[test]
fn test_update_build_increment() {
    let temp = TempDir::new().unwrap();
    write_record(
        &store_root(&temp),
        "releases",
        "version.json",
        VersionRecord::new(1, 0, 0, 0),
    );

    semverctl(temp.path())
        .args(["--major", "-", "--minor", "-", "--patch", "-", "--build", "+1"])
        .assert()
        .success()
        .stdout("1.0.0.1\n");

    assert_eq!(
        read_record(&store_root(&temp), "releases", "version.json"),
        VersionRecord::new(1, 0, 0, 1)
    );
}

#[test]
fn test_update_creates_record_from_zero() {
    let temp = TempDir::new().unwrap();

    semverctl(temp.path())
        .args(["--major", "-", "--minor", "+1", "--patch", "-", "--build", "-"])
        .assert()
        .success()
        .stdout("0.1.0.0\n");

    let stored = fs::read_to_string(store_root(&temp).join("releases/version.json")).unwrap();
    assert_eq!(stored, r#"{"Major":0,"Minor":1,"Patch":0,"Build":0}"#);
}

#[test]
fn test_update_major_bump_discards_explicit_lower_values() {
    let temp = TempDir::new().unwrap();
    write_record(
        &store_root(&temp),
        "releases",
        "version.json",
        VersionRecord::new(1, 2, 3, 4),
    );

    semverctl(temp.path())
        .args(["--major", "2", "--minor", "5", "--patch", "9", "--build", "9"])
        .assert()
        .success()
        .stdout("2.0.0.0\n");
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_partial_flags_rejected_without_store_access() {
    let temp = TempDir::new().unwrap();

    semverctl(temp.path())
        .args(["--major", "+1"])
        .assert()
        .code(EXIT_USAGE)
        .stdout("")
        .stderr(predicate::str::contains(
            "this combination of flags is not supported",
        ));

    assert!(!store_root(&temp).exists());
}

#[test]
fn test_details_with_field_flags_rejected() {
    let temp = TempDir::new().unwrap();

    semverctl(temp.path())
        .args([
            "--details", "--major", "1", "--minor", "1", "--patch", "1", "--build", "1",
        ])
        .assert()
        .code(EXIT_USAGE);

    assert!(!store_root(&temp).exists());
}

#[test]
fn test_invalid_operator_reports_field() {
    let temp = TempDir::new().unwrap();
    write_record(
        &store_root(&temp),
        "releases",
        "version.json",
        VersionRecord::new(1, 0, 0, 0),
    );

    semverctl(temp.path())
        .args(["--major", "-", "--minor", "*3", "--patch", "-", "--build", "-"])
        .assert()
        .code(EXIT_INVALID_FIELD)
        .stderr(predicate::str::contains(
            "Invalid value for minor: invalid input: * is not a valid operator",
        ));

    assert_eq!(
        read_record(&store_root(&temp), "releases", "version.json"),
        VersionRecord::new(1, 0, 0, 0)
    );
}

#[test]
fn test_negative_value_is_invalid_operator() {
    let temp = TempDir::new().unwrap();

    semverctl(temp.path())
        .args(["--major", "-", "--minor", "-", "--patch", "-", "--build", "-1"])
        .assert()
        .code(EXIT_INVALID_FIELD)
        .stderr(predicate::str::contains("- is not a valid operator"));
}

#[test]
fn test_invalid_bucket_name() {
    let temp = TempDir::new().unwrap();
    let mut cmd = assert_ok!(Command::cargo_bin("semverctl"));
    cmd.current_dir(temp.path())
        .arg("--store-root")
        .arg(temp.path().join("store"))
        .args(["--bucket", "Bad_Bucket", "--file", "v", "--details"])
        .assert()
        .code(EXIT_USAGE)
        .stderr(predicate::str::contains("Invalid location"));
}

#[test]
fn test_corrupt_record_is_store_error() {
    let temp = TempDir::new().unwrap();
    let dir = store_root(&temp).join("releases");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("version.json"), "garbage").unwrap();

    semverctl(temp.path())
        .arg("--details")
        .assert()
        .code(EXIT_STORE)
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn test_container_path_blocked_is_store_error() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(store_root(&temp)).unwrap();
    fs::write(store_root(&temp).join("releases"), "not a directory").unwrap();

    semverctl(temp.path())
        .arg("--details")
        .assert()
        .code(EXIT_STORE);
}

#[test]
fn test_object_path_that_is_a_directory_is_store_error() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(store_root(&temp).join("releases/version.json")).unwrap();

    semverctl(temp.path())
        .arg("--details")
        .assert()
        .code(EXIT_STORE)
        .stdout("")
        .stderr(predicate::str::contains("is not a file"));

    semverctl(temp.path())
        .args(["--major", "+1", "--minor", "-", "--patch", "-", "--build", "-"])
        .assert()
        .code(EXIT_STORE);
}

#[test]
fn test_blocked_staging_directory_is_persist_error() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(store_root(&temp)).unwrap();
    fs::write(store_root(&temp).join(".staging"), "not a directory").unwrap();

    semverctl(temp.path())
        .args(["--major", "+1", "--minor", "-", "--patch", "-", "--build", "-"])
        .assert()
        .code(EXIT_PERSIST)
        .stderr(predicate::str::contains("Failed to persist version"));

    assert!(!store_root(&temp).join("releases/version.json").exists());
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_config_file_in_working_directory_sets_store_root() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("semverctl.toml"),
        "[store]\nroot = \"versions\"\n",
    )
    .unwrap();

    let mut cmd = assert_ok!(Command::cargo_bin("semverctl"));
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .args(["--bucket", "releases", "--file", "version.json"])
        .args(["--major", "1", "--minor", "-", "--patch", "-", "--build", "-"])
        .assert()
        .success()
        .stdout("1.0.0.0\n");

    assert!(temp.path().join("versions/releases/version.json").is_file());
}

#[test]
fn test_s3_backend_unreachable_is_store_error() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("semverctl.toml"),
        "[store]\nbackend = \"s3\"\nregion = \"us-east-1\"\nendpoint = \"http://127.0.0.1:9\"\n",
    )
    .unwrap();

    let mut cmd = assert_ok!(Command::cargo_bin("semverctl"));
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .env("AWS_ACCESS_KEY_ID", "test")
        .env("AWS_SECRET_ACCESS_KEY", "test")
        .env("AWS_MAX_ATTEMPTS", "1")
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .env("AWS_CONFIG_FILE", temp.path().join("absent-config"))
        .env("AWS_SHARED_CREDENTIALS_FILE", temp.path().join("absent-credentials"))
        .args(["--bucket", "releases", "--file", "version.json", "--details"])
        .assert()
        .code(EXIT_STORE)
        .stdout("")
        .stderr(predicate::str::contains("head bucket failed for releases"));
}

#[test]
fn test_missing_explicit_config_is_config_error() {
    let temp = TempDir::new().unwrap();

    semverctl(temp.path())
        .args(["--details", "--config", "absent.toml"])
        .assert()
        .code(EXIT_CONFIG)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_invalid_config_is_config_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("semverctl.toml"), "[store]\nbucket = 1\n").unwrap();

    semverctl(temp.path())
        .arg("--details")
        .assert()
        .code(EXIT_CONFIG);
}

#[test]
fn test_missing_required_flags_is_usage_error() {
    let mut cmd = assert_ok!(Command::cargo_bin("semverctl"));
    cmd.arg("--details").assert().code(EXIT_USAGE);
}

#[test]
fn test_version_flag() {
    let mut cmd = assert_ok!(Command::cargo_bin("semverctl"));
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
