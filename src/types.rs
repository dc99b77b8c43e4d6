#![forbid(unsafe_code)]

//! Core domain types for semverctl
//!
//! This module defines the version record and the validated identifiers
//! that name where a record is stored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four components of a version record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Major,
    Minor,
    Patch,
    Build,
}

impl Field {
    /// All fields, in evaluation order (most significant first)
    pub const ALL: [Field; 4] = [Field::Major, Field::Minor, Field::Patch, Field::Build];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Major => "major",
            Field::Minor => "minor",
            Field::Patch => "patch",
            Field::Build => "build",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A four-part version: major.minor.patch.build
///
/// The persisted JSON uses capitalized field names (`Major`, `Minor`,
/// `Patch`, `Build`). Missing fields decode as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionRecord {
    #[serde(rename = "Major")]
    pub major: u64,
    #[serde(rename = "Minor")]
    pub minor: u64,
    #[serde(rename = "Patch")]
    pub patch: u64,
    #[serde(rename = "Build")]
    pub build: u64,
}

impl VersionRecord {
    /// Creates a record from its four components
    pub fn new(major: u64, minor: u64, patch: u64, build: u64) -> Self {
        VersionRecord {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Returns the value of a single field
    pub fn get(&self, field: Field) -> u64 {
        match field {
            Field::Major => self.major,
            Field::Minor => self.minor,
            Field::Patch => self.patch,
            Field::Build => self.build,
        }
    }

    /// Returns a mutable reference to a single field
    pub fn get_mut(&mut self, field: Field) -> &mut u64 {
        match field {
            Field::Major => &mut self.major,
            Field::Minor => &mut self.minor,
            Field::Patch => &mut self.patch,
            Field::Build => &mut self.build,
        }
    }

    /// Decodes a record from its persisted JSON form
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Encodes the record into its persisted JSON form
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.patch, self.build)
    }
}

/// Error returned when parsing a canonical version string fails
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version '{0}': expected major.minor.patch.build")]
pub struct ParseVersionError(String);

impl FromStr for VersionRecord {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVersionError(s.to_string());
        let mut parts = s.split('.');
        let mut next = || -> Result<u64, ParseVersionError> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };
        let record = VersionRecord::new(next()?, next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(record)
    }
}

/// A validated container (bucket) name
///
/// Container names are 3-63 characters of lowercase ASCII letters, digits,
/// hyphens and dots, and must start and end with a letter or digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new ContainerId, validating the input
    ///
    /// Returns None if the name does not follow bucket naming rules
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if !(3..=63).contains(&id.len()) {
            return None;
        }
        let edge_ok =
            |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !edge_ok(id.chars().next()) || !edge_ok(id.chars().last()) {
            return None;
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        {
            return None;
        }
        Some(ContainerId(id))
    }

    /// Returns the container name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ContainerId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContainerId::new(value).ok_or_else(|| "Invalid container name".to_string())
    }
}

impl From<ContainerId> for String {
    fn from(id: ContainerId) -> Self {
        id.0
    }
}

/// A validated object key inside a container
///
/// Keys may contain `/` separators but no empty, `.` or `..` segments,
/// no leading slash and no backslashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Creates a new ObjectKey, validating the input
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.is_empty() || key.contains('\\') {
            return None;
        }
        if key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return None;
        }
        Some(ObjectKey(key))
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the `/`-separated segments of the key
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ObjectKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ObjectKey::new(value).ok_or_else(|| "Invalid object key".to_string())
    }
}

impl From<ObjectKey> for String {
    fn from(key: ObjectKey) -> Self {
        key.0
    }
}

/// Where a version record lives: a container plus an object key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    pub container: ContainerId,
    pub key: ObjectKey,
}

impl ObjectLocation {
    pub fn new(container: ContainerId, key: ObjectKey) -> Self {
        ObjectLocation { container, key }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.key)
    }
}
