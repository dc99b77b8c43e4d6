//! Field flag resolution
//!
//! Every field flag is one of three forms:
//! - `-` leaves the field unchanged
//! - a plain number (`7`) sets the field to that value
//! - `+N` adds `N` to the current value
//!
//! There is no decrement operator. A leading `-` followed by anything is
//! rejected as an invalid operator.

use crate::error::ResolveError;
use std::fmt;

/// Sentinel flag value meaning "leave this field alone"
pub const NO_CHANGE: &str = "-";

/// Parsed form of a single field flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMutation {
    /// Keep the current value
    Keep,
    /// Replace the current value
    Set(u64),
    /// Add to the current value
    Increment(u64),
}

impl FieldMutation {
    /// Parses a flag value into a mutation
    pub fn parse(flag: &str) -> Result<Self, ResolveError> {
        if flag == NO_CHANGE {
            return Ok(FieldMutation::Keep);
        }

        if is_plain_number(flag) {
            return parse_number(flag).map(FieldMutation::Set);
        }

        let mut chars = flag.chars();
        match chars.next() {
            None => Err(ResolveError::Empty),
            Some('+') => {
                let operand = chars.as_str();
                if !is_plain_number(operand) {
                    return Err(ResolveError::NotNumeric(operand.to_string()));
                }
                parse_number(operand).map(FieldMutation::Increment)
            }
            Some(op) => Err(ResolveError::InvalidOperator(op)),
        }
    }

    /// Applies the mutation to the current field value
    pub fn apply(self, current: u64) -> Result<u64, ResolveError> {
        match self {
            FieldMutation::Keep => Ok(current),
            FieldMutation::Set(value) => Ok(value),
            FieldMutation::Increment(delta) => current
                .checked_add(delta)
                .ok_or(ResolveError::Overflow { current, delta }),
        }
    }
}

impl fmt::Display for FieldMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldMutation::Keep => f.write_str(NO_CHANGE),
            FieldMutation::Set(value) => write!(f, "{}", value),
            FieldMutation::Increment(delta) => write!(f, "+{}", delta),
        }
    }
}

/// Resolves a flag value against the current field value
pub fn resolve(flag: &str, current: u64) -> Result<u64, ResolveError> {
    FieldMutation::parse(flag)?.apply(current)
}

/// True for a non-empty run of ASCII digits with no sign
fn is_plain_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_number(digits: &str) -> Result<u64, ResolveError> {
    digits
        .parse()
        .map_err(|_| ResolveError::OutOfRange(digits.to_string()))
}
