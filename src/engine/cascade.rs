//! Cascading reset of lower-order version fields
//!
//! When a field strictly increases relative to the previously stored
//! record, every field below it is reset to zero. Resets are evaluated
//! from the least significant tier upwards, so a major bump always wins
//! over explicit minor/patch/build values given in the same request.

use crate::types::VersionRecord;

/// Zeroes lower-order fields of `current` for every tier that increased
/// relative to `previous`
pub fn apply_cascade(current: &mut VersionRecord, previous: &VersionRecord) {
    if current.patch > previous.patch {
        current.build = 0;
    }

    if current.minor > previous.minor {
        current.patch = 0;
        current.build = 0;
    }

    if current.major > previous.major {
        current.minor = 0;
        current.patch = 0;
        current.build = 0;
    }
}
