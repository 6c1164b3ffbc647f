// ============================================
// File: crates/wirehub-common/src/time.rs
// ============================================
//! # Time Utilities
//!
//! ## Creation Reason
//! Frame headers carry an epoch-millisecond timestamp that the encoder
//! fills in when the caller left it zero. This module owns that clock so
//! every crate stamps time the same way.
//!
//! ## Main Functionality
//! - `unix_timestamp_millis`: current time as unsigned epoch milliseconds
//! - `unix_timestamp`: current time as unsigned epoch seconds
//!
//! ## ⚠️ Important Note for Next Developer
//! - Header timestamps are `u64` milliseconds; do not switch units
//!   without a wire format version bump
//!
//! ## Last Modified
//! v0.1.0 - Initial time utilities

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current Unix timestamp in milliseconds.
///
/// This is the value written into a frame header whose timestamp was
/// still zero at encode time.
#[must_use]
pub fn unix_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Returns the current Unix timestamp in seconds.
#[must_use]
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_millis_nonzero() {
        let ts = unix_timestamp_millis();
        // Well past 2020 in milliseconds
        assert!(ts > 1_577_836_800_000);
    }

    #[test]
    fn test_units_agree() {
        let millis = unix_timestamp_millis();
        let secs = unix_timestamp();
        let diff = (millis / 1000).abs_diff(secs);
        assert!(diff <= 1);
    }
}
