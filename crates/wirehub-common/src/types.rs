// ============================================
// File: crates/wirehub-common/src/types.rs
// ============================================
//! # Core Type Definitions
//!
//! ## Creation Reason
//! Defines the 16-byte wire identifier used for message IDs and peer
//! identities throughout the WireHub protocol, ensuring a single
//! consistent representation on the wire and in memory.
//!
//! ## Main Functionality
//! - `WireId`: 16-byte unique identifier (message ID, sender, receiver)
//! - Conversions to/from raw bytes and base64 text
//! - Serde support (base64 for human-readable formats, raw bytes otherwise)
//!
//! ## Main Logical Flow
//! 1. Transports generate a random `WireId` as their default sender identity
//! 2. Applications stamp message and receiver IDs into frame headers
//! 3. The codec copies the raw 16 bytes directly into the wire format
//!
//! ## ⚠️ Important Note for Next Developer
//! - The zero identifier is meaningful: a non-broadcast header carries a
//!   zero receiver, so `is_zero` must stay cheap and exact
//! - Wire format is the raw 16 bytes; base64 is for display only
//!
//! ## Last Modified
//! v0.1.0 - Initial type definitions

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::CommonError;

// ============================================
// Constants
// ============================================

/// Size of a `WireId` in bytes.
pub const WIRE_ID_SIZE: usize = 16;

// ============================================
// WireId
// ============================================

/// 16-byte unique identifier carried in frame headers.
///
/// Used for three distinct roles that share one representation:
/// the per-message ID, the sender identity, and the broadcast receiver.
///
/// # Wire Format
/// ```text
/// ┌────────────────────────────────────┐
/// │        Wire ID (16 bytes)          │
/// │   copied verbatim into the header  │
/// └────────────────────────────────────┘
/// ```
///
/// # Example
/// ```
/// use wirehub_common::types::WireId;
///
/// let id = WireId::generate();
/// let restored = WireId::from_bytes(id.as_bytes()).unwrap();
/// assert_eq!(id, restored);
/// assert!(!id.is_zero());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WireId([u8; WIRE_ID_SIZE]);

impl WireId {
    /// Creates a `WireId` from raw bytes.
    ///
    /// # Returns
    /// - `Some(WireId)` if the slice is exactly 16 bytes
    /// - `None` otherwise
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != WIRE_ID_SIZE {
            return None;
        }
        let mut id = [0u8; WIRE_ID_SIZE];
        id.copy_from_slice(bytes);
        Some(Self(id))
    }

    /// Creates a `WireId` from a fixed 16-byte array.
    #[must_use]
    pub const fn from_array(bytes: [u8; WIRE_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Generates a new random `WireId`.
    #[must_use]
    pub fn generate() -> Self {
        let mut id = [0u8; WIRE_ID_SIZE];
        rand::thread_rng().fill_bytes(&mut id);
        Self(id)
    }

    /// Returns the all-zero identifier.
    ///
    /// A zero receiver marks a header as having no explicit receiver.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; WIRE_ID_SIZE])
    }

    /// Returns `true` if every byte is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; WIRE_ID_SIZE]
    }

    /// Returns the raw bytes of the identifier.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; WIRE_ID_SIZE] {
        &self.0
    }
}

impl fmt::Debug for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only show first 4 bytes in debug output
        write!(
            f,
            "WireId({:02x}{:02x}{:02x}{:02x}...)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", BASE64.encode(self.0))
    }
}

impl FromStr for WireId {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = BASE64.decode(s)?;
        Self::from_bytes(&bytes)
            .ok_or(CommonError::invalid_length(WIRE_ID_SIZE, bytes.len()))
    }
}

impl Serialize for WireId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&BASE64.encode(self.0))
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for WireId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            Self::from_bytes(&bytes).ok_or_else(|| {
                serde::de::Error::invalid_length(bytes.len(), &"16 bytes")
            })
        }
    }
}

impl AsRef<[u8]> for WireId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// ============================================
// Tests
// ============================================
