// ============================================
// File: crates/wirehub-core/src/error.rs
// ============================================
//! # Core Error Types
//!
//! ## Creation Reason
//! Defines the typed failures of the protocol layer: header decode
//! violations, integrity mismatches, and truncated frames. These are the
//! failure modes the wire format exposes to its callers.
//!
//! ## Main Functionality
//! - `CoreError`: primary error enum for codec and framing operations
//! - Classification helpers for callers deciding connection fate
//!
//! ## Error Categories
//! 1. **Decode Errors**: header size bounds, consumed-byte mismatch,
//!    unknown discriminant bytes
//! 2. **Integrity Errors**: CRC32 trailer disagreement
//! 3. **Framing Errors**: fewer bytes than the frame claims to contain
//!
//! ## ⚠️ Important Note for Next Developer
//! - A `Truncated` or `ChecksumMismatch` on a byte stream means the
//!   stream may be unaligned; callers should drop the connection
//! - The same errors on a datagram are per-packet and recoverable
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

// ============================================
// Result Type Alias
// ============================================

/// Result type for protocol core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

// ============================================
// CoreError
// ============================================

/// Protocol layer error types.
///
/// # Categories
/// - **Decode**: malformed or out-of-bounds header bytes
/// - **Integrity**: payload checksum failure
/// - **Framing**: incomplete frame data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    // ========================================
    // Decode Errors
    // ========================================

    /// Encoded header length is outside the valid range.
    #[error("Invalid header size: got {actual}, valid range [{min}, {max}]")]
    HeaderSize {
        /// Length of the header bytes received
        actual: usize,
        /// Minimum valid encoded header size
        min: usize,
        /// Maximum valid encoded header size
        max: usize,
    },

    /// Bytes consumed by the parser do not match the input length.
    ///
    /// The optional blocks implied by the decoded control fields do not
    /// account for the bytes actually present.
    #[error("Header size mismatch: consumed {consumed}, input was {expected}")]
    HeaderSizeMismatch {
        /// Bytes the field parser consumed
        consumed: usize,
        /// Total header bytes supplied
        expected: usize,
    },

    /// Message type byte is not a known discriminant.
    #[error("Unknown message type byte: 0x{0:02x}")]
    UnknownMessageType(u8),

    /// Protocol byte is not a known discriminant.
    #[error("Unknown protocol byte: 0x{0:02x}")]
    UnknownProtocol(u8),

    // ========================================
    // Integrity Errors
    // ========================================

    /// CRC32 trailer does not match the checksum recomputed over the payload.
    #[error("Checksum mismatch: trailer 0x{expected:08x}, computed 0x{computed:08x}")]
    ChecksumMismatch {
        /// Checksum carried in the frame trailer
        expected: u32,
        /// Checksum recomputed over the received payload
        computed: u32,
    },

    // ========================================
    // Framing Errors
    // ========================================

    /// Fewer bytes available than the frame claims to contain.
    ///
    /// Raised both for an undersized datagram and for a byte stream that
    /// ended mid-frame.
    #[error("Truncated frame: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes the frame layout requires
        needed: u64,
        /// Bytes actually available
        available: u64,
    },
}

impl CoreError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `Truncated` error.
    #[must_use]
    pub const fn truncated(needed: u64, available: u64) -> Self {
        Self::Truncated { needed, available }
    }

    /// Creates a `ChecksumMismatch` error.
    #[must_use]
    pub const fn checksum_mismatch(expected: u32, computed: u32) -> Self {
        Self::ChecksumMismatch { expected, computed }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this error indicates the byte stream that
    /// produced it may no longer be frame-aligned.
    ///
    /// Stream transports should treat the connection as unusable after
    /// such an error; datagram transports remain usable.
    #[must_use]
    pub const fn poisons_stream(&self) -> bool {
        matches!(
            self,
            Self::Truncated { .. } | Self::ChecksumMismatch { .. }
        )
    }

    /// Returns `true` if this is a header decode error.
    #[must_use]
    pub const fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::HeaderSize { .. }
                | Self::HeaderSizeMismatch { .. }
                | Self::UnknownMessageType(_)
                | Self::UnknownProtocol(_)
        )
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::HeaderSize {
            actual: 10,
            min: 52,
            max: 72,
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("52"));
        assert!(err.to_string().contains("72"));
    }

    #[test]
    fn test_classification() {
        assert!(CoreError::truncated(10, 4).poisons_stream());
        assert!(CoreError::checksum_mismatch(1, 2).poisons_stream());
        assert!(!CoreError::UnknownMessageType(0xff).poisons_stream());

        assert!(CoreError::UnknownProtocol(9).is_decode_error());
        assert!(!CoreError::truncated(10, 4).is_decode_error());
    }
}
