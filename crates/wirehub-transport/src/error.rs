// ============================================
// File: crates/wirehub-transport/src/error.rs
// ============================================
//! # Transport Error Types
//!
//! ## Creation Reason
//! Defines error types specific to framed transport operations: network
//! I/O failures, deadline expiry, size guards, and lifecycle violations.
//!
//! ## Main Functionality
//! - `TransportError`: primary error enum for transport operations
//! - Transparent wrapping of protocol core errors
//! - Categorization of retryable vs fatal errors
//!
//! ## Error Categories
//! 1. **Network Errors**: bind/send/receive failures
//! 2. **Lifecycle Errors**: closed channels, missing peer
//! 3. **Guard Errors**: frame exceeds the configured datagram maximum
//! 4. **Protocol Errors**: decode/integrity failures from wirehub-core
//!
//! ## ⚠️ Important Note for Next Developer
//! - A protocol error from a stream read means the stream may be
//!   unaligned; callers should drop the connection
//! - Datagram failures are per-packet and the transport stays usable
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

use wirehub_core::error::CoreError;

// ============================================
// Result Type Alias
// ============================================

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

// ============================================
// TransportError
// ============================================

/// Transport layer error types.
///
/// # Categories
/// - **Network**: socket and addressing errors
/// - **Lifecycle**: closed or unaddressed transports
/// - **Guard**: datagram size limit violations
/// - **Protocol**: wrapped wire-format errors
#[derive(Error, Debug)]
pub enum TransportError {
    // ========================================
    // Network Errors
    // ========================================

    /// Failed to bind to address.
    #[error("Failed to bind to {addr}: {reason}")]
    BindFailed {
        /// Address we tried to bind to
        addr: SocketAddr,
        /// Why binding failed
        reason: String,
    },

    /// Address already in use.
    #[error("Address {addr} already in use")]
    AddressInUse {
        /// The address that's in use
        addr: SocketAddr,
    },

    /// Invalid address string.
    #[error("Invalid address: {addr}")]
    InvalidAddress {
        /// The invalid address string
        addr: String,
    },

    // ========================================
    // Lifecycle Errors
    // ========================================

    /// Operation attempted after the transport or its channel was closed.
    #[error("Channel closed")]
    ChannelClosed,

    /// Datagram transport has no peer address to send to yet.
    #[error("Not connected: no peer address known")]
    NotConnected,

    /// A deadline elapsed while blocked in read or write.
    #[error("Operation timed out: {operation} after {duration_ms}ms")]
    Timeout {
        /// What operation timed out
        operation: String,
        /// Configured deadline in milliseconds
        duration_ms: u64,
    },

    // ========================================
    // Guard Errors
    // ========================================

    /// Assembled frame exceeds the configured datagram maximum.
    #[error("Frame too large: {size} bytes exceeds maximum {max}")]
    FrameTooLarge {
        /// Size of the assembled frame
        size: usize,
        /// Configured maximum message size
        max: usize,
    },

    // ========================================
    // Wrapped Errors
    // ========================================

    /// Wire-format error from the protocol core.
    #[error(transparent)]
    Protocol(#[from] CoreError),

    /// I/O error from the system.
    #[error("I/O error: {context}")]
    Io {
        /// What was happening when the error occurred
        context: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `BindFailed` error.
    pub fn bind_failed(addr: SocketAddr, reason: impl Into<String>) -> Self {
        Self::BindFailed {
            addr,
            reason: reason.into(),
        }
    }

    /// Creates an `Io` error with context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a `Timeout` error.
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration_ms,
        }
    }

    /// Creates a `FrameTooLarge` error.
    #[must_use]
    pub const fn frame_too_large(size: usize, max: usize) -> Self {
        Self::FrameTooLarge { size, max }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this error is transient and retryable.
    ///
    /// Datagram callers may retry after these; stream callers should
    /// also consult [`TransportError::poisons_stream`].
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Io { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::WouldBlock
                    | io::ErrorKind::Interrupted
                    | io::ErrorKind::TimedOut
            ),
            _ => false,
        }
    }

    /// Returns `true` if a byte-stream transport that produced this
    /// error may no longer be frame-aligned and should be dropped.
    #[must_use]
    pub const fn poisons_stream(&self) -> bool {
        match self {
            Self::Protocol(core) => core.poisons_stream(),
            Self::ChannelClosed => true,
            _ => false,
        }
    }
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            context: "unspecified I/O operation".into(),
            source: err,
        }
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
        let err = TransportError::frame_too_large(70000, 65507);
        assert!(err.to_string().contains("70000"));
        assert!(err.to_string().contains("65507"));
    }

    #[test]
    fn test_classification() {
        assert!(TransportError::timeout("read_frame", 5000).is_retryable());
        assert!(!TransportError::ChannelClosed.is_retryable());

        let checksum = TransportError::Protocol(CoreError::checksum_mismatch(1, 2));
        assert!(checksum.poisons_stream());
        assert!(TransportError::ChannelClosed.poisons_stream());
        assert!(!TransportError::NotConnected.poisons_stream());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::WouldBlock, "would block");
        let transport_err: TransportError = io_err.into();
        assert!(transport_err.is_retryable());
    }

    #[test]
    fn test_core_error_wrapping() {
        let core = CoreError::truncated(10, 4);
        let wrapped: TransportError = core.into();
        assert!(matches!(wrapped, TransportError::Protocol(_)));
    }
}
