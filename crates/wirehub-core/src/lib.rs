// ============================================
// File: crates/wirehub-core/src/lib.rs
// ============================================
//! # WireHub Core - Protocol Library
//!
//! ## Creation Reason
//! Defines the WireHub wire format: the variable-structure frame header,
//! its binary codec, the CRC32 payload checksum, and the length-prefixed
//! framing shared by the stream and datagram transports.
//!
//! ## Main Functionality
//!
//! ### Protocol Module ([`protocol`])
//! - [`protocol::FrameHeader`] and its enums (`MessageType`, `Flags`,
//!   `ProtocolKind`)
//! - Binary header codec (`encode_header` / `decode_header`)
//! - Frame assembly and parsing (`build_frame` / `parse_frame`)
//! - CRC32 payload checksum
//!
//! ## Wire Format
//! All multi-byte integers are encoded in big-endian byte order.
//!
//! ```text
//! ┌───────────┬──────────────────┬──────────┬──────────────┐
//! │ hdr len   │  encoded header  │ payload  │ CRC32 (BE)   │
//! │ (1 byte)  │  (52..=72 bytes) │ (n bytes)│ (4 bytes)    │
//! └───────────┴──────────────────┴──────────┴──────────────┘
//! ```
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              wirehub-node                           │
//! │                    │                                │
//! │         ┌──────────┴──────────┐                    │
//! │         ▼                     ▼                    │
//! │   wirehub-core  ◄──    wirehub-transport           │
//! │   You are here        │                            │
//! │         │             │                            │
//! │         └──────────┬──────────┘                    │
//! │                    ▼                               │
//! │             wirehub-common                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Field order and byte order are wire-visible; never reorder fields
//!   without a protocol version bump
//! - The checksum covers the payload only; see [`protocol::checksum`]
//!   for the documented coverage gap
//! - Optional header blocks are presence-keyed on `MessageType` and
//!   `ProtocolKind`; both encoder and decoder use the same predicates
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod protocol;

// Re-export commonly used items
pub use error::{CoreError, Result};
pub use protocol::{
    build_frame, checksum, decode_header, encode_header, parse_frame,
    Flags, FrameHeader, MessageType, ProtocolKind,
    BASE_HEADER_SIZE, CHECKSUM_SIZE, MAX_HEADER_SIZE,
};
