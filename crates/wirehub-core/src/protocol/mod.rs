// ============================================
// File: crates/wirehub-core/src/protocol/mod.rs
// ============================================
//! # Protocol Module
//!
//! ## Creation Reason
//! Groups the wire format definitions: header data model, binary codec,
//! payload checksum, and frame assembly/parsing.
//!
//! ## Main Functionality
//! - [`header`]: `FrameHeader` and its enums
//! - [`codec`]: variable-length header encode/decode
//! - [`checksum`]: CRC32 payload integrity
//! - [`frame`]: length-prefixed, checksum-trailed framing
//!
//! ## Last Modified
//! v0.1.0 - Initial protocol module

pub mod checksum;
pub mod codec;
pub mod frame;
pub mod header;

pub use checksum::checksum;
pub use codec::{decode_header, encode_header};
pub use frame::{build_frame, parse_frame, CHECKSUM_SIZE, LENGTH_PREFIX_SIZE};
pub use header::{
    Flags, FrameHeader, MessageType, ProtocolKind, BASE_HEADER_SIZE, MAX_HEADER_SIZE,
};
