// ============================================
// File: crates/wirehub-core/src/protocol/codec.rs
// ============================================
//! # Header Codec
//!
//! ## Creation Reason
//! Provides binary serialization and deserialization for the frame
//! header, including the rules for which optional blocks are present.
//!
//! ## Main Functionality
//! - `encode_header`: header to wire bytes
//! - `decode_header`: wire bytes to header, with full validation
//!
//! ## Wire Format (Big Endian)
//! Fields in fixed order:
//! ```text
//! id(16) sender(16) timestamp(8) length(8)
//! flags(1) message_type(1) router(1) protocol(1)
//! [receiver(16) iff message_type == Broadcast]
//! [sequence(4)  iff protocol == Datagram]
//! ```
//!
//! ## Parsing Strategy
//! 1. Bounds-check the input length against [52, 72]
//! 2. Read the fixed fields in order
//! 3. Derive the optional-block presence from the decoded control bytes
//! 4. Require the implied size to exactly match the input length
//! 5. Read the optional blocks
//!
//! ## ⚠️ Important Note for Next Developer
//! - Encoder and decoder key the receiver block on the same predicate
//!   (`message_type == Broadcast`, receiver value irrelevant); changing
//!   either side alone corrupts every broadcast frame on the wire
//! - Always validate buffer lengths before reading
//!
//! ## Last Modified
//! v0.1.0 - Initial codec implementation

use bytes::{Buf, BufMut, BytesMut};

use wirehub_common::types::{WireId, WIRE_ID_SIZE};

use crate::error::{CoreError, Result};
use crate::protocol::header::{
    Flags, FrameHeader, MessageType, ProtocolKind, BASE_HEADER_SIZE, MAX_HEADER_SIZE,
};

// ============================================
// Encoding
// ============================================

/// Serializes a header into its wire representation.
///
/// Fills `timestamp` with the current epoch milliseconds if it is still
/// zero, which is why the header is taken mutably. The returned buffer is
/// exactly [`FrameHeader::encoded_size`] bytes long.
pub fn encode_header(header: &mut FrameHeader) -> BytesMut {
    header.set_timestamp_if_zero();

    let size = header.encoded_size();
    let mut buf = BytesMut::with_capacity(size);

    // Fixed fields, same order as the decoder
    buf.put_slice(header.id.as_bytes());
    buf.put_slice(header.sender.as_bytes());
    buf.put_u64(header.timestamp);
    buf.put_u64(header.length);

    // Control bytes
    buf.put_u8(header.flags.as_byte());
    buf.put_u8(header.message_type.as_byte());
    buf.put_u8(header.router);
    buf.put_u8(header.protocol.as_byte());

    // Optional blocks
    if header.is_broadcast() {
        buf.put_slice(header.receiver.as_bytes());
    }
    if header.protocol.is_datagram() {
        buf.put_u32(header.sequence);
    }

    debug_assert_eq!(buf.len(), size);
    buf
}

// ============================================
// Decoding
// ============================================

/// Parses a header from its wire representation.
///
/// # Errors
/// - [`CoreError::HeaderSize`] if the input is outside `[52, 72]` bytes
/// - [`CoreError::UnknownMessageType`] / [`CoreError::UnknownProtocol`]
///   for unrecognized control bytes
/// - [`CoreError::HeaderSizeMismatch`] if the size implied by the decoded
///   control bytes does not exactly match the input length
pub fn decode_header(data: &[u8]) -> Result<FrameHeader> {
    let input_len = data.len();
    if input_len < BASE_HEADER_SIZE || input_len > MAX_HEADER_SIZE {
        return Err(CoreError::HeaderSize {
            actual: input_len,
            min: BASE_HEADER_SIZE,
            max: MAX_HEADER_SIZE,
        });
    }

    let mut buf = data;

    // Fixed fields
    let mut id_bytes = [0u8; WIRE_ID_SIZE];
    buf.copy_to_slice(&mut id_bytes);
    let id = WireId::from_array(id_bytes);

    let mut sender_bytes = [0u8; WIRE_ID_SIZE];
    buf.copy_to_slice(&mut sender_bytes);
    let sender = WireId::from_array(sender_bytes);

    let timestamp = buf.get_u64();
    let length = buf.get_u64();

    // Control bytes
    let flags = Flags::from_byte(buf.get_u8());
    let message_type_byte = buf.get_u8();
    let message_type = MessageType::from_byte(message_type_byte)
        .ok_or(CoreError::UnknownMessageType(message_type_byte))?;
    let router = buf.get_u8();
    let protocol_byte = buf.get_u8();
    let protocol = ProtocolKind::from_byte(protocol_byte)
        .ok_or(CoreError::UnknownProtocol(protocol_byte))?;

    // The control bytes determine exactly how many bytes this header
    // must occupy; anything else is a malformed header.
    let mut required = BASE_HEADER_SIZE;
    if message_type.is_broadcast() {
        required += WIRE_ID_SIZE;
    }
    if protocol.is_datagram() {
        required += 4;
    }
    if input_len != required {
        return Err(CoreError::HeaderSizeMismatch {
            consumed: required,
            expected: input_len,
        });
    }

    // Optional blocks
    let receiver = if message_type.is_broadcast() {
        let mut receiver_bytes = [0u8; WIRE_ID_SIZE];
        buf.copy_to_slice(&mut receiver_bytes);
        WireId::from_array(receiver_bytes)
    } else {
        WireId::zero()
    };

    let sequence = if protocol.is_datagram() {
        buf.get_u32()
    } else {
        0
    };

    debug_assert_eq!(buf.remaining(), 0);

    Ok(FrameHeader {
        id,
        sender,
        receiver,
        timestamp,
        length,
        sequence,
        flags,
        message_type,
        router,
        protocol,
    })
}

// ============================================
// Tests
// ============================================
