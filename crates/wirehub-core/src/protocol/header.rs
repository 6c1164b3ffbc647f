// ============================================
// File: crates/wirehub-core/src/protocol/header.rs
// ============================================
//! # Frame Header Data Model
//!
//! ## Creation Reason
//! Defines the variable-structure header that precedes every WireHub
//! payload, plus the small enums that control its optional blocks.
//!
//! ## Main Functionality
//! - `FrameHeader`: the header entity
//! - `MessageType`: semantic type of the payload
//! - `Flags`: per-message attribute bitmask
//! - `ProtocolKind`: stream vs. datagram transport marker
//!
//! ## Header Sizes
//! | Shape | Size (bytes) |
//! |-------|--------------|
//! | Base (all fixed fields) | 52 |
//! | + receiver (broadcast) | +16 |
//! | + sequence (datagram) | +4 |
//! | Maximum | 72 |
//!
//! ## Optional Block Predicates
//! The receiver block is present iff `message_type == Broadcast`; the
//! sequence block is present iff `protocol == Datagram`. Both encoder and
//! decoder key presence on exactly these predicates. In particular a
//! broadcast header with a zero receiver still carries the 16-byte zero
//! receiver block on the wire.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Add new message types at the end of the enum only
//! - `Flags` is a bitmask; new flags must be fresh powers of two
//!
//! ## Last Modified
//! v0.1.0 - Initial header definitions

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use wirehub_common::time::unix_timestamp_millis;
use wirehub_common::types::{WireId, WIRE_ID_SIZE};

// ============================================
// Size Constants
// ============================================

/// Encoded size of the fixed header fields:
/// id(16) + sender(16) + timestamp(8) + length(8)
/// + flags(1) + message_type(1) + router(1) + protocol(1).
pub const BASE_HEADER_SIZE: usize = 52;

/// Encoded size of the optional receiver block.
pub const RECEIVER_SIZE: usize = WIRE_ID_SIZE;

/// Encoded size of the optional sequence block.
pub const SEQUENCE_SIZE: usize = 4;

/// Largest possible encoded header: base + receiver + sequence.
pub const MAX_HEADER_SIZE: usize = BASE_HEADER_SIZE + RECEIVER_SIZE + SEQUENCE_SIZE;

// ============================================
// MessageType
// ============================================

/// Semantic type of a message payload.
///
/// # Wire Format
/// Single byte inside the header control block.
///
/// | Value | Type |
/// |-------|------|
/// | 0x00 | Unknown |
/// | 0x01 | Data |
/// | 0x02 | Broadcast |
/// | 0x03 | Heartbeat |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    /// Uninitialized/default.
    #[default]
    Unknown = 0x00,
    /// Application data.
    Data = 0x01,
    /// Broadcast message; the header carries an explicit receiver block.
    Broadcast = 0x02,
    /// Keep-alive.
    Heartbeat = 0x03,
}

impl MessageType {
    /// Converts a byte to a `MessageType`.
    ///
    /// # Returns
    /// - `Some(MessageType)` if the byte is a valid discriminant
    /// - `None` otherwise
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Unknown),
            0x01 => Some(Self::Data),
            0x02 => Some(Self::Broadcast),
            0x03 => Some(Self::Heartbeat),
            _ => None,
        }
    }

    /// Converts the `MessageType` to its wire byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Checks if this is a broadcast message type.
    #[must_use]
    pub const fn is_broadcast(self) -> bool {
        matches!(self, Self::Broadcast)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "Unknown",
            Self::Data => "Data",
            Self::Broadcast => "Broadcast",
            Self::Heartbeat => "Heartbeat",
        };
        write!(f, "{name}")
    }
}

impl TryFrom<u8> for MessageType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_byte(value).ok_or(value)
    }
}

// ============================================
// Flags
// ============================================

/// Bitmask of per-message attributes.
///
/// # Wire Format
/// Single byte inside the header control block. Each flag is a distinct
/// bit so flags combine with `|` and test with `contains`.
///
/// | Bit | Flag |
/// |------|------|
/// | 0x01 | ACK |
/// | 0x02 | ERROR |
/// | 0x04 | COMPRESSED |
/// | 0x08 | ENCRYPTED |
///
/// The COMPRESSED and ENCRYPTED flags only *mark* a payload; no codec or
/// cipher is applied at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags(u8);

impl Flags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Acknowledgment.
    pub const ACK: Self = Self(0b0000_0001);
    /// The message reports an error.
    pub const ERROR: Self = Self(0b0000_0010);
    /// The payload is compressed.
    pub const COMPRESSED: Self = Self(0b0000_0100);
    /// The payload is encrypted.
    pub const ENCRYPTED: Self = Self(0b0000_1000);

    /// Creates flags from a raw wire byte.
    ///
    /// Unknown bits are preserved so a newer peer's flags survive a
    /// decode/encode round trip.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Returns the raw wire byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns a copy with the bits of `other` set.
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns a copy with the bits of `other` cleared.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns `true` if no flags are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Flags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Flags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ============================================
// ProtocolKind
// ============================================

/// Transport delivery model the header was written for.
///
/// # Wire Format
/// Single byte inside the header control block.
///
/// | Value | Kind |
/// |-------|------|
/// | 0x00 | Stream |
/// | 0x01 | Datagram |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ProtocolKind {
    /// Byte-stream transport (TCP); no sequence block on the wire.
    #[default]
    Stream = 0x00,
    /// Datagram transport (UDP); the header carries a sequence block.
    Datagram = 0x01,
}

impl ProtocolKind {
    /// Converts a byte to a `ProtocolKind`.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Stream),
            0x01 => Some(Self::Datagram),
            _ => None,
        }
    }

    /// Converts the `ProtocolKind` to its wire byte.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Checks if this is the datagram kind.
    #[must_use]
    pub const fn is_datagram(self) -> bool {
        matches!(self, Self::Datagram)
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stream => "Stream",
            Self::Datagram => "Datagram",
        };
        write!(f, "{name}")
    }
}

// ============================================
// FrameHeader
// ============================================

/// Metadata preceding every WireHub payload.
///
/// Created per message and immutable once encoded. The frame builder
/// derives `length` from the actual payload and fills `timestamp` when it
/// is still zero; callers never control those two fields directly.
///
/// # Example
/// ```
/// use wirehub_core::protocol::{FrameHeader, MessageType, ProtocolKind};
/// use wirehub_common::WireId;
///
/// let header = FrameHeader::new(MessageType::Data, ProtocolKind::Stream)
///     .with_sender(WireId::generate())
///     .with_router(42);
/// assert_eq!(header.encoded_size(), 52);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameHeader {
    /// Unique identifier for this message.
    pub id: WireId,
    /// Identity of the sender.
    pub sender: WireId,
    /// Identity of the receiver; zero unless addressed explicitly.
    /// On the wire only when `message_type` is [`MessageType::Broadcast`].
    pub receiver: WireId,
    /// Milliseconds since the Unix epoch; filled at encode time if zero.
    pub timestamp: u64,
    /// Payload byte count; derived by the frame builder, never trusted
    /// from the caller.
    pub length: u64,
    /// Monotonic per-connection counter, owned by the datagram transport.
    /// On the wire only when `protocol` is [`ProtocolKind::Datagram`].
    pub sequence: u32,
    /// Per-message attribute bitmask.
    pub flags: Flags,
    /// Semantic type of the payload.
    pub message_type: MessageType,
    /// Routing tag for dispatching to application handlers.
    pub router: u8,
    /// Transport delivery model this header was written for.
    pub protocol: ProtocolKind,
}

impl FrameHeader {
    /// Creates a header with a fresh random message ID and the given
    /// type and protocol. Remaining fields start zeroed.
    #[must_use]
    pub fn new(message_type: MessageType, protocol: ProtocolKind) -> Self {
        Self {
            id: WireId::generate(),
            message_type,
            protocol,
            ..Self::default()
        }
    }

    /// Sets the sender identity (builder style).
    #[must_use]
    pub const fn with_sender(mut self, sender: WireId) -> Self {
        self.sender = sender;
        self
    }

    /// Sets the receiver identity (builder style).
    #[must_use]
    pub const fn with_receiver(mut self, receiver: WireId) -> Self {
        self.receiver = receiver;
        self
    }

    /// Sets the router tag (builder style).
    #[must_use]
    pub const fn with_router(mut self, router: u8) -> Self {
        self.router = router;
        self
    }

    /// Sets the flags (builder style).
    #[must_use]
    pub const fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Reports whether the receiver block is present on the wire.
    ///
    /// Keyed solely on the message type. A broadcast header with a zero
    /// receiver still carries the block; encoder and decoder agree.
    #[must_use]
    pub const fn is_broadcast(&self) -> bool {
        self.message_type.is_broadcast()
    }

    /// Sets `timestamp` to the current epoch milliseconds if it is still
    /// zero. A non-zero timestamp is never overwritten.
    pub fn set_timestamp_if_zero(&mut self) {
        if self.timestamp == 0 {
            self.timestamp = unix_timestamp_millis();
        }
    }

    /// Returns the encoded size of this header in bytes.
    ///
    /// Base 52, plus 16 for the receiver block when broadcast, plus 4
    /// for the sequence block when datagram.
    #[must_use]
    pub const fn encoded_size(&self) -> usize {
        let mut size = BASE_HEADER_SIZE;
        if self.is_broadcast() {
            size += RECEIVER_SIZE;
        }
        if self.protocol.is_datagram() {
            size += SEQUENCE_SIZE;
        }
        size
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_bytes() {
        for mt in [
            MessageType::Unknown,
            MessageType::Data,
            MessageType::Broadcast,
            MessageType::Heartbeat,
        ] {
            assert_eq!(MessageType::from_byte(mt.as_byte()), Some(mt));
        }
        assert_eq!(MessageType::from_byte(0x04), None);
        assert_eq!(MessageType::from_byte(0xff), None);
    }

    #[test]
    fn test_protocol_kind_bytes() {
        assert_eq!(ProtocolKind::from_byte(0x00), Some(ProtocolKind::Stream));
        assert_eq!(ProtocolKind::from_byte(0x01), Some(ProtocolKind::Datagram));
        assert_eq!(ProtocolKind::from_byte(0x02), None);
    }

    #[test]
    fn test_flags_bitmask() {
        let flags = Flags::ACK | Flags::COMPRESSED;
        assert!(flags.contains(Flags::ACK));
        assert!(flags.contains(Flags::COMPRESSED));
        assert!(!flags.contains(Flags::ENCRYPTED));

        let cleared = flags.without(Flags::ACK);
        assert!(!cleared.contains(Flags::ACK));
        assert!(cleared.contains(Flags::COMPRESSED));

        assert!(Flags::NONE.is_empty());
        assert_eq!(Flags::from_byte(0x0f).as_byte(), 0x0f);
    }

    #[test]
    fn test_flags_preserve_unknown_bits() {
        let raw = Flags::from_byte(0b1010_0001);
        assert!(raw.contains(Flags::ACK));
        assert_eq!(raw.as_byte(), 0b1010_0001);
    }

    #[test]
    fn test_encoded_size() {
        let base = FrameHeader::new(MessageType::Data, ProtocolKind::Stream);
        assert_eq!(base.encoded_size(), BASE_HEADER_SIZE);

        let datagram = FrameHeader::new(MessageType::Data, ProtocolKind::Datagram);
        assert_eq!(datagram.encoded_size(), BASE_HEADER_SIZE + SEQUENCE_SIZE);

        let broadcast = FrameHeader::new(MessageType::Broadcast, ProtocolKind::Stream);
        assert_eq!(broadcast.encoded_size(), BASE_HEADER_SIZE + RECEIVER_SIZE);

        let both = FrameHeader::new(MessageType::Broadcast, ProtocolKind::Datagram);
        assert_eq!(both.encoded_size(), MAX_HEADER_SIZE);
    }

    #[test]
    fn test_broadcast_predicate_ignores_receiver_value() {
        // Presence is keyed on message type alone; a zero receiver does
        // not change the wire shape.
        let header = FrameHeader::new(MessageType::Broadcast, ProtocolKind::Stream);
        assert!(header.receiver.is_zero());
        assert!(header.is_broadcast());
        assert_eq!(header.encoded_size(), BASE_HEADER_SIZE + RECEIVER_SIZE);
    }

    #[test]
    fn test_timestamp_fill() {
        let mut header = FrameHeader::new(MessageType::Data, ProtocolKind::Stream);
        assert_eq!(header.timestamp, 0);

        header.set_timestamp_if_zero();
        let stamped = header.timestamp;
        assert!(stamped > 0);

        // A non-zero timestamp is never overwritten
        header.set_timestamp_if_zero();
        assert_eq!(header.timestamp, stamped);
    }
}
