// ============================================
// File: crates/wirehub-transport/src/lib.rs
// ============================================
//! # WireHub Transport - Framed Network I/O Layer
//!
//! ## Creation Reason
//! Delivers whole frames over real sockets. The wire format lives in
//! wirehub-core; this crate binds it to TCP byte streams and UDP
//! datagrams behind one connection interface.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`traits`]: the [`FramedConn`] connection interface
//! - [`tcp`]: stream transport over TCP
//! - [`udp`]: datagram transport over UDP
//! - [`error`]: transport-specific error types
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │               wirehub-node                          │
//! │                    │                                │
//! │         ┌──────────┴──────────┐                    │
//! │         ▼                     ▼                    │
//! │   wirehub-core         wirehub-transport           │
//! │                        You are here ◄──            │
//! │         │                     │                    │
//! │         └──────────┬──────────┘                    │
//! │                    ▼                               │
//! │             wirehub-common                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transport Comparison
//! | Property | [`StreamConn`] | [`DatagramConn`] |
//! |----------|----------------|------------------|
//! | Delivery | ordered, reliable | unordered, lossy |
//! | Framing | reassembled from exact reads | one frame per packet |
//! | Size limit | none | configured maximum |
//! | Sender stamping | caller's header kept | overwritten per send |
//! | Sequence numbers | untouched | assigned per successful send |
//! | Error blast radius | connection | single packet |
//!
//! ## ⚠️ Important Note for Next Developer
//! - Always hold connections through [`FramedConn`] for testability
//! - A stream error that reports `poisons_stream()` means the byte
//!   stream lost frame alignment; drop that connection
//!
//! ## Last Modified
//! v0.1.0 - Initial transport layer implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod deadline;

pub mod error;
pub mod tcp;
pub mod traits;
pub mod udp;

// Re-export primary types
pub use error::{Result, TransportError};
pub use tcp::StreamConn;
pub use traits::FramedConn;
pub use udp::{DatagramConn, DEFAULT_MAX_MESSAGE_SIZE};
