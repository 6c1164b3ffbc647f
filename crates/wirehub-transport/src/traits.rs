// ============================================
// File: crates/wirehub-transport/src/traits.rs
// ============================================
//! # Transport Traits
//!
//! ## Creation Reason
//! Defines the capability set both transports expose, so that callers
//! handle a stream connection and a datagram connection through one
//! interface despite their different delivery semantics.
//!
//! ## Main Functionality
//! - `FramedConn`: framed read/write, lifecycle, addressing, deadlines,
//!   and sender identity
//!
//! ## Design Philosophy
//! - Traits enable mock implementations for testing
//! - Async-first design with `async_trait`
//! - Callers must not assume which concrete variant they hold beyond
//!   what the `protocol` field on headers reports
//!
//! ## Concurrency Contract
//! `read_frame` and `write_frame` take `&mut self`: the exclusive borrow
//! enforces at most one in-flight operation per connection. A transport
//! instance carries no internal locking; applications needing concurrent
//! writers must serialize them externally (one writer task fed by a
//! queue). Cancelling a blocked call relies on deadlines or on closing
//! the underlying channel.
//!
//! ## ⚠️ Important Note for Next Developer
//! - `write_frame` consumes the header and returns the finalized one;
//!   transport-assigned fields (length, timestamp and, for datagrams,
//!   sender/protocol/sequence) are only visible on the returned value
//! - Implementations must be `Send` for use across async tasks
//!
//! ## Last Modified
//! v0.1.0 - Initial trait definitions

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use wirehub_common::WireId;
use wirehub_core::protocol::FrameHeader;

use crate::error::Result;

// ============================================
// FramedConn Trait
// ============================================

/// Capability set of a framed connection, stream or datagram.
///
/// # Example
/// ```ignore
/// async fn echo(conn: &mut dyn FramedConn) -> Result<()> {
///     let (header, payload) = conn.read_frame().await?;
///     conn.write_frame(header, &payload).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait FramedConn: Send {
    /// Reads one complete frame, returning its header and payload.
    ///
    /// Blocks until a full frame is available, the configured read
    /// deadline elapses, or the channel fails.
    ///
    /// # Errors
    /// - `Timeout` if a read deadline is set and elapses
    /// - `ChannelClosed` after [`FramedConn::close`] on a stream
    /// - `Protocol` for truncated, malformed, or corrupt frames
    async fn read_frame(&mut self) -> Result<(FrameHeader, Bytes)>;

    /// Builds one frame from `header` and `payload` and transmits it.
    ///
    /// Returns the finalized header as it went onto the wire. Which
    /// caller-supplied fields survive is transport-specific: a stream
    /// connection only derives `length` and stamps a zero timestamp,
    /// while a datagram connection additionally overwrites the sender,
    /// protocol, and sequence fields with its own values.
    ///
    /// # Errors
    /// - `Timeout` if a write deadline is set and elapses
    /// - `FrameTooLarge` if the frame exceeds a configured maximum
    /// - `ChannelClosed` / `NotConnected` on lifecycle violations
    async fn write_frame(&mut self, header: FrameHeader, payload: &[u8])
        -> Result<FrameHeader>;

    /// Closes the connection.
    ///
    /// Stream connections shut the underlying channel down and reject
    /// further operations. Datagram connections do not own their socket,
    /// so close is an idempotent no-op.
    async fn close(&mut self) -> Result<()>;

    /// Returns the local address of the underlying channel.
    fn local_addr(&self) -> Result<SocketAddr>;

    /// Returns the peer address, if one is known.
    ///
    /// For datagram connections this is the source of the most recently
    /// received packet (or the configured destination).
    fn peer_addr(&self) -> Option<SocketAddr>;

    /// Sets the read deadline applied to subsequent `read_frame` calls.
    ///
    /// `None` removes any deadline; a pending call then blocks
    /// indefinitely.
    fn set_read_timeout(&mut self, timeout: Option<Duration>);

    /// Sets the write deadline applied to subsequent `write_frame` calls.
    fn set_write_timeout(&mut self, timeout: Option<Duration>);

    /// Returns this connection's sender identity.
    fn sender(&self) -> WireId;

    /// Replaces this connection's sender identity.
    fn set_sender(&mut self, sender: WireId);
}
