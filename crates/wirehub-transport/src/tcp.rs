// ============================================
// File: crates/wirehub-transport/src/tcp.rs
// ============================================
//! # Stream Transport Implementation
//!
//! ## Creation Reason
//! Provides the byte-stream variant of [`FramedConn`] over TCP. A stream
//! delivers undifferentiated bytes with no record boundaries, so frames
//! must be reassembled from exact-length sequential reads.
//!
//! ## Main Functionality
//! - `StreamConn`: framed connection over `tokio::net::TcpStream`
//! - Three-phase exact reads (prefix, header, payload + trailer)
//! - Single contiguous write per outbound frame
//!
//! ## Read Strategy
//! 1. Read exactly 1 byte: the header-length prefix
//! 2. Read exactly that many bytes and decode the header
//! 3. Read exactly `length + 4` bytes and verify the CRC trailer
//!
//! Each phase loops internally until the exact count arrives; a short
//! read at end-of-stream surfaces as a truncated-frame error.
//!
//! ## ⚠️ Important Note for Next Developer
//! - After a truncated read, checksum mismatch, or timeout mid-read the
//!   stream may be unaligned; no resynchronization is attempted, drop
//!   the connection
//! - `write_frame` leaves the caller's sender and sequence untouched;
//!   only the datagram transport overwrites those
//!
//! ## Last Modified
//! v0.1.0 - Initial stream transport implementation

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{trace, warn};

use wirehub_common::WireId;
use wirehub_core::error::CoreError;
use wirehub_core::protocol::{
    build_frame, checksum, decode_header, FrameHeader, CHECKSUM_SIZE,
};

use crate::deadline::with_deadline;
use crate::error::{Result, TransportError};
use crate::traits::FramedConn;

// ============================================
// StreamConn
// ============================================

/// Framed connection over a TCP byte stream.
///
/// Wraps an already-established [`TcpStream`]; the connection lifecycle
/// is one transport session, ended by [`FramedConn::close`].
///
/// # Example
/// ```ignore
/// use wirehub_transport::{FramedConn, StreamConn};
///
/// let mut conn = StreamConn::connect("127.0.0.1:8080".parse()?).await?;
/// let sent = conn.write_frame(header, b"hello").await?;
/// let (reply, payload) = conn.read_frame().await?;
/// ```
pub struct StreamConn {
    /// Underlying TCP stream
    stream: TcpStream,
    /// Sender identity stamped by the application layer
    sender: WireId,
    /// Deadline for read_frame operations
    read_timeout: Option<Duration>,
    /// Deadline for write_frame operations
    write_timeout: Option<Duration>,
    /// Set once close() succeeds; operations fail afterwards
    closed: bool,
}

impl StreamConn {
    /// Wraps an already-established TCP stream.
    ///
    /// The connection starts with a random sender identity; use
    /// [`FramedConn::set_sender`] to install a real one.
    #[must_use]
    pub fn new(stream: TcpStream) -> Self {
        Self {
            stream,
            sender: WireId::generate(),
            read_timeout: None,
            write_timeout: None,
            closed: false,
        }
    }

    /// Establishes a TCP connection to `addr` and wraps it.
    ///
    /// # Errors
    /// Returns an I/O error if the connection cannot be established.
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| TransportError::io("connecting TCP stream", e))?;
        Ok(Self::new(stream))
    }

    /// Reads exactly `buf.len()` bytes, honoring the read deadline.
    ///
    /// A short read at end-of-stream maps to a truncated-frame error;
    /// the stream must be considered unaligned afterwards.
    async fn read_exact_timed(&mut self, buf: &mut [u8]) -> Result<()> {
        let needed = buf.len();
        let result = with_deadline(
            "read_frame",
            self.read_timeout,
            self.stream.read_exact(buf),
        )
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(TransportError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                Err(CoreError::truncated(needed as u64, 0).into())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl FramedConn for StreamConn {
    async fn read_frame(&mut self) -> Result<(FrameHeader, Bytes)> {
        if self.closed {
            return Err(TransportError::ChannelClosed);
        }

        // Phase 1: header-length prefix
        let mut prefix = [0u8; 1];
        self.read_exact_timed(&mut prefix).await?;
        let header_len = prefix[0] as usize;

        // Phase 2: encoded header
        let mut header_buf = vec![0u8; header_len];
        self.read_exact_timed(&mut header_buf).await?;
        let header = decode_header(&header_buf)?;

        // Phase 3: payload plus CRC trailer. A declared length that
        // cannot even be addressed is a malformed frame, not a read to
        // attempt.
        let body_len = usize::try_from(header.length)
            .ok()
            .and_then(|len| len.checked_add(CHECKSUM_SIZE))
            .ok_or(CoreError::truncated(header.length, 0))?;
        let mut body = vec![0u8; body_len];
        self.read_exact_timed(&mut body).await?;

        let payload_end = body_len - CHECKSUM_SIZE;
        let trailer = u32::from_be_bytes([
            body[payload_end],
            body[payload_end + 1],
            body[payload_end + 2],
            body[payload_end + 3],
        ]);
        body.truncate(payload_end);

        if let Err(e) = checksum::verify(&body, trailer) {
            warn!("stream frame failed integrity check: {}", e);
            return Err(e.into());
        }

        trace!(
            "read frame: type={} router={} len={}",
            header.message_type,
            header.router,
            header.length
        );
        Ok((header, Bytes::from(body)))
    }

    async fn write_frame(
        &mut self,
        header: FrameHeader,
        payload: &[u8],
    ) -> Result<FrameHeader> {
        if self.closed {
            return Err(TransportError::ChannelClosed);
        }

        // The stream transport does not overwrite the caller's sender,
        // sequence, or protocol fields; only length and a zero timestamp
        // are finalized by the frame builder.
        let (finalized, frame) = build_frame(header, payload);

        with_deadline(
            "write_frame",
            self.write_timeout,
            self.stream.write_all(&frame),
        )
        .await?;

        trace!(
            "wrote frame: type={} router={} len={}",
            finalized.message_type,
            finalized.router,
            finalized.length
        );
        Ok(finalized)
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.stream
            .shutdown()
            .await
            .map_err(|e| TransportError::io("shutting down TCP stream", e))?;
        self.closed = true;
        Ok(())
    }

    fn local_addr(&self) -> Result<SocketAddr> {
        self.stream
            .local_addr()
            .map_err(|e| TransportError::io("getting local address", e))
    }

    fn peer_addr(&self) -> Option<SocketAddr> {
        self.stream.peer_addr().ok()
    }

    fn set_read_timeout(&mut self, timeout: Option<Duration>) {
        self.read_timeout = timeout;
    }

    fn set_write_timeout(&mut self, timeout: Option<Duration>) {
        self.write_timeout = timeout;
    }

    fn sender(&self) -> WireId {
        self.sender
    }

    fn set_sender(&mut self, sender: WireId) {
        self.sender = sender;
    }
}

impl std::fmt::Debug for StreamConn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamConn")
            .field("local_addr", &self.stream.local_addr().ok())
            .field("peer_addr", &self.stream.peer_addr().ok())
            .field("closed", &self.closed)
            .finish()
    }
}

// ============================================
// Tests
// ============================================
