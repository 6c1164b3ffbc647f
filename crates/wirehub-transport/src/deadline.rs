// ============================================
// File: crates/wirehub-transport/src/deadline.rs
// ============================================
//! # Deadline Application
//!
//! ## Creation Reason
//! Both transports apply their stored read and write deadlines the same
//! way; this module holds the one wrapper that does it.
//!
//! ## Main Functionality
//! - `with_deadline`: runs an I/O future under an optional timeout and
//!   maps both failure shapes into [`TransportError`]
//!
//! ## Last Modified
//! v0.1.0 - Initial deadline helper

use std::future::Future;
use std::io;
use std::time::Duration;

use crate::error::{Result, TransportError};

/// Runs `fut` under `timeout`, if one is set.
///
/// Expiry maps to [`TransportError::Timeout`] carrying the operation
/// name; an underlying I/O failure maps to [`TransportError::Io`] with
/// the same context.
pub(crate) async fn with_deadline<T, F>(
    operation: &str,
    timeout: Option<Duration>,
    fut: F,
) -> Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    match timeout {
        Some(duration) => match tokio::time::timeout(duration, fut).await {
            Ok(result) => result.map_err(|e| TransportError::io(operation, e)),
            Err(_) => Err(TransportError::timeout(
                operation,
                duration.as_millis() as u64,
            )),
        },
        None => fut.await.map_err(|e| TransportError::io(operation, e)),
    }
}
