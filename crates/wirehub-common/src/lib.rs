// ============================================
// File: crates/wirehub-common/src/lib.rs
// ============================================
//! # WireHub Common - Shared Foundations
//!
//! ## Creation Reason
//! Centralizes the fundamental types every WireHub crate needs: the
//! 16-byte wire identifier, epoch-millisecond time helpers, and the base
//! error type. Keeping them here prevents dependency cycles between the
//! protocol and transport layers.
//!
//! ## Main Functionality
//! - [`types::WireId`]: 16-byte unique identifier carried in frame headers
//! - [`time`]: epoch-millisecond helpers for header timestamps
//! - [`error::CommonError`]: base error enum shared across crates
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              wirehub-node                           │
//! │                    │                                │
//! │         ┌──────────┴──────────┐                    │
//! │         ▼                     ▼                    │
//! │   wirehub-core         wirehub-transport           │
//! │         │                     │                    │
//! │         └──────────┬──────────┘                    │
//! │                    ▼                               │
//! │             wirehub-common                         │
//! │             You are here ◄──                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - This crate must stay dependency-light; it sits under everything
//! - `WireId` serialization formats are wire-visible, keep them stable
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod time;
pub mod types;

// Re-export commonly used items
pub use error::{CommonError, Result};
pub use types::{WireId, WIRE_ID_SIZE};
