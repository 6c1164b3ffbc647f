// ============================================
// File: crates/wirehub-node/src/lib.rs
// ============================================
//! # WireHub Node - Configuration and Logging Surfaces
//!
//! ## Creation Reason
//! Holds the declarative surfaces a node process needs around the
//! protocol and transport layers: a validated TOML configuration and the
//! mode-aware logging facility. No connection handling lives here.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`config`]: `NodeConfig` with TOML loading and validation
//! - [`logging`]: `LogMode` behavior table and subscriber setup
//! - [`error`]: node-specific error types
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │               wirehub-node                          │
//! │               You are here ◄──                      │
//! │                    │                                │
//! │         ┌──────────┴──────────┐                    │
//! │         ▼                     ▼                    │
//! │   wirehub-core         wirehub-transport           │
//! │         │                     │                    │
//! │         └──────────┬──────────┘                    │
//! │                    ▼                               │
//! │             wirehub-common                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Configuration values are advisory inputs for whoever wires up
//!   transports; nothing in wirehub-core or wirehub-transport reads them
//! - `init_logging` installs a global subscriber, call it exactly once
//!
//! ## Last Modified
//! v0.1.0 - Initial node surfaces implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod logging;

// Re-export primary types
pub use config::{LimitsConfig, NetworkConfig, NodeConfig, TimeoutsConfig, TlsConfig};
pub use error::{NodeError, Result};
pub use logging::{init_logging, LogMode, LoggingConfig};
