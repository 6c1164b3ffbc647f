// ============================================
// File: crates/wirehub-node/src/error.rs
// ============================================
//! # Node Error Types
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, NodeError>;

/// Node error types.
#[derive(Error, Debug)]
pub enum NodeError {
    /// Configuration file could not be read or parsed.
    #[error("Failed to load configuration from '{path}': {reason}")]
    ConfigLoad {
        /// Path to the configuration file
        path: String,
        /// Why loading failed
        reason: String,
    },

    /// A configuration value failed validation.
    #[error("Invalid configuration: {field} - {reason}")]
    ConfigInvalid {
        /// Dotted path of the offending field
        field: String,
        /// Why the value is invalid
        reason: String,
    },

    /// The logging subsystem could not be initialized.
    #[error("Failed to initialize logging: {reason}")]
    LoggingInit {
        /// Why initialization failed
        reason: String,
    },
}

impl NodeError {
    /// Creates a `ConfigLoad` error.
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `ConfigInvalid` error.
    pub fn config_invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `LoggingInit` error.
    pub fn logging_init(reason: impl Into<String>) -> Self {
        Self::LoggingInit {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NodeError::config_invalid("network.bind_addr", "port cannot be 0");
        assert!(err.to_string().contains("network.bind_addr"));
        assert!(err.to_string().contains("port cannot be 0"));
    }
}
