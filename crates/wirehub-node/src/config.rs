// ============================================
// File: crates/wirehub-node/src/config.rs
// ============================================
//! # Node Configuration
//!
//! ## Creation Reason
//! Provides configuration management for a WireHub node, supporting
//! TOML files with per-field defaults and validation.
//!
//! ## Main Functionality
//! - `NodeConfig`: main configuration structure
//! - TOML file loading and parsing
//! - Configuration validation
//! - Default values matching the built-in profile
//!
//! ## Configuration Sections
//! - `network`: bind address, transport protocol, TLS material
//! - `limits`: client, buffer, queue, and message size caps
//! - `timeouts`: read/write/idle deadlines, heartbeat interval
//! - `logging`: log mode and directory
//!
//! ## Example Configuration
//! ```toml
//! [network]
//! bind_addr = "127.0.0.1:8080"
//! protocol = "stream"
//!
//! [network.tls]
//! enabled = false
//!
//! [limits]
//! max_clients = 10000
//! buffer_size = 8192
//! send_queue_depth = 256
//! max_message_size = 4194304
//!
//! [timeouts]
//! read_secs = 30
//! write_secs = 10
//! idle_secs = 300
//! heartbeat_interval_secs = 30
//!
//! [logging]
//! mode = "dev"
//! dir = "logs"
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - All config changes require a node restart
//! - Validate config before wiring up transports
//! - The protocol layers treat these values as opaque inputs; nothing
//!   here is enforced by wirehub-core or wirehub-transport themselves
//!
//! ## Last Modified
//! v0.1.0 - Initial configuration implementation

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use wirehub_core::protocol::ProtocolKind;

use crate::error::{NodeError, Result};
use crate::logging::LoggingConfig;

// ============================================
// NodeConfig
// ============================================

/// Main node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Network configuration.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Resource limits.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Deadlines and intervals.
    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Whether payloads should be marked compressed.
    ///
    /// Advisory only: sets the intent for the COMPRESSED header flag,
    /// no codec is applied by this crate.
    #[serde(default)]
    pub compression: bool,
}

impl NodeConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigLoad` if the file cannot be read or parsed, or a
    /// validation error for out-of-range values.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        info!("Loading configuration from: {}", path_str);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| NodeError::config_load(&path_str, e.to_string()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| NodeError::config_load(&path_str, e.to_string()))?;

        config.validate()?;

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Loads configuration from a string (useful for testing).
    ///
    /// # Errors
    /// Returns `ConfigLoad` on parse failure or a validation error.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| NodeError::config_load("<string>", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns `ConfigInvalid` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.network.validate()?;
        self.limits.validate()?;
        self.timeouts.validate()?;
        Ok(())
    }

    /// Serializes configuration to a TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

// ============================================
// NetworkConfig
// ============================================

/// Network configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Address the node binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// Which transport the node speaks.
    #[serde(default)]
    pub protocol: ProtocolKind,

    /// TLS settings for stream transports.
    #[serde(default)]
    pub tls: TlsConfig,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

impl NetworkConfig {
    fn validate(&self) -> Result<()> {
        if self.bind_addr.port() == 0 {
            return Err(NodeError::config_invalid(
                "network.bind_addr",
                "port cannot be 0",
            ));
        }
        self.tls.validate()
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            protocol: ProtocolKind::default(),
            tls: TlsConfig::default(),
        }
    }
}

// ============================================
// TlsConfig
// ============================================

/// TLS configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Whether TLS is enabled for stream connections.
    #[serde(default)]
    pub enabled: bool,

    /// Path to the certificate file.
    #[serde(default)]
    pub cert_file: Option<String>,

    /// Path to the private key file.
    #[serde(default)]
    pub key_file: Option<String>,
}

impl TlsConfig {
    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.cert_file.as_deref().unwrap_or("").is_empty() {
            return Err(NodeError::config_invalid(
                "network.tls.cert_file",
                "required when TLS is enabled",
            ));
        }
        if self.key_file.as_deref().unwrap_or("").is_empty() {
            return Err(NodeError::config_invalid(
                "network.tls.key_file",
                "required when TLS is enabled",
            ));
        }
        Ok(())
    }
}

// ============================================
// LimitsConfig
// ============================================

/// Resource limits configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum concurrent clients.
    #[serde(default = "default_max_clients")]
    pub max_clients: usize,

    /// Read buffer size in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Outbound queue depth per client.
    #[serde(default = "default_send_queue_depth")]
    pub send_queue_depth: usize,

    /// Maximum message size in bytes (datagram frame cap).
    #[serde(default = "default_max_message_size")]
    pub max_message_size: usize,
}

fn default_max_clients() -> usize {
    10_000
}

fn default_buffer_size() -> usize {
    8192
}

fn default_send_queue_depth() -> usize {
    256
}

fn default_max_message_size() -> usize {
    4 * 1024 * 1024
}

impl LimitsConfig {
    fn validate(&self) -> Result<()> {
        if self.max_clients == 0 {
            return Err(NodeError::config_invalid(
                "limits.max_clients",
                "must be greater than 0",
            ));
        }
        if self.buffer_size == 0 {
            return Err(NodeError::config_invalid(
                "limits.buffer_size",
                "must be greater than 0",
            ));
        }
        if self.send_queue_depth == 0 {
            return Err(NodeError::config_invalid(
                "limits.send_queue_depth",
                "must be greater than 0",
            ));
        }
        if self.max_message_size == 0 {
            return Err(NodeError::config_invalid(
                "limits.max_message_size",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_clients: default_max_clients(),
            buffer_size: default_buffer_size(),
            send_queue_depth: default_send_queue_depth(),
            max_message_size: default_max_message_size(),
        }
    }
}

// ============================================
// TimeoutsConfig
// ============================================

/// Deadline and interval configuration section, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    /// Read deadline in seconds.
    #[serde(default = "default_read_secs")]
    pub read_secs: u64,

    /// Write deadline in seconds.
    #[serde(default = "default_write_secs")]
    pub write_secs: u64,

    /// Idle disconnect threshold in seconds.
    #[serde(default = "default_idle_secs")]
    pub idle_secs: u64,

    /// Heartbeat interval in seconds.
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: u64,
}

fn default_read_secs() -> u64 {
    30
}

fn default_write_secs() -> u64 {
    10
}

fn default_idle_secs() -> u64 {
    300
}

fn default_heartbeat_interval_secs() -> u64 {
    30
}

impl TimeoutsConfig {
    fn validate(&self) -> Result<()> {
        if self.heartbeat_interval_secs == 0 {
            return Err(NodeError::config_invalid(
                "timeouts.heartbeat_interval_secs",
                "must be greater than 0",
            ));
        }
        if self.idle_secs != 0 && self.idle_secs < self.heartbeat_interval_secs {
            return Err(NodeError::config_invalid(
                "timeouts.idle_secs",
                "must not be shorter than the heartbeat interval",
            ));
        }
        Ok(())
    }

    /// Returns the read deadline, `None` when disabled (0).
    #[must_use]
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_secs != 0).then(|| Duration::from_secs(self.read_secs))
    }

    /// Returns the write deadline, `None` when disabled (0).
    #[must_use]
    pub fn write_timeout(&self) -> Option<Duration> {
        (self.write_secs != 0).then(|| Duration::from_secs(self.write_secs))
    }
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            read_secs: default_read_secs(),
            write_secs: default_write_secs(),
            idle_secs: default_idle_secs(),
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
        }
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogMode;

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert!(config.validate().is_ok());

        assert_eq!(config.network.bind_addr.port(), 8080);
        assert_eq!(config.network.protocol, ProtocolKind::Stream);
        assert_eq!(config.limits.max_clients, 10_000);
        assert_eq!(config.limits.buffer_size, 8192);
        assert_eq!(config.limits.send_queue_depth, 256);
        assert_eq!(config.limits.max_message_size, 4 * 1024 * 1024);
        assert_eq!(config.timeouts.read_secs, 30);
        assert_eq!(config.timeouts.write_secs, 10);
        assert_eq!(config.timeouts.idle_secs, 300);
        assert!(!config.compression);
    }

    #[test]
    fn test_full_config_format() {
        let toml = r#"
            compression = true

            [network]
            bind_addr = "0.0.0.0:9000"
            protocol = "datagram"

            [network.tls]
            enabled = false

            [limits]
            max_clients = 500
            buffer_size = 4096
            send_queue_depth = 64
            max_message_size = 65507

            [timeouts]
            read_secs = 5
            write_secs = 5
            idle_secs = 60
            heartbeat_interval_secs = 15

            [logging]
            mode = "verbose"
            dir = "/var/log/wirehub"
        "#;

        let config = NodeConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.network.bind_addr.port(), 9000);
        assert_eq!(config.network.protocol, ProtocolKind::Datagram);
        assert_eq!(config.limits.max_clients, 500);
        assert_eq!(config.limits.max_message_size, 65507);
        assert_eq!(config.logging.mode, LogMode::Verbose);
        assert_eq!(config.logging.dir, "/var/log/wirehub");
        assert!(config.compression);
        assert_eq!(
            config.timeouts.read_timeout(),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [network]
            bind_addr = "127.0.0.1:7777"
        "#;

        let config = NodeConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.network.bind_addr.port(), 7777);
        assert_eq!(config.limits.max_clients, 10_000);
        assert_eq!(config.timeouts.heartbeat_interval_secs, 30);
    }

    #[test]
    fn test_zero_port_rejected() {
        let toml = r#"
            [network]
            bind_addr = "127.0.0.1:0"
        "#;

        let err = NodeConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, NodeError::ConfigInvalid { .. }));
        assert!(err.to_string().contains("network.bind_addr"));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let toml = r#"
            [limits]
            max_clients = 0
        "#;
        assert!(NodeConfig::from_toml_str(toml).is_err());

        let toml = r#"
            [limits]
            max_message_size = 0
        "#;
        assert!(NodeConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_tls_requires_paths() {
        let toml = r#"
            [network.tls]
            enabled = true
        "#;
        let err = NodeConfig::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("tls"));

        let toml = r#"
            [network.tls]
            enabled = true
            cert_file = "node.crt"
            key_file = "node.key"
        "#;
        assert!(NodeConfig::from_toml_str(toml).is_ok());
    }

    #[test]
    fn test_idle_shorter_than_heartbeat_rejected() {
        let toml = r#"
            [timeouts]
            idle_secs = 10
            heartbeat_interval_secs = 30
        "#;
        let err = NodeConfig::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("timeouts.idle_secs"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = NodeConfig::default();
        let serialized = config.to_toml();
        let reparsed = NodeConfig::from_toml_str(&serialized).unwrap();
        assert_eq!(reparsed.network.bind_addr, config.network.bind_addr);
        assert_eq!(reparsed.limits.max_clients, config.limits.max_clients);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = NodeConfig::load("/nonexistent/wirehub.toml")
            .await
            .unwrap_err();
        assert!(matches!(err, NodeError::ConfigLoad { .. }));
    }
}
