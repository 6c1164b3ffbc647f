// ============================================
// File: crates/wirehub-node/src/logging.rs
// ============================================
//! # Mode-Aware Logging
//!
//! ## Creation Reason
//! A node runs in one of four logging modes that decide, per severity,
//! whether an event reaches the console, the log file, both, or neither.
//! This module holds that decision table and wires it into the tracing
//! subscriber.
//!
//! ## Main Functionality
//! - `LogMode`: the four operating modes
//! - `LoggingConfig`: mode and log directory
//! - `init_logging`: installs the process-wide subscriber
//!
//! ## Mode Behavior
//! | Mode | Console | File |
//! |------|---------|------|
//! | `dev` | all levels | none |
//! | `release` | ERROR/WARN/INFO | ERROR/WARN/INFO |
//! | `verbose` | all levels | all levels |
//! | `hidden` | ERROR/INFO | ERROR/INFO |
//!
//! ## ⚠️ Important Note for Next Developer
//! - `init_logging` installs a global subscriber and can only succeed
//!   once per process; call it from the entry point, never from library
//!   code
//! - The log file name carries the startup timestamp, so restarts never
//!   clobber an earlier run's file
//!
//! ## Last Modified
//! v0.1.0 - Initial logging implementation

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::prelude::*;
use tracing_subscriber::fmt;

use wirehub_common::time::unix_timestamp;

use crate::error::{NodeError, Result};

// ============================================
// LogMode
// ============================================

/// Operating mode of the logging subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    /// Console only, all levels. The default for local work.
    #[default]
    Dev,
    /// Console and file, DEBUG/TRACE suppressed.
    Release,
    /// Console and file, all levels.
    Verbose,
    /// Console and file, INFO and ERROR only.
    Hidden,
}

impl LogMode {
    /// Returns `true` if events at `level` reach the console.
    #[must_use]
    pub fn console_enabled(self, level: Level) -> bool {
        match self {
            Self::Dev | Self::Verbose => true,
            // Level orders most-severe first: ERROR < WARN < INFO
            Self::Release => level <= Level::INFO,
            Self::Hidden => level == Level::ERROR || level == Level::INFO,
        }
    }

    /// Returns `true` if events at `level` reach the log file.
    #[must_use]
    pub fn file_enabled(self, level: Level) -> bool {
        match self {
            Self::Dev => false,
            Self::Verbose => true,
            Self::Release => level <= Level::INFO,
            Self::Hidden => level == Level::ERROR || level == Level::INFO,
        }
    }

    /// Returns `true` if this mode writes a log file at all.
    #[must_use]
    pub const fn uses_file(self) -> bool {
        !matches!(self, Self::Dev)
    }
}

// ============================================
// LoggingConfig
// ============================================

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Operating mode.
    #[serde(default)]
    pub mode: LogMode,

    /// Directory log files are written into (file-writing modes only).
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            mode: LogMode::default(),
            dir: default_log_dir(),
        }
    }
}

// ============================================
// Initialization
// ============================================

/// Installs the process-wide tracing subscriber for `config`.
///
/// A console layer is always present; file-writing modes add a second
/// layer appending to a timestamped file under `config.dir`, which is
/// created if missing. Each layer consults the [`LogMode`] behavior
/// table per event.
///
/// # Errors
/// Returns `LoggingInit` if the log directory or file cannot be
/// prepared, or if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let mode = config.mode;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_filter(filter_fn(move |meta| {
            mode.console_enabled(*meta.level())
        }));

    let file_layer = if mode.uses_file() {
        std::fs::create_dir_all(&config.dir).map_err(|e| {
            NodeError::logging_init(format!(
                "creating log directory '{}': {e}",
                config.dir
            ))
        })?;

        let file_path =
            Path::new(&config.dir).join(format!("wirehub-{}.log", unix_timestamp()));
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .map_err(|e| {
                NodeError::logging_init(format!(
                    "opening log file '{}': {e}",
                    file_path.display()
                ))
            })?;

        Some(
            fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_filter(filter_fn(move |meta| mode.file_enabled(*meta.level()))),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| NodeError::logging_init(e.to_string()))
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_mode_table() {
        assert!(LogMode::Dev.console_enabled(Level::TRACE));
        assert!(LogMode::Dev.console_enabled(Level::ERROR));
        assert!(!LogMode::Dev.file_enabled(Level::ERROR));
        assert!(!LogMode::Dev.uses_file());
    }

    #[test]
    fn test_release_mode_table() {
        assert!(LogMode::Release.console_enabled(Level::INFO));
        assert!(LogMode::Release.console_enabled(Level::WARN));
        assert!(LogMode::Release.console_enabled(Level::ERROR));
        assert!(!LogMode::Release.console_enabled(Level::DEBUG));
        assert!(!LogMode::Release.console_enabled(Level::TRACE));

        assert!(LogMode::Release.file_enabled(Level::INFO));
        assert!(!LogMode::Release.file_enabled(Level::TRACE));
        assert!(LogMode::Release.uses_file());
    }

    #[test]
    fn test_verbose_mode_table() {
        for level in [
            Level::TRACE,
            Level::DEBUG,
            Level::INFO,
            Level::WARN,
            Level::ERROR,
        ] {
            assert!(LogMode::Verbose.console_enabled(level));
            assert!(LogMode::Verbose.file_enabled(level));
        }
    }

    #[test]
    fn test_hidden_mode_table() {
        assert!(LogMode::Hidden.console_enabled(Level::INFO));
        assert!(LogMode::Hidden.console_enabled(Level::ERROR));
        assert!(!LogMode::Hidden.console_enabled(Level::WARN));
        assert!(!LogMode::Hidden.console_enabled(Level::DEBUG));

        assert!(LogMode::Hidden.file_enabled(Level::INFO));
        assert!(LogMode::Hidden.file_enabled(Level::ERROR));
        assert!(!LogMode::Hidden.file_enabled(Level::WARN));
    }

    #[test]
    fn test_mode_deserialization() {
        let config: LoggingConfig =
            toml::from_str("mode = \"hidden\"\ndir = \"out\"").unwrap();
        assert_eq!(config.mode, LogMode::Hidden);
        assert_eq!(config.dir, "out");

        let config: LoggingConfig = toml::from_str("").unwrap();
        assert_eq!(config.mode, LogMode::Dev);
        assert_eq!(config.dir, "logs");
    }

    #[test]
    fn test_init_writes_log_file() {
        let dir = std::env::temp_dir().join(format!(
            "wirehub-log-test-{}-{}",
            std::process::id(),
            unix_timestamp()
        ));
        let config = LoggingConfig {
            mode: LogMode::Verbose,
            dir: dir.display().to_string(),
        };

        // Only one global subscriber per process; this is the single
        // test that installs one.
        init_logging(&config).unwrap();
        tracing::info!("logging smoke test");

        let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(entries.len(), 1);

        // A second install must fail cleanly
        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, NodeError::LoggingInit { .. }));

        std::fs::remove_dir_all(&dir).ok();
    }
}
