//! TOML configuration for the source application.
//!
//! Read from `source.toml` in the platform config directory (see
//! [`edgebridge_core::paths::config_dir`]).  Every field has a default, so a
//! missing file, a missing section or a missing key all fall back to the
//! built-in behaviour.
//!
//! ```toml
//! [bridge]
//! edge = "left"          # or "right"
//! edge_threshold = 0     # x at/past which the edge counts as hit
//! screen_width = 1920
//! screen_height = 1080
//! exit_key = 107         # native key code (macOS kVK_F14)
//! key_table = "macos"    # "macos" | "windows" | "linux"
//!
//! [tuning]
//! spike_limit = 1200
//! flush_interval_ms = 8
//! flush_magnitude = 20
//! recenter_radius = 200
//!
//! [logging]
//! level = "info"
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use edgebridge_core::keymap::macos_cg::KVK_F14;
use edgebridge_core::{KeyTable, Tuning};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::mode::{BridgeSettings, EdgeTrigger, ScreenEdge};

/// File name of the source configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "source.toml";

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `key_table` names no shipped table.
    #[error("unknown key table: {0:?}")]
    UnknownKeyTable(String),

    /// A numeric setting is out of range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level source configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub tuning: TuningConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Screen geometry, trigger edge and exit key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BridgeConfig {
    #[serde(default = "default_edge")]
    pub edge: ScreenEdge,
    #[serde(default)]
    pub edge_threshold: i32,
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,
    /// Native key code of the key that returns control to this machine.
    #[serde(default = "default_exit_key")]
    pub exit_key: u16,
    /// Name of the table used to translate captured key codes.
    #[serde(default = "default_key_table")]
    pub key_table: String,
}

/// Motion shaping constants; see [`Tuning`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TuningConfig {
    #[serde(default = "default_spike_limit")]
    pub spike_limit: i32,
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,
    #[serde(default = "default_flush_magnitude")]
    pub flush_magnitude: i32,
    #[serde(default = "default_recenter_radius")]
    pub recenter_radius: i32,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_edge() -> ScreenEdge {
    ScreenEdge::Left
}
fn default_screen_width() -> u32 {
    1920
}
fn default_screen_height() -> u32 {
    1080
}
fn default_exit_key() -> u16 {
    KVK_F14
}
fn default_key_table() -> String {
    "macos".to_string()
}
fn default_spike_limit() -> i32 {
    edgebridge_core::domain::tuning::DEFAULT_SPIKE_LIMIT
}
fn default_flush_interval_ms() -> u64 {
    edgebridge_core::domain::tuning::DEFAULT_FLUSH_INTERVAL.as_millis() as u64
}
fn default_flush_magnitude() -> i32 {
    edgebridge_core::domain::tuning::DEFAULT_FLUSH_MAGNITUDE
}
fn default_recenter_radius() -> i32 {
    edgebridge_core::domain::tuning::DEFAULT_RECENTER_RADIUS
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            edge: default_edge(),
            edge_threshold: 0,
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            exit_key: default_exit_key(),
            key_table: default_key_table(),
        }
    }
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            spike_limit: default_spike_limit(),
            flush_interval_ms: default_flush_interval_ms(),
            flush_magnitude: default_flush_magnitude(),
            recenter_radius: default_recenter_radius(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ── Conversion ────────────────────────────────────────────────────────────────

impl SourceConfig {
    /// Validates the configuration and builds the mode machine settings.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownKeyTable`] for an unrecognised `key_table`, and
    /// [`ConfigError::InvalidValue`] for non-positive sizes or limits.
    pub fn to_settings(&self) -> Result<BridgeSettings, ConfigError> {
        let key_table = KeyTable::by_name(&self.bridge.key_table)
            .ok_or_else(|| ConfigError::UnknownKeyTable(self.bridge.key_table.clone()))?;

        let screen_width = positive_dimension("bridge.screen_width", self.bridge.screen_width)?;
        let screen_height = positive_dimension("bridge.screen_height", self.bridge.screen_height)?;

        let t = &self.tuning;
        let tuning = Tuning {
            spike_limit: positive("tuning.spike_limit", t.spike_limit)?,
            flush_interval: Duration::from_millis(t.flush_interval_ms),
            flush_magnitude: positive("tuning.flush_magnitude", t.flush_magnitude)?,
            recenter_radius: positive("tuning.recenter_radius", t.recenter_radius)?,
        };

        Ok(BridgeSettings {
            screen_width,
            screen_height,
            trigger: EdgeTrigger {
                edge: self.bridge.edge,
                threshold: self.bridge.edge_threshold,
            },
            exit_key: self.bridge.exit_key,
            key_table,
            tuning,
        })
    }
}

fn positive(field: &'static str, value: i32) -> Result<i32, ConfigError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn positive_dimension(field: &'static str, value: u32) -> Result<i32, ConfigError> {
    match i32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be between 1 and {}, got {value}", i32::MAX),
        }),
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Resolves the full path to `source.toml`.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    edgebridge_core::paths::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads the configuration from the platform config directory, returning
/// defaults if the file does not exist.
pub fn load_config() -> Result<SourceConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the configuration from `path`, returning defaults if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<SourceConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SourceConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
