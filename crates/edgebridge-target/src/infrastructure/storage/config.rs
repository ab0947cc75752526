//! TOML configuration for the target application.
//!
//! Read from `target.toml` in the platform config directory.  A missing file
//! or a missing key falls back to the defaults below.
//!
//! ```toml
//! [injection]
//! key_table = "windows"   # "macos" | "windows" | "linux"
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use edgebridge_core::KeyTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the target configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "target.toml";

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown key table: {0:?}")]
    UnknownKeyTable(String),
}

/// Top-level target configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TargetConfig {
    #[serde(default)]
    pub injection: InjectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InjectionConfig {
    /// Name of the table used to turn HID usages into native key codes.
    #[serde(default = "default_key_table")]
    pub key_table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_key_table() -> String {
    "windows".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            key_table: default_key_table(),
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

impl TargetConfig {
    /// Resolves the configured key table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKeyTable`] if no shipped table has that name.
    pub fn key_table(&self) -> Result<&'static KeyTable, ConfigError> {
        KeyTable::by_name(&self.injection.key_table)
            .ok_or_else(|| ConfigError::UnknownKeyTable(self.injection.key_table.clone()))
    }
}

/// Resolves the full path to `target.toml`.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    edgebridge_core::paths::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads the configuration from the platform config directory, returning
/// defaults if the file does not exist.
pub fn load_config() -> Result<TargetConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the configuration from `path`, returning defaults if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<TargetConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TargetConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_windows_table() {
        let cfg = TargetConfig::default();

        assert_eq!(cfg.key_table().unwrap().name(), "windows");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_key_table_is_selected_by_name() {
        let cfg: TargetConfig = toml::from_str("[injection]\nkey_table = \"linux\"\n").unwrap();

        assert_eq!(cfg.key_table().unwrap().name(), "linux");
        assert_eq!(cfg.logging, LoggingConfig::default());
    }

    #[test]
    fn test_unknown_key_table_is_rejected() {
        let mut cfg = TargetConfig::default();
        cfg.injection.key_table = "os2".to_string();

        assert!(matches!(cfg.key_table(), Err(ConfigError::UnknownKeyTable(name)) if name == "os2"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/target.toml");

        assert_eq!(load_config_from(&path).unwrap(), TargetConfig::default());
    }

    #[test]
    fn test_load_from_temp_file() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("edgebridge_target_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[injection]\nkey_table = \"macos\"\n[logging]\nlevel = \"trace\"\n")
            .unwrap();

        // Act
        let cfg = load_config_from(&path).unwrap();

        // Assert
        assert_eq!(cfg.injection.key_table, "macos");
        assert_eq!(cfg.logging.level, "trace");

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = std::env::temp_dir().join(format!("edgebridge_target_bad_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "injection = [").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(&dir).ok();
    }
}
