//! Namespace configuration
//!
//! Configuration is plain data with defaults for every field, stored as JSON.

use serde::{Deserialize, Serialize};
use services_logger::LogLevel;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The configuration text is not valid
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration was written by a newer format
    #[error("Unsupported configuration version {found} (newest supported is {supported})")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest version this build understands
        supported: u32,
    },
}

/// Which platform's naming and listing conventions to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingConvention {
    /// `/` separated, absolute paths, `ls -l` listings
    #[default]
    Unix,
    /// `\` separated, drive roots, `dir` style listings
    Windows,
}

/// Settings for constructing a namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    /// Version of the configuration format
    pub version: u32,
    /// Synthesize missing parent directories on `add`
    pub auto_create_parents: bool,
    /// Naming rules and default listing format
    pub naming: NamingConvention,
    /// Minimum level recorded by the namespace logger
    pub log_level: LogLevel,
}

impl NamespaceConfig {
    /// Current version of the configuration format
    pub const CURRENT_VERSION: u32 = 1;

    /// Creates the default configuration
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            auto_create_parents: true,
            naming: NamingConvention::Unix,
            log_level: LogLevel::Info,
        }
    }

    /// Parses configuration from JSON; absent fields take their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        if config.version > Self::CURRENT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: Self::CURRENT_VERSION,
            });
        }
        Ok(config)
    }

    /// Reads configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Serializes to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = NamespaceConfig::default();
        assert_eq!(config.version, 1);
        assert!(config.auto_create_parents);
        assert_eq!(config.naming, NamingConvention::Unix);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = NamespaceConfig::from_json("{}").unwrap();
        assert_eq!(config, NamespaceConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config =
            NamespaceConfig::from_json(r#"{"naming": "windows", "auto_create_parents": false}"#)
                .unwrap();
        assert_eq!(config.naming, NamingConvention::Windows);
        assert!(!config.auto_create_parents);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_json_round_trip() {
        let config = NamespaceConfig {
            naming: NamingConvention::Windows,
            log_level: LogLevel::Debug,
            ..NamespaceConfig::default()
        };
        let text = config.to_json().unwrap();
        assert!(text.contains("\"windows\""));
        assert_eq!(NamespaceConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_newer_version() {
        let result = NamespaceConfig::from_json(r#"{"version": 2}"#);
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion {
                found: 2,
                supported: 1
            })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = NamespaceConfig::from_json(r#"{"naming": "beos"}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"log_level": "warn"}}"#).unwrap();

        let config = NamespaceConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.auto_create_parents);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");

        let result = NamespaceConfig::load(&missing);
        match result {
            Err(ConfigError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
