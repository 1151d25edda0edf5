//! TOML configuration file for the command-line front end.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::default_log_filter;
use super::types::BanStoreConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Ban file location.
    #[serde(default)]
    pub store: StoreConfig,
    /// Log output.
    #[serde(default)]
    pub log: LogConfig,
}

/// `[store]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the ban file.
    pub security_dir: Option<PathBuf>,
    /// Ban file name inside `security_dir`.
    pub ban_file_name: Option<String>,
}

/// `[log]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Store overrides described by the `[store]` section.
    pub fn store_overrides(&self) -> BanStoreConfig {
        BanStoreConfig {
            security_dir: self.store.security_dir.clone(),
            ban_file_name: self.store.ban_file_name.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.store.security_dir.is_none());
        assert!(config.store.ban_file_name.is_none());
        assert_eq!(config.log.filter, "info");
        assert!(!config.log.json);
    }

    #[test]
    fn store_section_becomes_overrides() {
        let config: Config = toml::from_str(
            r#"
[store]
security_dir = "/var/lib/bans"
ban_file_name = "blocked.json"

[log]
filter = "debug"
json = true
"#,
        )
        .unwrap();

        let resolved = config.store_overrides().resolve();
        assert_eq!(resolved.security_dir, PathBuf::from("/var/lib/bans"));
        assert_eq!(resolved.ban_file_name, "blocked.json");
        assert_eq!(config.log.filter, "debug");
        assert!(config.log.json);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[store\nsecurity_dir = 1").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
