//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/stillpoint/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/stillpoint/` (~/.config/stillpoint/)
//! - Data: `$XDG_DATA_HOME/stillpoint/` (~/.local/share/stillpoint/)
//! - State/Logs: `$XDG_STATE_HOME/stillpoint/` (~/.local/state/stillpoint/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics engine configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// How long computed views stay cached, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// How many favorite tools the overview ranks
    #[serde(default = "default_top_tools_count")]
    pub top_tools_count: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            top_tools_count: default_top_tools_count(),
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_top_tools_count() -> usize {
    5
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "stillpoint_core=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns defaults if the config file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| Error::Config(format!("invalid config: {}", e)))
    }

    /// Path to the config file
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("stillpoint").join("config.toml")
    }

    /// Path to the SQLite database
    pub fn database_path() -> PathBuf {
        xdg_data_home().join("stillpoint").join("stillpoint.db")
    }

    /// Directory for logs and other mutable state
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("stillpoint")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analytics.cache_ttl_secs, 300);
        assert_eq!(config.analytics.top_tools_count, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [analytics]
            cache_ttl_secs = 60
            top_tools_count = 3

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.analytics.cache_ttl_secs, 60);
        assert_eq!(config.analytics.top_tools_count, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.analytics.cache_ttl_secs, 300);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "analytics = 12").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(crate::error::Error::Config(_))
        ));
    }
}
