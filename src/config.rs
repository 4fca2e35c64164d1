//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Configuration files (TOML)
//! - Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format for `parse` (json, table, dot)
    #[serde(default = "default_format")]
    pub format: String,

    /// Default number of entries listed by `top`
    #[serde(default = "default_top")]
    pub top: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_format() -> String {
    "table".to_string()
}

fn default_top() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            top: default_top(),
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

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./crfsuite-dump.toml
    /// 2. ~/.crfsuite-dump/config.toml
    /// 3. /etc/crfsuite-dump/config.toml
    pub fn load() -> Result<Self> {
        let mut paths = vec![PathBuf::from("crfsuite-dump.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".crfsuite-dump").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/crfsuite-dump/config.toml"));

        for path in paths {
            if path.exists() {
                tracing::info!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }
}
