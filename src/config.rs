//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the dictionary lookup engine, supporting a
//! TOML configuration file with environment variable overrides and
//! validation.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration file (TOML), environment variables
//! - **Output**: Validated configuration structs with defaults and overrides
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Environment variables (highest priority)
//! 2. Configuration file
//! 3. Default values (lowest priority)
//!
//! ## Usage
//! ```rust,no_run
//! use jmdict_lookup::config::Config;
//!
//! let config = Config::from_file("config.toml").unwrap();
//! println!("Lexicon archive: {}", config.source.archive_url);
//! ```

use crate::errors::{DictionaryError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure containing all settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Lexicon archive source settings
    pub source: SourceConfig,
    /// Persistent cache settings
    pub cache: CacheConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Lexicon archive source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL of the gzip compressed lexicon JSON archive
    pub archive_url: String,
    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
    /// User agent sent with archive requests
    pub user_agent: String,
}

/// Persistent cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache database path
    pub db_path: PathBuf,
    /// Compress the cached lexicon document on disk
    pub enable_compression: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Config {
    /// Load configuration from a specific file, falling back to defaults when
    /// the file does not exist
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| DictionaryError::Config {
                message: format!("Failed to read config file {:?}: {}", path, e),
            })?;

            toml::from_str(&content).map_err(|e| DictionaryError::Config {
                message: format!("Failed to parse config file {:?}: {}", path, e),
            })?
        } else {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("JMDICT_ARCHIVE_URL") {
            self.source.archive_url = url;
        }
        if let Ok(timeout) = std::env::var("JMDICT_REQUEST_TIMEOUT") {
            self.source.request_timeout_seconds =
                timeout.parse().map_err(|_| DictionaryError::Config {
                    message: "Invalid value in JMDICT_REQUEST_TIMEOUT".to_string(),
                })?;
        }
        if let Ok(db_path) = std::env::var("JMDICT_CACHE_PATH") {
            self.cache.db_path = PathBuf::from(db_path);
        }
        if let Ok(level) = std::env::var("JMDICT_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.source.archive_url.is_empty() {
            return Err(DictionaryError::ValidationFailed {
                field: "source.archive_url".to_string(),
                reason: "Archive URL cannot be empty".to_string(),
            });
        }

        if !self.source.archive_url.starts_with("http://")
            && !self.source.archive_url.starts_with("https://")
        {
            return Err(DictionaryError::ValidationFailed {
                field: "source.archive_url".to_string(),
                reason: format!("Not an HTTP(S) URL: {}", self.source.archive_url),
            });
        }

        if self.source.request_timeout_seconds == 0 {
            return Err(DictionaryError::ValidationFailed {
                field: "source.request_timeout_seconds".to_string(),
                reason: "Timeout cannot be zero".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig {
                archive_url: "https://data.etoshokan.app/jmdict-eng-3.6.2.json.gz".to_string(),
                request_timeout_seconds: 60,
                user_agent: "jmdict-lookup/0.1".to_string(),
            },
            cache: CacheConfig {
                db_path: PathBuf::from("./data/lexicon_cache"),
                enable_compression: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}
