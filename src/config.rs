//! Configuration management for Ticklist
//!
//! This module handles loading, validating, and saving the configuration:
//! where data lives, which storage backend to use, history behavior and
//! terminal UI defaults.

use crate::error::{Error, Result};
use crate::history::DEFAULT_DATE_FORMAT;
use crate::task::TaskFilter;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".ticklist.json";

/// SQLite database file name inside the data directory
pub const DATABASE_FILE: &str = "ticklist.db";

/// Single-instance lock file name inside the data directory
pub const LOCK_FILE: &str = "ticklist.lock";

/// Main configuration structure for Ticklist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the database, collection files and lock file
    pub data_dir: PathBuf,

    /// Which key-value backend stores the collections
    pub backend: BackendKind,

    /// History configuration
    pub history: HistoryConfig,

    /// Terminal UI configuration
    pub ui: UiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Available storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One SQLite database with a key-value table
    Sqlite,
    /// One JSON file per collection
    File,
}

/// Configuration for the deletion history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Whether clearing completed tasks also records them in history
    pub record_cleared: bool,

    /// strftime-style format used to show deletion times
    pub date_format: String,
}

/// Configuration for the terminal UI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Filter selected when the UI opens
    pub default_filter: TaskFilter,

    /// Ask before wiping the history
    pub confirm_clear_history: bool,
}

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: crate::default_data_dir()
                .unwrap_or_else(|_| PathBuf::from("/tmp").join(crate::DEFAULT_DATA_DIR)),
            backend: BackendKind::Sqlite,
            history: HistoryConfig::default(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            record_cleared: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_filter: TaskFilter::All,
            confirm_clear_history: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path()?;
        self.save_to_path(&config_path)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Result<PathBuf> {
        let home = home::home_dir().ok_or(Error::HomeDirectoryNotFound)?;
        Ok(home.join(DEFAULT_CONFIG_FILE))
    }

    /// Path of the SQLite database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }

    /// Path of the single-instance lock file
    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join(LOCK_FILE)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(Error::config_validation("data_dir", "must not be empty"));
        }

        if self.history.date_format.trim().is_empty() {
            return Err(Error::config_validation(
                "history.date_format",
                "must not be empty",
            ));
        }

        if StrftimeItems::new(&self.history.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::config_validation(
                "history.date_format",
                "is not a valid strftime format",
            ));
        }

        // Validate logging level
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(Error::config_validation(
                    "logging.level",
                    "must be one of: trace, debug, info, warn, error",
                ))
            }
        }

        Ok(())
    }
}
