//! Error handling for Ticklist
//!
//! This module defines the error types used throughout the application,
//! providing clear error messages and proper error propagation.

use crate::types::TaskId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Ticklist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Ticklist operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input failed a precondition, nothing was changed
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// No task with the given id in the active set
    #[error("Task not found: {id}")]
    TaskNotFound { id: TaskId },

    /// A collection could not be written to the key-value store
    #[error("Failed to persist '{key}': {reason}")]
    Persistence { key: String, reason: String },

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Home directory could not be determined
    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// Invalid command line arguments
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Another interactive instance holds the lock
    #[error("Another instance is already running (pid {pid}, lock {path})")]
    InstanceLocked { path: PathBuf, pid: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {field} - {reason}")]
    ConfigValidation { field: String, reason: String },

    /// Generic error with custom message
    #[error("{message}")]
    Custom { message: String },
}

impl Error {
    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(message: S) -> Self {
        Error::Custom {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }

    /// Create a persistence error for the given store key
    pub fn persistence<K: Into<String>, R: ToString>(key: K, reason: R) -> Self {
        Error::Persistence {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments<S: Into<String>>(message: S) -> Self {
        Error::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a config validation error
    pub fn config_validation<S: Into<String>>(field: S, reason: S) -> Self {
        Error::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable
    ///
    /// Validation and lookup failures leave state untouched, so the user can
    /// simply try again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Validation { .. } => true,
            Error::TaskNotFound { .. } => true,
            Error::Persistence { .. } => true,
            Error::Io(_) => true,
            Error::InstanceLocked { .. } => true,
            Error::InvalidArguments { .. } => false,
            Error::HomeDirectoryNotFound => false,
            Error::ConfigValidation { .. } => false,
            _ => true,
        }
    }

    /// Get the error category for logging purposes
    pub fn category(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "validation",
            Error::TaskNotFound { .. } => "not_found",
            Error::Persistence { .. } => "persistence",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Database(_) => "database",
            Error::HomeDirectoryNotFound => "system",
            Error::InvalidArguments { .. } => "arguments",
            Error::InstanceLocked { .. } => "lock",
            Error::ConfigValidation { .. } => "config",
            Error::Custom { .. } => "custom",
        }
    }
}
