//! Core error types for muhasabah-core.
//!
//! This module defines the error hierarchy using thiserror. Very little of
//! it reaches the user: invalid input is dropped silently by the engine and
//! storage failures degrade to seeds or log lines.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for muhasabah-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A stored record could not be encoded
    #[error("Failed to encode record '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors for user-entered values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text was blank
    #[error("'{field}' must not be empty")]
    Empty { field: String },

    /// Quantity was zero or negative
    #[error("'{field}' must be positive, got {value}")]
    NotPositive { field: String, value: i64 },

    /// No entity with that identifier exists
    #[error("Unknown {kind} '{id}'")]
    UnknownId { kind: String, id: String },

    /// Value outside a fixed enumeration
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub fn unknown(kind: &str, id: &str) -> Self {
        ValidationError::UnknownId {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg) => {
                if code.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_field() {
        let err = ValidationError::NotPositive {
            field: "minutes".into(),
            value: -3,
        };
        assert_eq!(err.to_string(), "'minutes' must be positive, got -3");
        assert_eq!(
            ValidationError::unknown("exercise", "burpees").to_string(),
            "Unknown exercise 'burpees'"
        );
    }

    #[test]
    fn storage_errors_lift_into_core_error() {
        fn open() -> Result<()> {
            Err(StorageError::DataDir("no home".into()))?;
            Ok(())
        }
        let err = open().unwrap_err();
        assert!(matches!(err, CoreError::Storage(StorageError::DataDir(_))));
        assert_eq!(err.to_string(), "Storage error: Data directory unavailable: no home");
    }

    #[test]
    fn locked_sqlite_maps_to_locked() {
        // SQLITE_BUSY is reported as DatabaseBusy, not DatabaseLocked.
        let busy = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        );
        assert!(matches!(StorageError::from(busy), StorageError::QueryFailed(_)));

        let locked = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
            None,
        );
        assert!(matches!(StorageError::from(locked), StorageError::Locked));
    }
}
