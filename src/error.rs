//! Error handling for the workbase utility library
//!
//! This module provides a hierarchical error system with proper error handling
//! and user-friendly error messages. All errors are typed and can be handled
//! appropriately by the hosting application; the utilities themselves never
//! recover locally — the first failure propagates to the caller unchanged.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkbaseError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("Query failed: {0}")]
    Query(#[source] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: id {id}")]
    RecordNotFound { id: i64 },

    #[error("Database corruption detected")]
    Corruption,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Unknown site: {name}")]
    UnknownSite { name: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

pub type Result<T> = std::result::Result<T, WorkbaseError>;

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ffi::Error { code: ffi::ErrorCode::DatabaseCorrupt, .. }, _) => {
                DatabaseError::Corruption
            }
            _ => DatabaseError::Query(err),
        }
    }
}

use rusqlite::ffi;

impl From<rusqlite::Error> for WorkbaseError {
    fn from(err: rusqlite::Error) -> Self {
        WorkbaseError::Database(err.into())
    }
}

impl From<std::io::Error> for WorkbaseError {
    fn from(err: std::io::Error) -> Self {
        WorkbaseError::Internal(err.into())
    }
}

impl From<toml::de::Error> for WorkbaseError {
    fn from(err: toml::de::Error) -> Self {
        WorkbaseError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<toml::ser::Error> for WorkbaseError {
    fn from(err: toml::ser::Error) -> Self {
        WorkbaseError::Internal(err.into())
    }
}
