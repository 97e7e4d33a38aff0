//! Error types for the persistence gateway

use thiserror::Error;

/// Errors that can occur while persisting sales records
#[derive(Error, Debug)]
pub enum LoadError {
    /// Store unreachable; no writes were attempted
    #[error("Connection error: {0}")]
    Connection(String),

    /// A write failed; the run's transaction was rolled back
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Invalid store configuration
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(feature = "duckdb-backend")]
impl From<duckdb::Error> for LoadError {
    fn from(err: duckdb::Error) -> Self {
        LoadError::Persistence(err.to_string())
    }
}
