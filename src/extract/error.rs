//! Error types for input decoding

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding tabular input
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Input file not found
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    /// Header row missing or empty
    #[error("Missing header row: {0}")]
    MissingHeader(PathBuf),

    /// A required column is absent from the header
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// Structurally malformed input
    #[error("Malformed input: {path} - {reason}")]
    Malformed { path: PathBuf, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
