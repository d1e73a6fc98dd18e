//! Error types for the village index engine.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for index operations.
#[derive(Debug, Error)]
pub enum IdmError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error interpreting a cell of delimited source data.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no records to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A source record violates a data-integrity rule.
    #[error("Integrity error for village '{kode}': {message}")]
    Integrity { kode: String, message: String },

    /// Unknown sort field path.
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    /// A score string that does not follow the comma-decimal convention.
    #[error("Invalid score: '{0}'")]
    InvalidScore(String),
}

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, IdmError>;
