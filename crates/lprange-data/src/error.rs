//! Error types for snapshot loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for data loading operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors raised while reading snapshot files.
///
/// Malformed individual records are not errors; they are dropped during
/// normalization. These variants cover failures of the file as a whole.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("Missing column '{0}' in CSV header")]
    MissingColumn(&'static str),
}
