//! Error types for dataset loading.

use thiserror::Error;

/// Result type alias for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Errors that can occur while loading the telemetry dataset.
///
/// Cloneable so a failed startup load can be replayed to every request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse dataset: {0}")]
    Parse(String),

    #[error("dataset must be a JSON array of records")]
    NotAnArray,
}
