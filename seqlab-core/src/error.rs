//! Error types for the dataset transform.

use chrono::{DateTime, Utc};

/// Fatal input or configuration problem, reported before any computation.
///
/// Running out of rows after trimming is not an error: the pipeline returns
/// an empty dataset and the caller decides what that means.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate timestamp {timestamp} at row {index}")]
    DuplicateTimestamp {
        index: usize,
        timestamp: DateTime<Utc>,
    },

    #[error("timestamp {timestamp} at row {index} is earlier than the previous row")]
    NonMonotonicTimestamp {
        index: usize,
        timestamp: DateTime<Utc>,
    },

    #[error("non-finite value {value} in column '{column}' at row {index}")]
    NonFinite {
        column: String,
        index: usize,
        value: f64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
