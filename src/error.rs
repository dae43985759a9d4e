//! Error types for Focus Space.
//!
//! The scheduling core itself never fails; these cover the edges around it
//! (persistence, id lookup and user-supplied values).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Focus Space operations
#[derive(Error, Debug)]
pub enum FocusError {
    /// Reading or writing the task file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted data could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No task matches the given id
    #[error("Task {id} not found")]
    TaskNotFound { id: String },

    /// An id prefix matched more than one task
    #[error("Id '{prefix}' is ambiguous ({count} tasks match)")]
    AmbiguousId { prefix: String, count: usize },

    /// A date was not in YYYY-MM-DD form
    #[error("Invalid date '{input}'. Use YYYY-MM-DD.")]
    InvalidDate { input: String },

    /// An enum-like value (status, frequency, ...) was not recognised
    #[error("Invalid {field} '{input}'. Expected one of: {expected}")]
    InvalidValue {
        field: &'static str,
        input: String,
        expected: &'static str,
    },
}

impl FocusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FocusError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Focus Space operations
pub type Result<T> = std::result::Result<T, FocusError>;
