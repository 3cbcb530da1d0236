//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / csv::Error                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path                         │
//! │       │                                                                 │
//! │       ├──► EventLog::open  → ApiError STORAGE_ERROR (startup)          │
//! │       └──► EventLog::record → warn! + AppendOutcome::Dropped           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use thiserror::Error;

/// Event log errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening, creating or flushing a log file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The exclusive lock could not be taken.
    #[error("Failed to lock '{path}': {source}")]
    Lock {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing or reading a CSV record failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn lock(path: &Path, source: std::io::Error) -> Self {
        StoreError::Lock {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
