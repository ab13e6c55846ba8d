//! Error types for lingua-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by progress-file persistence.
///
/// The public store API degrades on these instead of propagating them (a
/// failed load yields an empty store, a failed save leaves memory
/// authoritative); they surface in logs and in the fallible helpers used by
/// tests.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read progress file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write progress file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("progress file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode progress data: {source}")]
    Encode { source: serde_json::Error },
}

/// Errors raised while loading a translation catalog from disk.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read translation file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("translation file {path} is not a JSON string map: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
