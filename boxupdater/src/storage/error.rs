//! Storage error types.

use thiserror::Error;

/// Errors that can occur while reading or writing the persisted document.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read or write a file.
    #[error("Storage I/O failed for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to move a fully written temporary file into place.
    #[error("Failed to replace '{path}': {source}")]
    Persist {
        path: String,
        #[source]
        source: tempfile::PersistError,
    },
}
