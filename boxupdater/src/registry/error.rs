//! Registry error types.

use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur while loading or mutating the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored document is not a valid repository list.
    #[error("Stored repository list is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The repository list could not be serialized.
    #[error("Failed to encode repository list: {0}")]
    Encode(#[source] serde_json::Error),

    /// A field of a new repository is not acceptable.
    #[error("Invalid repository {field} '{value}': {message}")]
    InvalidRepository {
        field: &'static str,
        value: String,
        message: &'static str,
    },

    /// The same owner/name pair is already tracked.
    #[error("Repository {owner}/{name} is already tracked")]
    AlreadyTracked { owner: String, name: String },
}
