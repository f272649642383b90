//! Durable storage for the repository document.
//!
//! The registry reads and writes a single serialized blob under a fixed key.
//! Backends only move bytes; they know nothing about the document format.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key under which the repository document is stored.
pub const STORAGE_KEY: &str = "boxupdater-repositories";

/// A whole-document persistence backend.
///
/// Reads and writes are never partial: `save` replaces the previous document
/// entirely and `load` returns the last saved document, or `None` if nothing
/// has been saved yet.
pub trait Storage: Send + Sync {
    /// Returns the stored document, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn load(&self) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn save(&self, bytes: &[u8]) -> Result<(), StorageError>;
}
