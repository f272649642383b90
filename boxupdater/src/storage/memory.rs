//! In-memory storage.

use super::{Storage, StorageError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Keeps the document in memory. Clones share the same document.
///
/// Used by tests and by hosts that manage persistence themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    document: Arc<Mutex<Option<Vec<u8>>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStorage {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already holds `document`.
    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        let storage = Self::default();
        *storage.lock() = Some(document.into());
        storage
    }

    /// Returns a copy of the stored document.
    pub fn document(&self) -> Option<Vec<u8>> {
        self.lock().clone()
    }

    /// Returns how many times the document has been saved.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<u8>>> {
        // Assignment is the only mutation, so a poisoned lock still holds a whole document.
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.document())
    }

    fn save(&self, bytes: &[u8]) -> Result<(), StorageError> {
        *self.lock() = Some(bytes.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_document() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();

        clone.save(b"shared").unwrap();

        assert_eq!(storage.load().unwrap().as_deref(), Some(&b"shared"[..]));
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn with_document_does_not_count_as_save() {
        let storage = MemoryStorage::with_document("[]");

        assert_eq!(storage.document().as_deref(), Some(&b"[]"[..]));
        assert_eq!(storage.save_count(), 0);
    }
}
