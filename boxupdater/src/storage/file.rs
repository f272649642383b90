//! File-backed storage.

use super::{Storage, StorageError, STORAGE_KEY};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::debug;

/// Stores the document as `{dir}/boxupdater-repositories.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a backend rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the full path of the document file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json"))
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path();
        match std::fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), len = bytes.len(), "Read stored document");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    fn save(&self, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path();
        let io_error = |source| StorageError::Io {
            path: path.display().to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_error)?;

        // Written next to the target so the rename stays on one filesystem.
        let mut temp = NamedTempFile::new_in(&self.dir).map_err(io_error)?;
        temp.write_all(bytes).map_err(io_error)?;
        temp.as_file().sync_all().map_err(io_error)?;
        temp.persist(&path).map_err(|source| StorageError::Persist {
            path: path.display().to_string(),
            source,
        })?;

        debug!(path = %path.display(), len = bytes.len(), "Wrote stored document");
        Ok(())
    }
}
