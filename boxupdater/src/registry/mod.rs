//! The tracked-repository registry.
//!
//! Owns the ordered list of repositories, keeps display names unique through an
//! [`IdentityPolicy`], and rewrites the whole list to [`Storage`] after every
//! change.

mod defaults;
mod error;
mod identity;
mod migration;
mod repository;

pub use defaults::default_repositories;
pub use error::RegistryError;
pub use identity::{Disambiguate, IdentityPolicy, IdentityStrategy, RenameWithCounter};
pub use repository::{NewRepository, Repository};

use crate::storage::Storage;
use tracing::{debug, info};

/// Tracked repositories plus the backend they persist to.
///
/// Methods taking `&mut self` run to completion before returning; callers that
/// share a registry must serialize access themselves.
pub struct Registry {
    storage: Box<dyn Storage>,
    policy: Box<dyn IdentityPolicy>,
    repositories: Vec<Repository>,
}

impl Registry {
    /// Loads the registry from `storage`.
    ///
    /// With nothing stored, the built-in defaults are used and written back
    /// immediately. A stored list has missing display names backfilled; if that
    /// changed anything the migrated list is written back.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if storage fails or the stored list is corrupt.
    pub fn load(
        storage: Box<dyn Storage>,
        policy: Box<dyn IdentityPolicy>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self {
            storage,
            policy,
            repositories: Vec::new(),
        };

        match registry.storage.load()? {
            None => {
                info!("No stored repositories, using defaults");
                registry.repositories = default_repositories();
                registry.save()?;
            }
            Some(bytes) => {
                registry.repositories =
                    serde_json::from_slice(&bytes).map_err(RegistryError::Corrupt)?;

                let migrated = migration::migrate(&mut registry.repositories);
                if migrated > 0 {
                    info!(migrated, "Migrated stored repositories");
                    registry.save()?;
                }
            }
        }

        debug!(count = registry.repositories.len(), "Loaded repositories");
        Ok(registry)
    }

    /// Returns the repositories in insertion order.
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Returns the repository labelled `display_name`.
    pub fn find(&self, display_name: &str) -> Option<&Repository> {
        self.repositories
            .iter()
            .find(|r| r.display_name == display_name)
    }

    /// Adds a repository and persists the list.
    ///
    /// The identity policy picks the new entry's label and may relabel entries
    /// that share its name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the repository is invalid, rejected by the
    /// policy, or the list cannot be saved. On error the registry is unchanged.
    pub fn add(&mut self, repository: NewRepository) -> Result<&Repository, RegistryError> {
        repository.validate()?;

        let snapshot = self.repositories.clone();
        let mut candidate = repository.into_repository();
        if let Err(e) = self.policy.admit(&mut self.repositories, &mut candidate) {
            self.repositories = snapshot;
            return Err(e);
        }

        info!(
            repo = %candidate.full_name(),
            display_name = %candidate.display_name,
            "Adding repository"
        );
        let index = self.repositories.len();
        self.repositories.push(candidate);

        if let Err(e) = self.save() {
            self.repositories = snapshot;
            return Err(e);
        }

        Ok(&self.repositories[index])
    }

    /// Removes the repository labelled `display_name` and persists the list.
    ///
    /// Unknown labels are ignored and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the list cannot be saved. On error the
    /// registry is unchanged.
    pub fn remove(&mut self, display_name: &str) -> Result<Option<Repository>, RegistryError> {
        let Some(index) = self
            .repositories
            .iter()
            .position(|r| r.display_name == display_name)
        else {
            debug!(display_name, "Nothing to remove");
            return Ok(None);
        };

        let snapshot = self.repositories.clone();
        let removed = self.repositories.remove(index);
        self.policy.release(&mut self.repositories, &removed);

        info!(repo = %removed.full_name(), display_name, "Removed repository");

        if let Err(e) = self.save() {
            self.repositories = snapshot;
            return Err(e);
        }

        Ok(Some(removed))
    }

    /// Writes the whole list to storage.
    fn save(&self) -> Result<(), RegistryError> {
        let bytes = serde_json::to_vec(&self.repositories).map_err(RegistryError::Encode)?;
        self.storage.save(&bytes)?;
        Ok(())
    }
}
