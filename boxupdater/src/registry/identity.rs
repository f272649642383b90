//! Display-name assignment policies.
//!
//! A policy decides how a repository is identified when its name collides
//! with one already tracked. Exactly one policy is active per registry.

use super::{RegistryError, Repository};
use serde::Deserialize;
use std::fmt::Debug;
use tracing::debug;

/// Assigns labels (and, for some policies, names) as repositories come and go.
pub trait IdentityPolicy: Debug + Send + Sync {
    /// Prepares `candidate` for insertion into `existing`.
    ///
    /// May relabel members of `existing`. Runs before the candidate is appended.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the candidate cannot be admitted.
    fn admit(
        &self,
        existing: &mut [Repository],
        candidate: &mut Repository,
    ) -> Result<(), RegistryError>;

    /// Updates `remaining` after `removed` has been taken out.
    fn release(&self, remaining: &mut [Repository], removed: &Repository);
}

/// Selects a policy from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityStrategy {
    /// Suffix colliding labels with the owner: `"name (owner)"`.
    #[default]
    Disambiguate,
    /// Rename the newcomer: `name-1`, `name-2`, ...
    Rename,
}

impl IdentityStrategy {
    /// Builds the policy for this strategy.
    pub fn policy(self) -> Box<dyn IdentityPolicy> {
        match self {
            Self::Disambiguate => Box::new(Disambiguate),
            Self::Rename => Box::new(RenameWithCounter),
        }
    }
}

/// Keeps names intact and suffixes every member of a collision set with its owner.
///
/// A repository whose name is unique is labelled with its bare name. As soon as a
/// second repository with the same name arrives, all of them switch to
/// `"name (owner)"`; when only one is left it switches back.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disambiguate;

impl IdentityPolicy for Disambiguate {
    fn admit(
        &self,
        existing: &mut [Repository],
        candidate: &mut Repository,
    ) -> Result<(), RegistryError> {
        if existing
            .iter()
            .any(|r| r.name == candidate.name && r.owner == candidate.owner)
        {
            return Err(RegistryError::AlreadyTracked {
                owner: candidate.owner.clone(),
                name: candidate.name.clone(),
            });
        }

        let mut collisions = 0;
        for repo in existing.iter_mut().filter(|r| r.name == candidate.name) {
            repo.display_name = repo.disambiguated_label();
            collisions += 1;
        }

        if collisions > 0 {
            debug!(name = %candidate.name, collisions, "Disambiguating collision set");
            candidate.display_name = candidate.disambiguated_label();
        } else if label_taken(existing, &candidate.name, None) {
            // Older documents may carry hand-written labels.
            candidate.display_name = candidate.disambiguated_label();
        } else {
            candidate.display_name = candidate.name.clone();
        }

        Ok(())
    }

    fn release(&self, remaining: &mut [Repository], removed: &Repository) {
        let same_name: Vec<usize> = remaining
            .iter()
            .enumerate()
            .filter(|(_, r)| r.name == removed.name)
            .map(|(i, _)| i)
            .collect();

        let [survivor] = same_name[..] else {
            return;
        };

        if label_taken(remaining, &removed.name, Some(survivor)) {
            return;
        }

        debug!(name = %removed.name, "Collision set back to one member");
        remaining[survivor].display_name = remaining[survivor].name.clone();
    }
}

/// Rewrites the newcomer's name with a counter suffix until it is unique.
///
/// Existing entries are never touched, and removal has nothing to undo.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenameWithCounter;

impl IdentityPolicy for RenameWithCounter {
    fn admit(
        &self,
        existing: &mut [Repository],
        candidate: &mut Repository,
    ) -> Result<(), RegistryError> {
        let taken = |name: &str| {
            existing
                .iter()
                .any(|r| r.name == name || r.display_name == name)
        };

        if taken(candidate.name.as_str()) {
            let base = candidate.name.clone();
            let mut counter = 1u32;
            while taken(format!("{base}-{counter}").as_str()) {
                counter += 1;
            }
            candidate.name = format!("{base}-{counter}");
            debug!(from = %base, to = %candidate.name, "Renamed colliding repository");
        }

        candidate.display_name = candidate.name.clone();
        Ok(())
    }

    fn release(&self, _remaining: &mut [Repository], _removed: &Repository) {}
}

/// Returns true if any entry other than `except` is labelled `label`.
fn label_taken(repositories: &[Repository], label: &str, except: Option<usize>) -> bool {
    repositories
        .iter()
        .enumerate()
        .any(|(i, r)| Some(i) != except && r.display_name == label)
}
