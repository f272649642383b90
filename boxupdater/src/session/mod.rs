//! Wires configuration, storage, registry and resolver together for a host.

mod error;
mod summary;

pub use error::SessionError;
pub use summary::{CheckResult, CheckSummary};

use crate::config::AppConfig;
use crate::registry::Registry;
use crate::releases::{GitHubSource, Release, ReleaseResolver, ResolveError};
use crate::storage::FileStorage;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

/// A loaded registry plus a resolver, configured from an [`AppConfig`].
pub struct Session {
    config: AppConfig,
    registry: Registry,
    resolver: ReleaseResolver,
}

impl Session {
    /// Opens file storage and a GitHub-backed resolver as configured.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the storage directory cannot be determined,
    /// the registry cannot be loaded, or the GitHub client cannot be built.
    pub fn open(config: AppConfig) -> Result<Self, SessionError> {
        let storage = FileStorage::new(config.storage_dir()?);
        info!(path = %storage.path().display(), "Opening repository store");

        let registry = Registry::load(Box::new(storage), config.identity.policy())?;

        let token = config.github_token();
        let source =
            GitHubSource::connect(&config.api_base, &config.user_agent, token.as_deref())?;

        Ok(Self::from_parts(
            config,
            registry,
            ReleaseResolver::new(source),
        ))
    }

    /// Assembles a session from already built parts.
    pub fn from_parts(config: AppConfig, registry: Registry, resolver: ReleaseResolver) -> Self {
        Self {
            config,
            registry,
            resolver,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the registry for mutation.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Resolves the repository labelled `identifier`.
    ///
    /// # Errors
    ///
    /// See [`ReleaseResolver::fetch_releases`].
    pub async fn fetch_releases(&self, identifier: &str) -> Result<Vec<Release>, ResolveError> {
        self.resolver
            .fetch_releases(&self.registry, identifier)
            .await
    }

    /// Resolves every tracked repository, at most `concurrency` at a time.
    ///
    /// A failing repository is recorded in the summary and does not stop the
    /// others. Results are in registry order.
    pub async fn check_all(&self) -> CheckSummary {
        let resolver = &self.resolver;

        let results: Vec<CheckResult> = stream::iter(self.registry.repositories())
            .map(|repo| async move {
                let outcome = resolver.fetch_for(repo).await;
                if let Err(e) = &outcome {
                    warn!(repo = %repo.full_name(), error = %e, "Failed to resolve releases");
                }
                CheckResult {
                    display_name: repo.display_name.clone(),
                    outcome,
                }
            })
            .buffered(self.config.concurrency)
            .collect()
            .await;

        let summary = CheckSummary { results };
        info!(
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "Checked repositories"
        );
        summary
    }
}
