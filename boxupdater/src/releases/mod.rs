//! Release resolution.
//!
//! Turns a tracked repository into the flat list of release assets matching
//! its filter. Releases are fetched from a [`ReleaseSource`] on every call;
//! nothing is cached.

mod command;
mod error;
mod feed;
mod filter;
mod github;
mod release;

pub use command::{CommandInvoker, CommandSource, GET_RELEASES, GET_REPOSITORIES};
pub use error::{ConnectError, InvokeError, ResolveError, SourceError};
pub use feed::{FeedAsset, FeedRelease, ReleaseSource};
pub use filter::{compile_filter, flatten_assets};
pub use github::{GitHubSource, DEFAULT_API_BASE, DEFAULT_USER_AGENT};
pub use release::{latest_only, sort_releases, Release, ReleaseSort};

use crate::registry::{Registry, Repository};
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};

/// Resolves repositories into downloadable assets.
#[derive(Clone)]
pub struct ReleaseResolver {
    source: Arc<dyn ReleaseSource>,
}

impl ReleaseResolver {
    /// Creates a resolver over `source`.
    pub fn new(source: impl ReleaseSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Creates a resolver over a shared source.
    pub fn from_shared(source: Arc<dyn ReleaseSource>) -> Self {
        Self { source }
    }

    /// Fetches the assets of the repository labelled `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] without touching the source if no
    /// repository carries that label; otherwise as [`fetch_for`](Self::fetch_for).
    pub async fn fetch_releases(
        &self,
        registry: &Registry,
        identifier: &str,
    ) -> Result<Vec<Release>, ResolveError> {
        let repository = registry
            .find(identifier)
            .ok_or_else(|| ResolveError::NotFound {
                identifier: identifier.to_string(),
            })?;

        self.fetch_for(repository).await
    }

    /// Fetches the assets of `repository` that match its filter.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidFilter`] before any request if the filter
    /// does not compile, and [`ResolveError::Transport`] if the source fails.
    pub async fn fetch_for(&self, repository: &Repository) -> Result<Vec<Release>, ResolveError> {
        let span = info_span!(
            "fetch_releases",
            repo = %repository.full_name(),
            filter = %repository.asset_filter
        );

        async {
            let filter = compile_filter(&repository.asset_filter)?;

            let feed = self
                .source
                .list_releases(&repository.owner, &repository.name)
                .await?;
            debug!(releases = feed.len(), "Fetched release feed");

            let releases = flatten_assets(feed, &filter);
            info!(assets = releases.len(), "Resolved release assets");
            Ok(releases)
        }
        .instrument(span)
        .await
    }
}
