//! Release feed records and the source capability that produces them.

use super::SourceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A release as listed by the feed. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRelease {
    /// Version tag, e.g. "v0.9.2".
    pub tag_name: String,

    /// Files attached to the release, in feed order.
    #[serde(default)]
    pub assets: Vec<FeedAsset>,
}

/// A downloadable file attached to a [`FeedRelease`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedAsset {
    /// File name.
    pub name: String,

    /// Direct download location.
    pub browser_download_url: String,

    /// Number of downloads so far.
    #[serde(default)]
    pub download_count: u64,

    /// Upload time as an ISO-8601 string.
    #[serde(default)]
    pub created_at: String,
}

/// Lists the releases of a repository, newest first as the feed returns them.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches every release of `owner/name`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails or the payload cannot be decoded.
    async fn list_releases(&self, owner: &str, name: &str)
        -> Result<Vec<FeedRelease>, SourceError>;
}
