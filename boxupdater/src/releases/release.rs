//! Resolved release assets and presentation helpers.

use serde::Serialize;
use std::cmp::Reverse;

/// One downloadable asset paired with the tag of the release it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Asset file name.
    pub name: String,

    /// Tag of the parent release.
    pub tag_name: String,

    /// Direct download location.
    pub download_url: String,

    /// Number of downloads so far.
    pub download_count: u64,

    /// Upload time as an ISO-8601 string.
    pub uploaded_at: String,
}

/// Orderings a host can apply to a resolved list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReleaseSort {
    /// Keep the feed's order.
    #[default]
    Feed,
    /// Most recently uploaded first.
    Newest,
    /// Most downloaded first.
    MostDownloaded,
}

/// Sorts `releases` in place. Stable, so ties keep feed order.
pub fn sort_releases(releases: &mut [Release], sort: ReleaseSort) {
    match sort {
        ReleaseSort::Feed => {}
        // GitHub timestamps are UTC with a `Z` suffix and compare lexically.
        ReleaseSort::Newest => releases.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at)),
        ReleaseSort::MostDownloaded => releases.sort_by_key(|r| Reverse(r.download_count)),
    }
}

/// Keeps only assets of the first tag in feed order.
///
/// `releases` is already filtered, so this is the latest release that has a
/// matching asset. A newer release without one is skipped.
pub fn latest_only(releases: Vec<Release>) -> Vec<Release> {
    let Some(latest) = releases.first().map(|r| r.tag_name.clone()) else {
        return releases;
    };

    releases
        .into_iter()
        .filter(|r| r.tag_name == latest)
        .collect()
}
