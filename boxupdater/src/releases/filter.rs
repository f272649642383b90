//! Asset filtering.

use super::{FeedRelease, Release, ResolveError};
use regex::Regex;

/// Compiles an asset filter. Matching is unanchored: the pattern may match
/// anywhere in the file name unless it anchors itself.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidFilter`] if `pattern` is not a valid regex.
pub fn compile_filter(pattern: &str) -> Result<Regex, ResolveError> {
    Regex::new(pattern).map_err(|source| ResolveError::InvalidFilter {
        pattern: pattern.to_string(),
        source,
    })
}

/// Flattens releases into one entry per matching asset.
///
/// Output follows feed order, then asset order within each release. Nothing is
/// sorted or deduplicated.
pub fn flatten_assets(releases: Vec<FeedRelease>, filter: &Regex) -> Vec<Release> {
    releases
        .into_iter()
        .flat_map(move |release| {
            let tag_name = release.tag_name;
            release
                .assets
                .into_iter()
                .filter(move |asset| filter.is_match(&asset.name))
                .map(move |asset| Release {
                    name: asset.name,
                    tag_name: tag_name.clone(),
                    download_url: asset.browser_download_url,
                    download_count: asset.download_count,
                    uploaded_at: asset.created_at,
                })
        })
        .collect()
}
