//! Outcome of checking every tracked repository.

use crate::releases::{Release, ResolveError};

/// Result of resolving a single repository.
#[derive(Debug)]
pub struct CheckResult {
    /// Label of the repository.
    pub display_name: String,

    /// Resolved assets, or why resolution failed.
    pub outcome: Result<Vec<Release>, ResolveError>,
}

/// Summary of a full check.
#[derive(Debug, Default)]
pub struct CheckSummary {
    /// Per-repository results in registry order.
    pub results: Vec<CheckResult>,
}

impl CheckSummary {
    /// Number of repositories that resolved.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_ok()).count()
    }

    /// Number of repositories that failed to resolve.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Total assets across all resolved repositories.
    #[must_use]
    pub fn assets(&self) -> usize {
        self.results
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok())
            .map(Vec::len)
            .sum()
    }

    /// Returns true if any repository failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_outcomes() {
        let summary = CheckSummary {
            results: vec![
                CheckResult {
                    display_name: "HayBox".to_string(),
                    outcome: Ok(vec![Release {
                        name: "a.uf2".to_string(),
                        tag_name: "v1".to_string(),
                        download_url: "https://example.com/a.uf2".to_string(),
                        download_count: 0,
                        uploaded_at: String::new(),
                    }]),
                },
                CheckResult {
                    display_name: "ghost".to_string(),
                    outcome: Err(ResolveError::NotFound {
                        identifier: "ghost".to_string(),
                    }),
                },
            ],
        };

        assert_eq!(summary.succeeded(), 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.assets(), 1);
        assert!(summary.has_failures());
        assert!(!CheckSummary::default().has_failures());
    }
}
