//! Forward migration of stored repository documents.

use super::Repository;
use tracing::debug;

/// Backfills labels missing from documents written by older releases.
///
/// A backfilled record gets its bare name unless another record shares that
/// name or already uses it as a label, in which case it gets
/// `"name (owner)"`. Returns the number of records changed. Records that
/// already carry a label are left alone, so running this twice changes nothing
/// the second time.
pub(crate) fn migrate(repositories: &mut [Repository]) -> usize {
    let missing: Vec<usize> = repositories
        .iter()
        .enumerate()
        .filter(|(_, r)| r.display_name.is_empty())
        .map(|(i, _)| i)
        .collect();

    for &index in &missing {
        let label = backfill_label(repositories, index);
        let repo = &mut repositories[index];
        debug!(
            name = %repo.name,
            owner = %repo.owner,
            label = %label,
            "Backfilling display name"
        );
        repo.display_name = label;
    }

    missing.len()
}

/// Picks a label for `repositories[index]` that no other record carries.
fn backfill_label(repositories: &[Repository], index: usize) -> String {
    let repo = &repositories[index];
    let taken = |label: &str| repositories.iter().any(|r| r.display_name == label);
    let shared = repositories
        .iter()
        .enumerate()
        .any(|(i, r)| i != index && r.name == repo.name);

    if !shared && !taken(&repo.name) {
        return repo.name.clone();
    }

    let label = repo.disambiguated_label();
    if !taken(&label) {
        return label;
    }

    // Same owner/name stored twice.
    let numbered = (2u32..)
        .map(|n| format!("{label} {n}"))
        .find(|candidate| !taken(candidate));
    numbered.unwrap_or(label)
}
