//! Tracked repository records.

use super::RegistryError;
use serde::{Deserialize, Serialize};

/// A repository tracked by the registry.
///
/// Field names match the persisted document: `displayName` is camelCase while
/// `asset_filter` is not, as written by earlier releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name on GitHub. Not unique across owners.
    pub name: String,

    /// Unique label shown to the user. Empty in documents written before
    /// labels existed; backfilled on load.
    #[serde(rename = "displayName", default)]
    pub display_name: String,

    /// Owning user or organization.
    pub owner: String,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Regular expression selecting the relevant release assets.
    #[serde(default)]
    pub asset_filter: String,
}

impl Repository {
    /// Returns the "owner/name" form used by GitHub.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Returns the label used when another repository shares this name.
    pub fn disambiguated_label(&self) -> String {
        format!("{} ({})", self.name, self.owner)
    }

    /// Returns true if the label carries the owner suffix.
    pub fn is_disambiguated(&self) -> bool {
        self.display_name == self.disambiguated_label()
    }
}

/// Input to [`Registry::add`](super::Registry::add).
///
/// Carries no label; the identity policy assigns one on admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepository {
    pub owner: String,
    pub name: String,
    pub description: String,
    pub asset_filter: String,
}

impl NewRepository {
    /// Creates a repository with an empty description and filter.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            description: String::new(),
            asset_filter: String::new(),
        }
    }

    /// Parses "owner/name".
    pub fn from_full_name(full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.trim().split_once('/')?;
        Some(Self::new(owner, name))
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the asset filter.
    pub fn with_asset_filter(mut self, asset_filter: impl Into<String>) -> Self {
        self.asset_filter = asset_filter.into();
        self
    }

    /// Checks owner and name against GitHub's naming alphabet.
    ///
    /// Restricting names to `[A-Za-z0-9._-]` means a bare name can never look
    /// like a `"name (owner)"` label.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidRepository`] naming the offending field.
    pub fn validate(&self) -> Result<(), RegistryError> {
        validate_segment("owner", &self.owner)?;
        validate_segment("name", &self.name)
    }

    pub(crate) fn into_repository(self) -> Repository {
        Repository {
            display_name: self.name.clone(),
            name: self.name,
            owner: self.owner,
            description: self.description,
            asset_filter: self.asset_filter,
        }
    }
}

fn validate_segment(field: &'static str, value: &str) -> Result<(), RegistryError> {
    let invalid = |message| RegistryError::InvalidRepository {
        field,
        value: value.to_string(),
        message,
    };

    if value.is_empty() {
        return Err(invalid("must not be empty"));
    }

    if value == "." || value == ".." {
        return Err(invalid("must not be a relative path component"));
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(invalid(
            "may only contain ASCII letters, digits, '-', '_' and '.'",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_name() {
        let repo = NewRepository::from_full_name("OpenStickCommunity/GP2040-CE").unwrap();

        assert_eq!(repo.owner, "OpenStickCommunity");
        assert_eq!(repo.name, "GP2040-CE");
        assert!(NewRepository::from_full_name("no-slash").is_none());
    }

    #[test]
    fn validate_rejects_label_like_names() {
        let repo = NewRepository::new("owner", "X (A)");

        let result = repo.validate();
        assert!(matches!(
            result,
            Err(RegistryError::InvalidRepository { field: "name", .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_owner() {
        let result = NewRepository::new("", "repo").validate();
        assert!(matches!(
            result,
            Err(RegistryError::InvalidRepository { field: "owner", .. })
        ));
    }

    #[test]
    fn validate_accepts_github_names() {
        assert!(NewRepository::new("Jonny_Haystack", "HayBox-GRAM.v2")
            .validate()
            .is_ok());
    }

    #[test]
    fn deserializes_record_without_display_name() {
        let json = r#"{"name":"HayBox","owner":"JonnyHaystack","description":"HayBox","asset_filter":"\\.uf2$"}"#;

        let repo: Repository = serde_json::from_str(json).unwrap();

        assert_eq!(repo.display_name, "");
        assert_eq!(repo.asset_filter, "\\.uf2$");
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let repo = NewRepository::new("a", "b").into_repository();

        let value = serde_json::to_value(&repo).unwrap();

        assert_eq!(value["displayName"], "b");
        assert!(value.get("asset_filter").is_some());
    }
}
