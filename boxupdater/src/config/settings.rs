//! Application settings deserialization.

use super::ConfigError;
use crate::registry::IdentityStrategy;
use crate::releases::{DEFAULT_API_BASE, DEFAULT_USER_AGENT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Environment variable consulted when no token is configured.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Parsed contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding the repository document (defaults to the platform data dir).
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,

    /// GitHub API root (defaults to "https://api.github.com").
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// User-Agent sent to the API (defaults to "boxupdater").
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// How colliding repository names are told apart.
    #[serde(default)]
    pub identity: IdentityStrategy,

    /// Maximum concurrent release fetches when checking every repository.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// GitHub personal access token (optional, falls back to GITHUB_TOKEN env var).
    #[serde(default)]
    pub github_token: Option<String>,
}

pub(crate) fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

pub(crate) fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

pub(crate) fn default_concurrency() -> usize {
    4
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            identity: IdentityStrategy::default(),
            concurrency: default_concurrency(),
            github_token: None,
        }
    }
}

impl AppConfig {
    /// Loads and validates the config at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, malformed,
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an existing file is unreadable, malformed,
    /// or fails validation.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses and validates TOML `content`. `path` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the content is malformed or fails validation.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate(path)?;
        Ok(config)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first bad value.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        match Url::parse(&self.api_base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(invalid(format!(
                    "api-base is not a valid http(s) URL: {}",
                    self.api_base
                )))
            }
        }

        if self.user_agent.trim().is_empty() {
            return Err(invalid("user-agent must not be empty".to_string()));
        }

        if self.concurrency == 0 {
            return Err(invalid("concurrency must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Returns the configured token, or the `GITHUB_TOKEN` env var.
    pub fn github_token(&self) -> Option<String> {
        self.github_token
            .clone()
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
            .filter(|token| !token.trim().is_empty())
    }

    /// Returns the directory holding the repository document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if no directory is configured and the
    /// platform has no data directory.
    pub fn storage_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }

        super::default_data_dir().ok_or_else(|| ConfigError::MissingFile {
            path: "platform data directory".to_string(),
        })
    }
}
