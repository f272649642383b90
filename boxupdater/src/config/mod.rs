//! Application configuration.
//!
//! Settings come from an optional `config.toml` in the platform config
//! directory; every key has a default.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{AppConfig, TOKEN_ENV_VAR};

use directories::ProjectDirs;
use std::path::PathBuf;

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "boxupdater", "boxupdater")
}

/// Returns the default config file path, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Returns the default directory for the repository document.
pub fn default_data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}
