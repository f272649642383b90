//! Session error types.

/// Errors that can occur while opening a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Registry loading errors.
    #[error(transparent)]
    Registry(#[from] crate::registry::RegistryError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Connect(#[from] crate::releases::ConnectError),
}
