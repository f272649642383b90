//! Release resolution error types.

use thiserror::Error;

/// Errors raised by the release resolver.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No tracked repository carries the requested label.
    #[error("No tracked repository named '{identifier}'")]
    NotFound { identifier: String },

    /// The repository's asset filter is not a valid regular expression.
    #[error("Invalid asset filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The release source failed.
    #[error(transparent)]
    Transport(#[from] SourceError),
}

/// Errors raised by a [`ReleaseSource`](super::ReleaseSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// GitHub API error, including non-success statuses and bad payloads.
    #[error("GitHub API error: {0}")]
    GitHub(#[from] octocrab::Error),

    /// The host command channel reported a failure.
    #[error(transparent)]
    Invoke(#[from] InvokeError),

    /// The host returned a payload of the wrong shape.
    #[error("Failed to decode host response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised while building a [`GitHubSource`](super::GitHubSource).
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The API root is not a valid URI.
    #[error("Invalid API base '{uri}': {source}")]
    InvalidBaseUri {
        uri: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    /// A header value contains characters HTTP does not allow.
    #[error("Invalid {header} header value: {source}")]
    InvalidHeader {
        header: &'static str,
        #[source]
        source: http::header::InvalidHeaderValue,
    },

    /// The platform's root certificates could not be loaded.
    #[error("Failed to load TLS root certificates: {0}")]
    TlsRoots(#[source] std::io::Error),
}

/// A failure reported by a host [`CommandInvoker`](super::CommandInvoker).
#[derive(Debug, Clone, Error)]
#[error("Host command '{operation}' failed: {message}")]
pub struct InvokeError {
    /// Operation that was invoked.
    pub operation: String,
    /// Host-provided description.
    pub message: String,
}

impl InvokeError {
    /// Creates an error for `operation`.
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
