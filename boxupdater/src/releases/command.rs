//! Release source that delegates to a host command channel.
//!
//! Embedding applications that already talk to GitHub can expose that as a
//! stringly-typed `invoke(operation, params)` call instead of letting this
//! crate open its own HTTP client.

use super::{FeedRelease, InvokeError, ReleaseSource, SourceError};
use crate::registry::Repository;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

/// Operation listing a repository's releases. Params: `{"owner", "name"}`.
pub const GET_RELEASES: &str = "get_releases";

/// Operation listing the host's repositories. No params.
pub const GET_REPOSITORIES: &str = "get_repositories";

/// A host-provided command channel.
#[async_trait]
pub trait CommandInvoker: Send + Sync {
    /// Runs `operation` with JSON `params` and returns its JSON result.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError`] if the host reports a failure.
    async fn invoke(&self, operation: &str, params: Value) -> Result<Value, InvokeError>;
}

/// Adapts a [`CommandInvoker`] into a [`ReleaseSource`].
#[derive(Debug, Clone)]
pub struct CommandSource<I> {
    invoker: I,
}

impl<I: CommandInvoker> CommandSource<I> {
    /// Wraps `invoker`.
    pub fn new(invoker: I) -> Self {
        Self { invoker }
    }

    /// Returns the wrapped invoker.
    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Asks the host for its repository list.
    ///
    /// Records missing a display name come back with it empty, as stored
    /// documents do before migration.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the call fails or the result is not a
    /// repository list.
    pub async fn list_repositories(&self) -> Result<Vec<Repository>, SourceError> {
        let value = self.invoker.invoke(GET_REPOSITORIES, json!({})).await?;
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl<I: CommandInvoker> ReleaseSource for CommandSource<I> {
    async fn list_releases(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<FeedRelease>, SourceError> {
        debug!(operation = GET_RELEASES, owner, name, "Invoking host command");

        let value = self
            .invoker
            .invoke(GET_RELEASES, json!({ "owner": owner, "name": name }))
            .await?;

        Ok(serde_json::from_value(value)?)
    }
}
