//! Release source backed by the GitHub REST API.

use super::{ConnectError, FeedRelease, ReleaseSource, SourceError};
use async_trait::async_trait;
use http::header::USER_AGENT;
use http::{HeaderValue, Uri};
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use octocrab::service::middleware::auth_header::AuthHeaderLayer;
use octocrab::service::middleware::base_uri::BaseUriLayer;
use octocrab::service::middleware::extra_headers::ExtraHeadersLayer;
use octocrab::{AuthState, Octocrab, OctocrabBuilder};
use std::sync::Arc;
use tracing::debug;

/// Public GitHub API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Client label sent with every request.
pub const DEFAULT_USER_AGENT: &str = "boxupdater";

/// Lists releases through `GET /repos/{owner}/{name}/releases`.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    octocrab: Octocrab,
}

impl GitHubSource {
    /// Wraps an already configured client.
    pub fn new(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    /// Builds a client for `api_base` identifying itself as `user_agent`.
    ///
    /// `user_agent` is the only `User-Agent` sent. Without a token requests
    /// are anonymous and subject to GitHub's lower unauthenticated rate limit.
    /// Failed requests are not retried.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError`] if `api_base` is not a valid URI, a header
    /// value is malformed, or the platform root certificates cannot be loaded.
    pub fn connect(
        api_base: &str,
        user_agent: &str,
        token: Option<&str>,
    ) -> Result<Self, ConnectError> {
        let base_uri: Uri = api_base
            .parse()
            .map_err(|source| ConnectError::InvalidBaseUri {
                uri: api_base.to_string(),
                source,
            })?;

        let user_agent =
            HeaderValue::from_str(user_agent).map_err(|source| ConnectError::InvalidHeader {
                header: "User-Agent",
                source,
            })?;

        let authorization = token
            .map(|token| HeaderValue::from_str(&format!("Bearer {token}")))
            .transpose()
            .map_err(|source| ConnectError::InvalidHeader {
                header: "Authorization",
                source,
            })?;

        // octocrab's default client always adds its own User-Agent, so the
        // service stack is assembled here instead.
        let connector = HttpsConnectorBuilder::new()
            .with_provider_and_native_roots(rustls::crypto::ring::default_provider())
            .map_err(ConnectError::TlsRoots)?
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let headers = Arc::new(vec![(USER_AGENT, user_agent)]);
        let octocrab = OctocrabBuilder::new_empty()
            .with_service(client)
            .with_layer(&ExtraHeadersLayer::new(headers))
            .with_layer(&BaseUriLayer::new(base_uri.clone()))
            .with_layer(&AuthHeaderLayer::new(
                authorization,
                base_uri.clone(),
                base_uri,
            ))
            .with_auth(AuthState::None)
            .build()
            .unwrap_or_else(|never| match never {});

        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl ReleaseSource for GitHubSource {
    async fn list_releases(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<FeedRelease>, SourceError> {
        let route = releases_route(owner, name);
        debug!(route = %route, "Requesting releases");

        let releases: Vec<FeedRelease> = self.octocrab.get(route, None::<&()>).await?;

        debug!(count = releases.len(), "Received releases");
        Ok(releases)
    }
}

/// Builds the releases route relative to the API root.
fn releases_route(owner: &str, name: &str) -> String {
    format!("/repos/{owner}/{name}/releases")
}
