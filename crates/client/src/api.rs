//! HTTP collaborator for the portal REST API.
//!
//! [`PortalApi`] owns the connection pool, the base URL, and a handle to
//! the session store it reads bearer tokens from. Endpoint groups live in
//! sibling modules (`auth`, `projects`, `supervisor`, `admin`, `catalog`),
//! one per backend router, each an `impl PortalApi` block.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;

use crate::config::ClientConfig;
use crate::error::PortalApiError;
use crate::session::SessionStore;

/// HTTP client for one portal backend.
pub struct PortalApi {
    client: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl PortalApi {
    /// Build a client from config, with the configured request timeout.
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> Result<Self, PortalApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.base_url, session))
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// The session store this client reads its bearer token from.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    // ---- request plumbing ----

    /// Start a request to `path`, attaching the bearer token when a
    /// session is present.
    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`PortalApiError::Api`] with
    /// the normalized `detail` message on failure.
    pub(crate) async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PortalApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PortalApiError::from_response(status.as_u16(), body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PortalApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    pub(crate) async fn check_status(response: reqwest::Response) -> Result<(), PortalApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
