//! Auth endpoints: login, registration, profile.

use reqwest::Method;

use scholarbase_core::{Account, AuthResponse, RegisterRequest};

use crate::api::PortalApi;
use crate::error::PortalApiError;

impl PortalApi {
    /// Sign in with email and password.
    ///
    /// Sends `POST /auth/login/` as a multipart form, the shape the
    /// portal's login endpoint reads.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, PortalApiError> {
        let form = reqwest::multipart::Form::new()
            .text("email", email.to_string())
            .text("password", password.to_string());

        let response = self
            .request(Method::POST, "/auth/login/")
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create an account.
    ///
    /// Sends `POST /auth/register/{role}`; the payload schema differs per
    /// role and the reply signs the new account in.
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<AuthResponse, PortalApiError> {
        let path = format!("/auth/register/{}", request.role().endpoint_slug());
        let response = self
            .request(Method::POST, &path)
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the signed-in account's profile via `GET /auth/me`.
    ///
    /// `include_relations` pulls the supervisor/students relations along.
    pub async fn fetch_profile(&self, include_relations: bool) -> Result<Account, PortalApiError> {
        let mut builder = self.request(Method::GET, "/auth/me");
        if include_relations {
            builder = builder.query(&[("include_relations", "true")]);
        }
        let response = builder.send().await?;

        Self::parse_response(response).await
    }
}
