//! Catalog endpoints: the fixed tag list, departments, years, uploads.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;

use scholarbase_core::Tag;

use crate::api::PortalApi;
use crate::error::PortalApiError;

/// What an uploaded file is for; travels as the `type` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Project,
    Document,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::Project => "project",
            UploadKind::Document => "document",
        }
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

impl PortalApi {
    /// The fixed tag catalog.
    pub async fn tags(&self) -> Result<Vec<Tag>, PortalApiError> {
        let response = self.request(Method::GET, "/tags").send().await?;
        Self::parse_response(response).await
    }

    /// Departments represented in the corpus.
    pub async fn departments(&self) -> Result<Vec<String>, PortalApiError> {
        let response = self.request(Method::GET, "/departments").send().await?;
        Self::parse_response(response).await
    }

    /// Academic years represented in the corpus.
    pub async fn years(&self) -> Result<Vec<String>, PortalApiError> {
        let response = self.request(Method::GET, "/years").send().await?;
        Self::parse_response(response).await
    }

    /// Upload a file and get back its served URL.
    pub async fn upload_file(
        &self,
        file_name: &str,
        content: Vec<u8>,
        kind: UploadKind,
    ) -> Result<String, PortalApiError> {
        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")?;
        let form = Form::new()
            .part("file", part)
            .text("type", kind.as_str());

        let response = self
            .request(Method::POST, "/upload")
            .multipart(form)
            .send()
            .await?;
        let reply: UploadResponse = Self::parse_response(response).await?;
        Ok(reply.url)
    }
}
