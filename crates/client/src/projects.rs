//! Project endpoints: listings, submission, moderation.

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use scholarbase_core::{
    CreateProject, DbId, Page, ProjectFilter, ProjectRecord, RejectRequest, ReviewRequest,
    StudentProfile, UpdateProject,
};

use crate::api::PortalApi;
use crate::error::PortalApiError;

impl PortalApi {
    /// List the filtered project corpus via `GET /projects/all`.
    ///
    /// The backend replies with a bare array; the page geometry the
    /// caller asked for wraps it into a [`Page`].
    pub async fn list_projects(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Page<ProjectRecord>, PortalApiError> {
        let response = self
            .request(Method::GET, "/projects/all")
            .query(&filter.to_query())
            .send()
            .await?;
        let items: Vec<ProjectRecord> = Self::parse_response(response).await?;
        Ok(Page::from_items(items, filter.page, filter.per_page))
    }

    /// The approved-only listing: same endpoint, status pinned to the
    /// uppercase `APPROVED` literal the backend resolves by enum name.
    pub async fn list_approved_projects(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Page<ProjectRecord>, PortalApiError> {
        let response = self
            .request(Method::GET, "/projects/all")
            .query(&filter.approved_query())
            .send()
            .await?;
        let items: Vec<ProjectRecord> = Self::parse_response(response).await?;
        Ok(Page::from_items(items, filter.page, filter.per_page))
    }

    /// The caller's own projects via `GET /projects/`.
    pub async fn list_my_projects(&self) -> Result<Vec<ProjectRecord>, PortalApiError> {
        let response = self.request(Method::GET, "/projects/").send().await?;
        Self::parse_response(response).await
    }

    /// One project by id.
    pub async fn get_project(&self, id: DbId) -> Result<ProjectRecord, PortalApiError> {
        let response = self
            .request(Method::GET, &format!("/projects/{id}"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Submit a new project via multipart `POST /projects/`.
    ///
    /// Tags travel as one JSON-array string field; the document, when
    /// present, as a file part.
    pub async fn create_project(
        &self,
        data: &CreateProject,
    ) -> Result<ProjectRecord, PortalApiError> {
        let mut form = Form::new()
            .text("title", data.title.clone())
            .text("year", data.year.clone())
            .text("description", data.description.clone())
            .text("tags", serde_json::json!(data.tags).to_string());

        if let Some(file_url) = &data.file_url {
            form = form.text("file_url", file_url.clone());
        }
        if let Some(supervisor_id) = data.supervisor_id {
            form = form.text("supervisor_id", supervisor_id.to_string());
        }
        if let Some(document) = &data.document {
            let part = Part::bytes(document.content.clone())
                .file_name(document.file_name.clone())
                .mime_str("application/octet-stream")?;
            form = form.part("document", part);
        }

        let response = self
            .request(Method::POST, "/projects/")
            .multipart(form)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Partially update a project via multipart `PATCH /projects/{id}`.
    /// Only the fields that are set travel on the wire.
    pub async fn update_project(
        &self,
        data: &UpdateProject,
    ) -> Result<ProjectRecord, PortalApiError> {
        let mut form = Form::new();
        if let Some(title) = &data.title {
            form = form.text("title", title.clone());
        }
        if let Some(year) = &data.year {
            form = form.text("year", year.clone());
        }
        if let Some(description) = &data.description {
            form = form.text("description", description.clone());
        }
        if let Some(tags) = &data.tags {
            form = form.text("tags", serde_json::json!(tags).to_string());
        }
        if let Some(file_url) = &data.file_url {
            form = form.text("file_url", file_url.clone());
        }
        if let Some(document) = &data.document {
            let part = Part::bytes(document.content.clone())
                .file_name(document.file_name.clone())
                .mime_str("application/octet-stream")?;
            form = form.part("document", part);
        }

        let response = self
            .request(Method::PATCH, &format!("/projects/{}", data.id))
            .multipart(form)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Delete a project.
    pub async fn delete_project(&self, id: DbId) -> Result<(), PortalApiError> {
        let response = self
            .request(Method::DELETE, &format!("/projects/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Approve a pending project. Returns the updated record.
    pub async fn approve_project(&self, id: DbId) -> Result<ProjectRecord, PortalApiError> {
        let response = self
            .request(Method::PATCH, &format!("/projects/{id}/approve"))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Reject a project, optionally with a reason. Returns the updated
    /// record.
    pub async fn reject_project(
        &self,
        id: DbId,
        reason: Option<&str>,
    ) -> Result<ProjectRecord, PortalApiError> {
        let body = RejectRequest {
            reason: reason.map(str::to_owned),
        };
        let response = self
            .request(Method::PATCH, &format!("/projects/{id}/reject"))
            .json(&body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Move a project through review via `PUT /projects/{id}/review`.
    pub async fn review_project(
        &self,
        id: DbId,
        review: &ReviewRequest,
    ) -> Result<ProjectRecord, PortalApiError> {
        let response = self
            .request(Method::PUT, &format!("/projects/{id}/review"))
            .json(review)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Assign a supervisor to a student's project thread.
    pub async fn assign_supervisor(
        &self,
        student_id: DbId,
        supervisor_id: DbId,
    ) -> Result<StudentProfile, PortalApiError> {
        let response = self
            .request(
                Method::PATCH,
                &format!("/projects/{student_id}/assign-supervisor"),
            )
            .query(&[("supervisor_id", supervisor_id.to_string())])
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
