//! Admin console endpoints: account management and corpus oversight.
//!
//! Account bodies here are plain JSON, and updates go through `PUT`
//! rather than the `PATCH` the student-facing project routes use.

use reqwest::Method;

use scholarbase_core::{
    AdminCreateProject, AdminUpdateProject, CreateStudentAccount, CreateSupervisorAccount,
    DashboardStats, DbId, ProjectRecord, StudentFilter, StudentProfile, StudentWithProject,
    SupervisorProfile, UpdateStudentAccount, UpdateSupervisorAccount,
};

use crate::api::PortalApi;
use crate::error::PortalApiError;

impl PortalApi {
    /// Corpus-wide dashboard counters.
    pub async fn admin_dashboard_stats(&self) -> Result<DashboardStats, PortalApiError> {
        let response = self
            .request(Method::GET, "/admin/dashboard/stats")
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// The full student roster, filtered server-side. Rows come back
    /// enriched with project counts and each student's latest submission.
    pub async fn list_students(
        &self,
        filter: &StudentFilter,
    ) -> Result<Vec<StudentWithProject>, PortalApiError> {
        let response = self
            .request(Method::GET, "/admin/students")
            .query(&filter.to_query())
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Every supervisor account.
    pub async fn list_supervisors(&self) -> Result<Vec<SupervisorProfile>, PortalApiError> {
        let response = self
            .request(Method::GET, "/admin/supervisors")
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Every project in the corpus, any status, newest first.
    pub async fn list_admin_projects(&self) -> Result<Vec<ProjectRecord>, PortalApiError> {
        let response = self.request(Method::GET, "/admin/projects").send().await?;
        Self::parse_response(response).await
    }

    // ---- student accounts ----

    /// Provision a student account.
    pub async fn create_student(
        &self,
        data: &CreateStudentAccount,
    ) -> Result<StudentProfile, PortalApiError> {
        let response = self
            .request(Method::POST, "/admin/students")
            .json(data)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Update a student account; only the fields that are set travel.
    pub async fn update_student(
        &self,
        id: DbId,
        data: &UpdateStudentAccount,
    ) -> Result<StudentProfile, PortalApiError> {
        let response = self
            .request(Method::PUT, &format!("/admin/students/{id}"))
            .json(data)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Delete a student account.
    pub async fn delete_student(&self, id: DbId) -> Result<(), PortalApiError> {
        let response = self
            .request(Method::DELETE, &format!("/admin/students/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- supervisor accounts ----

    /// Provision a supervisor account.
    pub async fn create_supervisor(
        &self,
        data: &CreateSupervisorAccount,
    ) -> Result<SupervisorProfile, PortalApiError> {
        let response = self
            .request(Method::POST, "/admin/supervisors")
            .json(data)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Update a supervisor account.
    pub async fn update_supervisor(
        &self,
        id: DbId,
        data: &UpdateSupervisorAccount,
    ) -> Result<SupervisorProfile, PortalApiError> {
        let response = self
            .request(Method::PUT, &format!("/admin/supervisors/{id}"))
            .json(data)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Delete a supervisor account.
    pub async fn delete_supervisor(&self, id: DbId) -> Result<(), PortalApiError> {
        let response = self
            .request(Method::DELETE, &format!("/admin/supervisors/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- projects ----

    /// Create a project on a student's behalf, status and assignments
    /// included.
    pub async fn create_project_as_admin(
        &self,
        data: &AdminCreateProject,
    ) -> Result<ProjectRecord, PortalApiError> {
        let response = self
            .request(Method::POST, "/admin/projects")
            .json(data)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Update any project, bypassing the ownership checks of the
    /// student-facing route.
    pub async fn update_project_as_admin(
        &self,
        id: DbId,
        data: &AdminUpdateProject,
    ) -> Result<ProjectRecord, PortalApiError> {
        let response = self
            .request(Method::PUT, &format!("/admin/projects/{id}"))
            .json(data)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Delete any project.
    pub async fn delete_project_as_admin(&self, id: DbId) -> Result<(), PortalApiError> {
        let response = self
            .request(Method::DELETE, &format!("/admin/projects/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }
}
