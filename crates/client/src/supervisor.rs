//! Supervisor endpoints: the caller's students and their submissions.

use reqwest::Method;

use scholarbase_core::{ProjectRecord, StudentWithProject, SupervisorDashboardStats};

use crate::api::PortalApi;
use crate::error::PortalApiError;

impl PortalApi {
    /// Projects submitted by the caller's supervised students, newest
    /// first.
    pub async fn supervised_projects(&self) -> Result<Vec<ProjectRecord>, PortalApiError> {
        let response = self
            .request(Method::GET, "/supervisor/projects")
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// The caller's students, each with a project count and their latest
    /// submission.
    pub async fn supervised_students(&self) -> Result<Vec<StudentWithProject>, PortalApiError> {
        let response = self
            .request(Method::GET, "/supervisor/students")
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Dashboard counters scoped to the caller's students.
    pub async fn supervisor_dashboard_stats(
        &self,
    ) -> Result<SupervisorDashboardStats, PortalApiError> {
        let response = self
            .request(Method::GET, "/supervisor/dashboard/stats")
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
