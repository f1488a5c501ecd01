//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::account::{StudentProfile, SupervisorProfile};
use crate::error::CoreError;
use crate::types::{lenient_timestamp, lenient_timestamp_opt, DbId, ProjectStatus, Tag, Timestamp};

/// Default page size the portal lists with.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// A project as returned by the backend.
///
/// `student`/`supervisor` are embedded when the listing endpoint joins
/// relations; plain listings carry only the ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: DbId,
    pub title: String,
    pub year: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    pub status: ProjectStatus,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "lenient_timestamp")]
    pub updated_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<DbId>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<StudentProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<SupervisorProfile>,
}

/// An uploaded document attached to a create/update submission.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// DTO for submitting a new project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub year: String,
    pub description: String,
    pub tags: Vec<Tag>,
    pub file_url: Option<String>,
    pub supervisor_id: Option<DbId>,
    #[serde(skip)]
    pub document: Option<DocumentUpload>,
}

impl CreateProject {
    /// Validate a submission before it goes anywhere near the network.
    ///
    /// Checks run in field order so the surfaced message is stable.
    pub fn validate_for_submit(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("Title is required".to_string()));
        }
        if self.year.trim().is_empty() {
            return Err(CoreError::Validation("Year is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(CoreError::Validation("Description is required".to_string()));
        }
        if self.tags.is_empty() {
            return Err(CoreError::Validation(
                "Select at least one tag".to_string(),
            ));
        }
        Ok(())
    }
}

/// DTO for updating an existing project. All fields are optional; only
/// the ones set travel on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    pub id: DbId,
    pub title: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<Tag>>,
    pub file_url: Option<String>,
    #[serde(skip)]
    pub document: Option<DocumentUpload>,
}

/// Body of `PUT /projects/{id}/review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_comment: Option<String>,
}

/// Body of `PATCH /projects/{id}/reject`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of `POST /admin/projects`.
///
/// Unlike the student submission path this is plain JSON: no document
/// upload, tags as a real array, and the admin picks status and
/// assignments directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCreateProject {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<String>,
    pub supervisor_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<DbId>,
    pub status: ProjectStatus,
    pub tags: Vec<Tag>,
    pub year: String,
}

/// Partial body of `PUT /admin/projects/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminUpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/* --------------------------------------------------------------------------
Pagination
-------------------------------------------------------------------------- */

/// A page of results.
///
/// The corpus listing endpoint returns a bare array; the client wraps it
/// so callers see one shape regardless of how the backend paginates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub pages: u32,
}

impl<T> Page<T> {
    /// Wrap a raw array response using the requested page geometry.
    pub fn from_items(items: Vec<T>, page: Option<u32>, per_page: Option<u32>) -> Self {
        let page = page.unwrap_or(1);
        let per_page = per_page.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let total = items.len() as u64;
        let pages = (total as u32).div_ceil(per_page);
        Page {
            items,
            total,
            page,
            per_page,
            pages,
        }
    }
}

/* --------------------------------------------------------------------------
Dashboard statistics
-------------------------------------------------------------------------- */

/// Corpus-wide counters for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_projects: i64,
    pub pending_projects: i64,
    pub approved_projects: i64,
    pub rejected_projects: i64,
    pub total_students: i64,
    pub total_supervisors: i64,
}

/// Counters scoped to a supervisor's students.
///
/// `recent_submissions` counts projects submitted in the last 30 days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorDashboardStats {
    pub total_students: i64,
    pub total_projects: i64,
    pub pending_projects: i64,
    pub approved_projects: i64,
    pub rejected_projects: i64,
    pub recent_submissions: i64,
}

/// A supervised student with their latest submission, as listed on the
/// supervisor's students screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentWithProject {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub matric_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default)]
    pub project_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_project: Option<LatestProject>,
}

/// The newest submission attached to a [`StudentWithProject`] row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestProject {
    pub id: DbId,
    pub title: String,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "lenient_timestamp_opt")]
    pub created_at: Option<Timestamp>,
}

/// Client-side status breakdown of a project collection, shown on the
/// "my projects" dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTally {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl ProjectTally {
    /// Count a collection by status. Only the three headline statuses get
    /// their own bucket; everything else lands in `total` alone.
    pub fn tally<'a, I>(projects: I) -> Self
    where
        I: IntoIterator<Item = &'a ProjectRecord>,
    {
        let mut out = ProjectTally::default();
        for project in projects {
            out.total += 1;
            match project.status {
                ProjectStatus::Pending => out.pending += 1,
                ProjectStatus::Approved => out.approved += 1,
                ProjectStatus::Rejected => out.rejected += 1,
                _ => {}
            }
        }
        out
    }
}
