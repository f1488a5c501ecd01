//! Filter composition engine shared by every listing screen.
//!
//! One AND-composed predicate covers the browse, my-projects, and admin
//! screens; they differ only in which haystacks the free-text search term
//! runs against, expressed by [`SearchFields`]. Unset fields never
//! constrain, so the empty filter selects everything.

use serde::{Deserialize, Serialize};

use crate::project::ProjectRecord;
use crate::types::{DbId, ProjectStatus, Tag};

/// Filter criteria for project listings. Doubles as the query-parameter
/// source for the server-side listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectFilter {
    pub search: Option<String>,
    pub year: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub status: Option<ProjectStatus>,
    pub supervisor_id: Option<DbId>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Which haystacks the search term matches besides the title.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchFields {
    pub description: bool,
    pub student_name: bool,
    pub supervisor_name: bool,
}

impl SearchFields {
    /// The base engine: title and description.
    pub const BASE: SearchFields = SearchFields {
        description: true,
        student_name: false,
        supervisor_name: false,
    };

    /// The public browse screen: title and the submitting student's name.
    pub const BROWSE: SearchFields = SearchFields {
        description: false,
        student_name: true,
        supervisor_name: false,
    };

    /// The admin manage screen: everything.
    pub const MANAGE: SearchFields = SearchFields {
        description: true,
        student_name: true,
        supervisor_name: true,
    };
}

impl ProjectFilter {
    /// Base-engine predicate (search runs over title + description).
    pub fn matches(&self, project: &ProjectRecord) -> bool {
        self.matches_with(project, &SearchFields::BASE)
    }

    /// Full predicate with explicit search targets. Rules compose with
    /// AND; any unset field passes.
    pub fn matches_with(&self, project: &ProjectRecord, fields: &SearchFields) -> bool {
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }

        if let Some(year) = &self.year {
            if &project.year != year {
                return false;
            }
        }

        if let Some(supervisor_id) = self.supervisor_id {
            if project.supervisor_id != Some(supervisor_id) {
                return false;
            }
        }

        if let Some(department) = &self.department {
            let needle = department.to_lowercase();
            let hit = project
                .student
                .as_ref()
                .and_then(|s| s.department.as_deref())
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !hit {
                return false;
            }
        }

        if !self.tags.is_empty() && !self.tags.iter().any(|tag| project.tags.contains(tag)) {
            return false;
        }

        if let Some(raw) = &self.search {
            let needle = raw.trim().to_lowercase();
            if !needle.is_empty() {
                let mut haystacks: Vec<&str> = vec![&project.title];
                if fields.description {
                    haystacks.push(&project.description);
                }
                if fields.student_name {
                    if let Some(student) = &project.student {
                        haystacks.push(&student.name);
                    }
                }
                if fields.supervisor_name {
                    if let Some(supervisor) = &project.supervisor {
                        haystacks.push(&supervisor.name);
                    }
                }
                if !haystacks.iter().any(|h| h.to_lowercase().contains(&needle)) {
                    return false;
                }
            }
        }

        true
    }

    /// Order-preserving filter with the base engine.
    pub fn apply(&self, projects: &[ProjectRecord]) -> Vec<ProjectRecord> {
        projects
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }

    /// Query parameters for `GET /projects/all`, in the order the portal
    /// has always sent them. Tags travel as one comma-separated value.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.tags.is_empty() {
            let csv = self
                .tags
                .iter()
                .map(Tag::as_str)
                .collect::<Vec<_>>()
                .join(",");
            params.push(("tags".to_string(), csv));
        }
        if let Some(year) = &self.year {
            params.push(("year".to_string(), year.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(department) = &self.department {
            params.push(("department".to_string(), department.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page".to_string(), per_page.to_string()));
        }
        params
    }

    /// Query parameters for the approved-only listing.
    ///
    /// The status is pinned to the uppercase literal `APPROVED`, which the
    /// backend resolves by enum name. Any status set on the filter itself
    /// is overridden, matching how the portal has always requested this
    /// listing.
    pub fn approved_query(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .to_query()
            .into_iter()
            .filter(|(key, _)| key != "status")
            .collect();
        let insert_at = params
            .iter()
            .position(|(key, _)| key == "department" || key == "search" || key == "page")
            .unwrap_or(params.len());
        params.insert(insert_at, ("status".to_string(), "APPROVED".to_string()));
        params
    }
}

/// The public browse screen's view: search over title + student name,
/// newest submissions first.
pub fn browse_view(projects: &[ProjectRecord], filter: &ProjectFilter) -> Vec<ProjectRecord> {
    let mut out: Vec<ProjectRecord> = projects
        .iter()
        .filter(|p| filter.matches_with(p, &SearchFields::BROWSE))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}

/// The admin manage screen's view: search over every name-ish haystack,
/// original order preserved.
pub fn manage_view(projects: &[ProjectRecord], filter: &ProjectFilter) -> Vec<ProjectRecord> {
    projects
        .iter()
        .filter(|p| filter.matches_with(p, &SearchFields::MANAGE))
        .cloned()
        .collect()
}

/// Filter criteria for the student roster listings (`GET /admin/students`,
/// `GET /supervisor/students`). Search covers name, email, and matric
/// number server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentFilter {
    pub department: Option<String>,
    pub year: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl StudentFilter {
    /// Query parameters in the order the portal sends them.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(department) = &self.department {
            params.push(("department".to_string(), department.clone()));
        }
        if let Some(year) = &self.year {
            params.push(("year".to_string(), year.clone()));
        }
        if let Some(search) = &self.search {
            params.push(("search".to_string(), search.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page".to_string(), per_page.to_string()));
        }
        params
    }
}
