//! ScholarBase domain core.
//!
//! Pure building blocks shared by the client, state, and CLI crates:
//!
//! - [`types`] — id/timestamp aliases and the wire enums ([`Role`],
//!   [`ProjectStatus`], [`Tag`]).
//! - [`account`] — the role-tagged [`Account`] union and its profiles.
//! - [`project`] — project records, submission DTOs, pagination, stats.
//! - [`register`] — per-role registration payloads with validation.
//! - [`filter`] — the AND-composed listing filter engine.
//! - [`guard`] — pure route access decisions.
//! - [`token`] — access-token claim inspection (no signature checks).
//! - [`error`] — [`CoreError`] and backend `detail` normalization.
//!
//! No I/O happens anywhere in this crate.

pub mod account;
pub mod error;
pub mod filter;
pub mod guard;
pub mod project;
pub mod register;
pub mod token;
pub mod types;

pub use account::{
    Account, AdminProfile, AuthResponse, CreateStudentAccount, CreateSupervisorAccount,
    StudentProfile, SupervisorProfile, UpdateStudentAccount, UpdateSupervisorAccount,
};
pub use error::{CoreError, ErrorDetail, GENERIC_ERROR_MESSAGE};
pub use filter::{browse_view, manage_view, ProjectFilter, SearchFields, StudentFilter};
pub use guard::{evaluate, RouteDecision, RouteRequirement};
pub use project::{
    AdminCreateProject, AdminUpdateProject, CreateProject, DashboardStats, DocumentUpload,
    LatestProject, Page, ProjectRecord, ProjectTally, RejectRequest, ReviewRequest,
    StudentWithProject, SupervisorDashboardStats, UpdateProject, DEFAULT_PAGE_SIZE,
};
pub use register::{
    AdminRegistration, RegisterRequest, StudentRegistration, SupervisorRegistration,
};
pub use token::{decode_claims, is_token_expired, TokenClaims};
pub use types::{DbId, ProjectStatus, Role, Tag, Timestamp};
