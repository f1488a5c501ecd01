//! Account model: one tagged union over the three portal roles.
//!
//! The backend discriminates accounts by a flat `role` field, so the enum
//! is tagged on `role` and each variant carries its role-specific profile.
//! Relations (a student's supervisor, a supervisor's students) are only
//! populated when the profile was fetched with `include_relations`.

use serde::{Deserialize, Serialize};

use crate::project::ProjectRecord;
use crate::types::{lenient_timestamp_opt, DbId, Role, Timestamp};

/// Any portal account, discriminated by the wire `role` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum Account {
    Student(StudentProfile),
    Supervisor(SupervisorProfile),
    Admin(AdminProfile),
}

/// A student account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "lenient_timestamp_opt")]
    pub created_at: Option<Timestamp>,
    pub matric_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<DbId>,
    /// Populated with `include_relations` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<Box<SupervisorProfile>>,
    /// Populated with `include_relations` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectRecord>>,
}

/// A supervisor account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorProfile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "lenient_timestamp_opt")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Populated with `include_relations` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<Vec<StudentProfile>>,
}

/// An admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "lenient_timestamp_opt")]
    pub created_at: Option<Timestamp>,
}

/// Reply of the login and registration endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: Account,
}

/// Payload for `POST /admin/students`. The admin console provisions
/// accounts without passwords; credentials are issued out of band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentAccount {
    pub name: String,
    pub email: String,
    pub matric_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<DbId>,
}

/// Partial payload for `PUT /admin/students/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStudentAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matric_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor_id: Option<DbId>,
}

/// Payload for `POST /admin/supervisors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSupervisorAccount {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Partial payload for `PUT /admin/supervisors/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSupervisorAccount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl Account {
    pub fn id(&self) -> DbId {
        match self {
            Account::Student(p) => p.id,
            Account::Supervisor(p) => p.id,
            Account::Admin(p) => p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Account::Student(p) => &p.name,
            Account::Supervisor(p) => &p.name,
            Account::Admin(p) => &p.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Account::Student(p) => &p.email,
            Account::Supervisor(p) => &p.email,
            Account::Admin(p) => &p.email,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Account::Student(_) => Role::Student,
            Account::Supervisor(_) => Role::Supervisor,
            Account::Admin(_) => Role::Admin,
        }
    }

    pub fn department(&self) -> Option<&str> {
        match self {
            Account::Student(p) => p.department.as_deref(),
            Account::Supervisor(p) => p.department.as_deref(),
            Account::Admin(p) => p.department.as_deref(),
        }
    }

    pub fn as_student(&self) -> Option<&StudentProfile> {
        match self {
            Account::Student(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_supervisor(&self) -> Option<&SupervisorProfile> {
        match self {
            Account::Supervisor(p) => Some(p),
            _ => None,
        }
    }
}
