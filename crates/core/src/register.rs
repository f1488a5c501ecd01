//! Registration payloads, one schema per role.
//!
//! The backend exposes a separate registration endpoint per role and each
//! accepts a different payload, so the request is a role-tagged union with
//! its own schema per variant rather than one struct of optional fields.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::types::Role;

/// A registration request for any of the three roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum RegisterRequest {
    Student(StudentRegistration),
    Supervisor(SupervisorRegistration),
    Admin(AdminRegistration),
}

/// Payload of `POST /auth/register/student`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StudentRegistration {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[validate(length(min = 1, message = "Matric number is required"))]
    pub matric_no: String,
}

/// Payload of `POST /auth/register/supervisor`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SupervisorRegistration {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
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

/// Payload of `POST /auth/register/admin`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminRegistration {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl RegisterRequest {
    pub fn role(&self) -> Role {
        match self {
            RegisterRequest::Student(_) => Role::Student,
            RegisterRequest::Supervisor(_) => Role::Supervisor,
            RegisterRequest::Admin(_) => Role::Admin,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            RegisterRequest::Student(r) => &r.email,
            RegisterRequest::Supervisor(r) => &r.email,
            RegisterRequest::Admin(r) => &r.email,
        }
    }

    /// Check the payload before sending, surfacing one stable message.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            RegisterRequest::Student(r) => {
                check(r, &["name", "email", "password", "matric_no"])
            }
            RegisterRequest::Supervisor(r) => check(r, &["name", "email", "password"]),
            RegisterRequest::Admin(r) => check(r, &["name", "email", "password"]),
        }
    }
}

/// Run derive-based validation and pick the first failing field's message,
/// walking fields in declaration order since `ValidationErrors` itself has
/// no stable ordering.
fn check<T: Validate>(payload: &T, field_order: &[&str]) -> Result<(), CoreError> {
    let errors: ValidationErrors = match payload.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };
    let by_field = errors.field_errors();
    let message = field_order
        .iter()
        .find_map(|field| by_field.get(*field).and_then(|list| list.first()))
        .and_then(|error| error.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid registration details".to_string());
    Err(CoreError::Validation(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn student() -> StudentRegistration {
        StudentRegistration {
            name: "Ada Obi".to_string(),
            email: "ada@university.edu".to_string(),
            password: "correct-horse".to_string(),
            department: Some("Computer Science".to_string()),
            matric_no: "CSC/2020/041".to_string(),
        }
    }

    #[test]
    fn test_valid_student_registration_passes() {
        assert!(RegisterRequest::Student(student()).validate().is_ok());
    }

    #[test]
    fn test_missing_matric_no_surfaces_its_message() {
        let mut payload = student();
        payload.matric_no = String::new();
        assert_matches!(
            RegisterRequest::Student(payload).validate(),
            Err(CoreError::Validation(msg)) if msg == "Matric number is required"
        );
    }

    #[test]
    fn test_bad_email_beats_later_fields() {
        let mut payload = student();
        payload.email = "not-an-email".to_string();
        payload.matric_no = String::new();
        assert_matches!(
            RegisterRequest::Student(payload).validate(),
            Err(CoreError::Validation(msg)) if msg == "Enter a valid email address"
        );
    }

    #[test]
    fn test_short_password_rejected() {
        let mut payload = student();
        payload.password = "abc".to_string();
        assert_matches!(
            RegisterRequest::Student(payload).validate(),
            Err(CoreError::Validation(msg)) if msg == "Password must be at least 8 characters"
        );
    }

    #[test]
    fn test_wire_shape_is_role_tagged_and_flat() {
        let json = serde_json::to_value(RegisterRequest::Student(student())).unwrap();
        assert_eq!(json["role"], "Student");
        assert_eq!(json["matric_no"], "CSC/2020/041");
        assert_eq!(json["name"], "Ada Obi");
        assert!(json.get("title").is_none());
    }

    #[test]
    fn test_supervisor_optional_fields_omitted_when_unset() {
        let payload = SupervisorRegistration {
            name: "Dr. Bello".to_string(),
            email: "bello@university.edu".to_string(),
            password: "long-enough".to_string(),
            department: Some("Computer Science".to_string()),
            title: None,
            faculty: None,
            office_address: None,
            phone_number: None,
            bio: None,
        };
        let json = serde_json::to_value(RegisterRequest::Supervisor(payload)).unwrap();
        assert_eq!(json["role"], "Supervisor");
        assert!(json.get("faculty").is_none());
        assert!(json.get("bio").is_none());
    }
}
