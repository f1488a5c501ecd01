//! Shared fixtures for the state-layer tests.
//!
//! Controllers run against [`scholarbase_client::mock::MockPortal`] with
//! in-memory session storage, so every test is hermetic: no network, no
//! disk, no shared state between tests.

use chrono::Utc;

use scholarbase_core::{Account, DbId, ProjectRecord, ProjectStatus, StudentProfile, Tag};

/// The tests' one student account.
pub fn student() -> Account {
    Account::Student(StudentProfile {
        id: 7,
        name: "Ada Obi".to_string(),
        email: "ada@university.edu".to_string(),
        department: Some("Computer Science".to_string()),
        email_verified: true,
        created_at: None,
        matric_no: "CSC/2020/041".to_string(),
        year: Some("2024".to_string()),
        supervisor_id: None,
        supervisor: None,
        projects: None,
    })
}

/// A project owned by the fixture student.
pub fn project(id: DbId, title: &str, status: ProjectStatus) -> ProjectRecord {
    ProjectRecord {
        id,
        title: title.to_string(),
        year: "2024".to_string(),
        description: format!("{title} description"),
        problem_statement: None,
        file_url: None,
        document_url: None,
        status,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        student_id: Some(7),
        supervisor_id: None,
        tags: vec![Tag::AI],
        review_comment: None,
        student: None,
        supervisor: None,
    }
}
