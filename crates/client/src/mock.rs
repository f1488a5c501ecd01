//! Mock portal backend for deterministic testing.
//!
//! Implements [`AuthBackend`] and [`ProjectBackend`] against in-memory
//! state, so session and collection flows can be exercised without a
//! server. Every call is logged for assertion, and failures and delays
//! can be queued one call ahead.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scholarbase_client::mock::MockPortal;
//!
//! # fn account() -> scholarbase_core::Account { unimplemented!() }
//! let portal = MockPortal::new()
//!     .with_account(account(), "hunter22", "token-1");
//! portal.fail_next(401, "Could not validate credentials");
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use scholarbase_core::{
    Account, AdminProfile, AuthResponse, CreateProject, DbId, Page, ProjectFilter, ProjectRecord,
    ProjectStatus, RegisterRequest, ReviewRequest, StudentProfile, SupervisorProfile,
    UpdateProject,
};

use crate::backend::{AuthBackend, ProjectBackend};
use crate::error::PortalApiError;

/// One recorded backend call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub operation: String,
    pub input: String,
    pub timestamp: std::time::Instant,
}

/// A seeded credential set.
struct SeededAccount {
    password: String,
    token: String,
    account: Account,
}

#[derive(Default)]
struct MockState {
    accounts: Vec<SeededAccount>,
    /// The account `fetch_profile` answers with; set by login/register.
    signed_in: Option<Account>,
    projects: Vec<ProjectRecord>,
    next_project_id: DbId,
    fail_next: Option<(u16, String)>,
    delay_next_ms: Option<u64>,
}

/// Mock portal for testing session and collection flows.
#[derive(Clone)]
pub struct MockPortal {
    state: Arc<Mutex<MockState>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl Default for MockPortal {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPortal {
    /// Create an empty mock with no accounts or projects.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                next_project_id: 1,
                ..MockState::default()
            })),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed an account that `login` will accept with `password`,
    /// answering with `token`.
    pub fn with_account(self, account: Account, password: &str, token: &str) -> Self {
        self.state.lock().unwrap().accounts.push(SeededAccount {
            password: password.to_string(),
            token: token.to_string(),
            account,
        });
        self
    }

    /// Seed the account `fetch_profile` answers with, as if a session
    /// were already established.
    pub fn with_profile(self, account: Account) -> Self {
        self.state.lock().unwrap().signed_in = Some(account);
        self
    }

    /// Seed a project record.
    pub fn with_project(self, record: ProjectRecord) -> Self {
        let mut state = self.state.lock().unwrap();
        state.next_project_id = state.next_project_id.max(record.id + 1);
        state.projects.push(record);
        drop(state);
        self
    }

    /// Fail the next call with an API error.
    pub fn fail_next(&self, status: u16, detail: &str) {
        self.state.lock().unwrap().fail_next = Some((status, detail.to_string()));
    }

    /// Delay the next call, keeping it in flight while later calls land.
    pub fn delay_next(&self, ms: u64) {
        self.state.lock().unwrap().delay_next_ms = Some(ms);
    }

    /// All logged calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// How many times `operation` was called.
    pub fn call_count(&self, operation: &str) -> usize {
        self.call_log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    /// A snapshot of the mock's project table.
    pub fn projects(&self) -> Vec<ProjectRecord> {
        self.state.lock().unwrap().projects.clone()
    }

    // ---- private helpers ----

    /// Log the call, apply any queued delay, then surface any queued
    /// failure.
    async fn enter(&self, operation: &str, input: impl Into<String>) -> Result<(), PortalApiError> {
        self.call_log.lock().unwrap().push(MockCall {
            operation: operation.to_string(),
            input: input.into(),
            timestamp: std::time::Instant::now(),
        });

        let delay = self.state.lock().unwrap().delay_next_ms.take();
        if let Some(ms) = delay {
            tokio::time::sleep(tokio::time::Duration::from_millis(ms)).await;
        }

        if let Some((status, message)) = self.state.lock().unwrap().fail_next.take() {
            return Err(PortalApiError::Api { status, message });
        }
        Ok(())
    }

    fn query_string(params: &[(String, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn find_project(
        state: &mut MockState,
        id: DbId,
    ) -> Result<&mut ProjectRecord, PortalApiError> {
        state
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PortalApiError::Api {
                status: 404,
                message: "Project not found".to_string(),
            })
    }

    fn signed_in(state: &MockState) -> Result<Account, PortalApiError> {
        state.signed_in.clone().ok_or(PortalApiError::Api {
            status: 401,
            message: "Not authenticated".to_string(),
        })
    }
}

#[async_trait]
impl AuthBackend for MockPortal {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, PortalApiError> {
        self.enter("login", email).await?;

        let mut state = self.state.lock().unwrap();
        let seeded = state
            .accounts
            .iter()
            .find(|s| s.account.email() == email && s.password == password)
            .ok_or(PortalApiError::Api {
                status: 401,
                message: "Incorrect email or password".to_string(),
            })?;
        let response = AuthResponse {
            access_token: seeded.token.clone(),
            token_type: "bearer".to_string(),
            user: seeded.account.clone(),
        };
        state.signed_in = Some(response.user.clone());
        Ok(response)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, PortalApiError> {
        self.enter("register", request.email()).await?;

        let mut state = self.state.lock().unwrap();
        if state
            .accounts
            .iter()
            .any(|s| s.account.email() == request.email())
        {
            return Err(PortalApiError::Api {
                status: 400,
                message: "Email already registered".to_string(),
            });
        }

        let id = state.accounts.len() as DbId + 1000;
        let account = match request {
            RegisterRequest::Student(r) => Account::Student(StudentProfile {
                id,
                name: r.name.clone(),
                email: r.email.clone(),
                department: r.department.clone(),
                email_verified: false,
                created_at: Some(Utc::now()),
                matric_no: r.matric_no.clone(),
                year: None,
                supervisor_id: None,
                supervisor: None,
                projects: None,
            }),
            RegisterRequest::Supervisor(r) => Account::Supervisor(SupervisorProfile {
                id,
                name: r.name.clone(),
                email: r.email.clone(),
                department: r.department.clone(),
                email_verified: false,
                created_at: Some(Utc::now()),
                title: r.title.clone(),
                faculty: r.faculty.clone(),
                office_address: r.office_address.clone(),
                phone_number: r.phone_number.clone(),
                bio: r.bio.clone(),
                students: None,
            }),
            RegisterRequest::Admin(r) => Account::Admin(AdminProfile {
                id,
                name: r.name.clone(),
                email: r.email.clone(),
                department: r.department.clone(),
                email_verified: false,
                created_at: Some(Utc::now()),
            }),
        };

        let token = format!("mock-token-{id}");
        state.accounts.push(SeededAccount {
            password: match request {
                RegisterRequest::Student(r) => r.password.clone(),
                RegisterRequest::Supervisor(r) => r.password.clone(),
                RegisterRequest::Admin(r) => r.password.clone(),
            },
            token: token.clone(),
            account: account.clone(),
        });
        state.signed_in = Some(account.clone());

        Ok(AuthResponse {
            access_token: token,
            token_type: "bearer".to_string(),
            user: account,
        })
    }

    async fn fetch_profile(&self, include_relations: bool) -> Result<Account, PortalApiError> {
        self.enter("fetch_profile", include_relations.to_string())
            .await?;
        let state = self.state.lock().unwrap();
        Self::signed_in(&state)
    }
}

#[async_trait]
impl ProjectBackend for MockPortal {
    async fn list_all(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Page<ProjectRecord>, PortalApiError> {
        self.enter("list_all", Self::query_string(&filter.to_query()))
            .await?;
        let state = self.state.lock().unwrap();
        let items = filter.apply(&state.projects);
        Ok(Page::from_items(items, filter.page, filter.per_page))
    }

    async fn list_approved(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Page<ProjectRecord>, PortalApiError> {
        self.enter("list_approved", Self::query_string(&filter.approved_query()))
            .await?;
        let state = self.state.lock().unwrap();
        let pinned = ProjectFilter {
            status: Some(ProjectStatus::Approved),
            ..filter.clone()
        };
        let items = pinned.apply(&state.projects);
        Ok(Page::from_items(items, filter.page, filter.per_page))
    }

    async fn list_mine(&self) -> Result<Vec<ProjectRecord>, PortalApiError> {
        self.enter("list_mine", "").await?;
        let state = self.state.lock().unwrap();
        let me = Self::signed_in(&state)?;
        Ok(state
            .projects
            .iter()
            .filter(|p| p.student_id == Some(me.id()))
            .cloned()
            .collect())
    }

    async fn get(&self, id: DbId) -> Result<ProjectRecord, PortalApiError> {
        self.enter("get", id.to_string()).await?;
        let mut state = self.state.lock().unwrap();
        Ok(Self::find_project(&mut state, id)?.clone())
    }

    async fn create(&self, data: &CreateProject) -> Result<ProjectRecord, PortalApiError> {
        self.enter("create", data.title.clone()).await?;
        let mut state = self.state.lock().unwrap();
        let me = Self::signed_in(&state)?;

        let id = state.next_project_id;
        state.next_project_id += 1;
        let record = ProjectRecord {
            id,
            title: data.title.clone(),
            year: data.year.clone(),
            description: data.description.clone(),
            problem_statement: None,
            file_url: data.file_url.clone(),
            document_url: data.document.as_ref().map(|d| format!("/files/{}", d.file_name)),
            status: ProjectStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            student_id: Some(me.id()),
            supervisor_id: data.supervisor_id,
            tags: data.tags.clone(),
            review_comment: None,
            student: None,
            supervisor: None,
        };
        state.projects.insert(0, record.clone());
        Ok(record)
    }

    async fn update(&self, data: &UpdateProject) -> Result<ProjectRecord, PortalApiError> {
        self.enter("update", data.id.to_string()).await?;
        let mut state = self.state.lock().unwrap();
        let record = Self::find_project(&mut state, data.id)?;

        if let Some(title) = &data.title {
            record.title = title.clone();
        }
        if let Some(year) = &data.year {
            record.year = year.clone();
        }
        if let Some(description) = &data.description {
            record.description = description.clone();
        }
        if let Some(tags) = &data.tags {
            record.tags = tags.clone();
        }
        if let Some(file_url) = &data.file_url {
            record.file_url = Some(file_url.clone());
        }
        if let Some(document) = &data.document {
            record.document_url = Some(format!("/files/{}", document.file_name));
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, id: DbId) -> Result<(), PortalApiError> {
        self.enter("delete", id.to_string()).await?;
        let mut state = self.state.lock().unwrap();
        Self::find_project(&mut state, id)?;
        state.projects.retain(|p| p.id != id);
        Ok(())
    }

    async fn approve(&self, id: DbId) -> Result<ProjectRecord, PortalApiError> {
        self.enter("approve", id.to_string()).await?;
        let mut state = self.state.lock().unwrap();
        let record = Self::find_project(&mut state, id)?;
        record.status = ProjectStatus::Approved;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn reject(
        &self,
        id: DbId,
        reason: Option<&str>,
    ) -> Result<ProjectRecord, PortalApiError> {
        self.enter("reject", id.to_string()).await?;
        let mut state = self.state.lock().unwrap();
        let record = Self::find_project(&mut state, id)?;
        record.status = ProjectStatus::Rejected;
        record.review_comment = reason.map(str::to_owned);
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn review(
        &self,
        id: DbId,
        request: &ReviewRequest,
    ) -> Result<ProjectRecord, PortalApiError> {
        self.enter("review", format!("{id}:{}", request.status.as_str()))
            .await?;
        let mut state = self.state.lock().unwrap();
        let record = Self::find_project(&mut state, id)?;
        record.status = request.status;
        if request.review_comment.is_some() {
            record.review_comment = request.review_comment.clone();
        }
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}
