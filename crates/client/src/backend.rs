//! Backend trait seams between the state layer and the HTTP client.
//!
//! The session controller and the project store talk to these traits
//! rather than to [`PortalApi`] directly, so flow tests can swap in
//! [`crate::mock::MockPortal`] without a server.

use async_trait::async_trait;

use scholarbase_core::{
    Account, AuthResponse, CreateProject, DbId, Page, ProjectFilter, ProjectRecord,
    RegisterRequest, ReviewRequest, UpdateProject,
};

use crate::api::PortalApi;
use crate::error::PortalApiError;

/// Authentication operations the session controller needs.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange credentials for a token and the signed-in account.
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, PortalApiError>;

    /// Create an account and sign it in.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, PortalApiError>;

    /// The account behind the current bearer token.
    async fn fetch_profile(&self, include_relations: bool) -> Result<Account, PortalApiError>;
}

/// Project operations the collection store needs.
#[async_trait]
pub trait ProjectBackend: Send + Sync {
    async fn list_all(&self, filter: &ProjectFilter) -> Result<Page<ProjectRecord>, PortalApiError>;

    async fn list_approved(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Page<ProjectRecord>, PortalApiError>;

    async fn list_mine(&self) -> Result<Vec<ProjectRecord>, PortalApiError>;

    async fn get(&self, id: DbId) -> Result<ProjectRecord, PortalApiError>;

    async fn create(&self, data: &CreateProject) -> Result<ProjectRecord, PortalApiError>;

    async fn update(&self, data: &UpdateProject) -> Result<ProjectRecord, PortalApiError>;

    async fn delete(&self, id: DbId) -> Result<(), PortalApiError>;

    async fn approve(&self, id: DbId) -> Result<ProjectRecord, PortalApiError>;

    async fn reject(&self, id: DbId, reason: Option<&str>)
        -> Result<ProjectRecord, PortalApiError>;

    async fn review(
        &self,
        id: DbId,
        request: &ReviewRequest,
    ) -> Result<ProjectRecord, PortalApiError>;
}

#[async_trait]
impl AuthBackend for PortalApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, PortalApiError> {
        PortalApi::login(self, email, password).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, PortalApiError> {
        PortalApi::register(self, request).await
    }

    async fn fetch_profile(&self, include_relations: bool) -> Result<Account, PortalApiError> {
        PortalApi::fetch_profile(self, include_relations).await
    }
}

#[async_trait]
impl ProjectBackend for PortalApi {
    async fn list_all(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Page<ProjectRecord>, PortalApiError> {
        self.list_projects(filter).await
    }

    async fn list_approved(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Page<ProjectRecord>, PortalApiError> {
        self.list_approved_projects(filter).await
    }

    async fn list_mine(&self) -> Result<Vec<ProjectRecord>, PortalApiError> {
        self.list_my_projects().await
    }

    async fn get(&self, id: DbId) -> Result<ProjectRecord, PortalApiError> {
        self.get_project(id).await
    }

    async fn create(&self, data: &CreateProject) -> Result<ProjectRecord, PortalApiError> {
        self.create_project(data).await
    }

    async fn update(&self, data: &UpdateProject) -> Result<ProjectRecord, PortalApiError> {
        self.update_project(data).await
    }

    async fn delete(&self, id: DbId) -> Result<(), PortalApiError> {
        self.delete_project(id).await
    }

    async fn approve(&self, id: DbId) -> Result<ProjectRecord, PortalApiError> {
        self.approve_project(id).await
    }

    async fn reject(
        &self,
        id: DbId,
        reason: Option<&str>,
    ) -> Result<ProjectRecord, PortalApiError> {
        self.reject_project(id, reason).await
    }

    async fn review(
        &self,
        id: DbId,
        request: &ReviewRequest,
    ) -> Result<ProjectRecord, PortalApiError> {
        self.review_project(id, request).await
    }
}
