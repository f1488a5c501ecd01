//! One-time wiring of the client stack for a CLI invocation.

use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use tokio::sync::broadcast;

use scholarbase_client::{ClientConfig, PortalApi, SessionStore};
use scholarbase_core::{RouteDecision, RouteRequirement};
use scholarbase_state::{AuthSession, Notice, NoticeBus, ProjectStore, RouteGuard};

use crate::render;

/// Everything a command handler needs: the raw API for the supervisor,
/// admin, and catalog surfaces, the controllers for everything else.
pub struct Portal {
    pub api: Arc<PortalApi>,
    pub auth: Arc<AuthSession>,
    pub projects: ProjectStore,
    pub guard: RouteGuard,
    notices: broadcast::Receiver<Notice>,
}

impl Portal {
    /// Build the stack from environment configuration. The session file
    /// makes sign-ins stick across invocations.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env();
        tracing::debug!(base_url = %config.base_url, "Loaded client configuration");

        let session = Arc::new(SessionStore::on_disk(config.session_file.clone()));
        let api = Arc::new(
            PortalApi::new(&config, Arc::clone(&session))
                .context("failed to build the portal HTTP client")?,
        );

        let auth = Arc::new(AuthSession::new(api.clone(), session));
        let guard = RouteGuard::new(Arc::clone(&auth));

        let bus = NoticeBus::default();
        let notices = bus.subscribe();
        let projects = ProjectStore::new(api.clone(), bus);

        Ok(Self {
            api,
            auth,
            projects,
            guard,
            notices,
        })
    }

    /// Stop with a readable message unless the guard admits `target`.
    pub async fn ensure_allowed(
        &self,
        target: &str,
        requirement: &RouteRequirement,
    ) -> Result<()> {
        match self.guard.check(target, requirement).await {
            RouteDecision::Allow => Ok(()),
            RouteDecision::RedirectLogin { .. } => {
                bail!("not signed in; run `scholarbase login` first")
            }
            RouteDecision::RedirectUnauthorized => {
                bail!("this command is not available to your role")
            }
        }
    }

    /// Print every notice the stores published since the last drain.
    pub fn drain_notices(&mut self) {
        loop {
            match self.notices.try_recv() {
                Ok(notice) => render::notice(&notice),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
    }
}
