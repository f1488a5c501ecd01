//! Authentication session state.
//!
//! [`AuthSession`] owns the signed-in account for the lifetime of the
//! process: it restores a persisted session on startup, runs login,
//! registration and sign-out against an [`AuthBackend`], and exposes the
//! loading/error flags screens bind to. All mutation goes through a
//! single `RwLock`, so readers always observe a consistent snapshot.

use std::sync::Arc;

use scholarbase_client::{AuthBackend, SessionStore};
use scholarbase_core::{is_token_expired, Account, RegisterRequest, Role};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct AuthState {
    user: Option<Account>,
    loading: bool,
    error: Option<String>,
}

/// Shared authentication controller.
///
/// Construct once, wrap in an [`Arc`], call [`AuthSession::hydrate`]
/// before serving any screen. `loading` starts `true` so callers that
/// race hydration render a spinner instead of a logged-out flash.
pub struct AuthSession {
    backend: Arc<dyn AuthBackend>,
    store: Arc<SessionStore>,
    inner: RwLock<AuthState>,
}

impl AuthSession {
    pub fn new(backend: Arc<dyn AuthBackend>, store: Arc<SessionStore>) -> Self {
        Self {
            backend,
            store,
            inner: RwLock::new(AuthState {
                user: None,
                loading: true,
                error: None,
            }),
        }
    }

    /// Restore the persisted session, if any.
    ///
    /// A stored token that is expired (or undecodable) clears the whole
    /// session rather than restoring an account whose first request
    /// would only bounce with a 401. No network call is made either way;
    /// the profile refresh path revalidates lazily.
    pub async fn hydrate(&self) {
        let restored = match self.store.load() {
            Some(session) if is_token_expired(&session.access_token) => {
                tracing::info!("Stored access token expired, discarding session");
                if let Err(err) = self.store.clear() {
                    tracing::warn!(error = %err, "Failed to remove stale session");
                }
                None
            }
            Some(session) => Some(session.user),
            None => None,
        };

        let mut state = self.inner.write().await;
        if let Some(user) = &restored {
            tracing::info!(user_id = user.id(), role = %user.role(), "Session restored");
        }
        state.user = restored;
        state.loading = false;
    }

    /// Sign in with credentials. Returns `true` on success.
    ///
    /// On failure the cause lands in [`AuthSession::error`]; the session
    /// (in memory and on disk) is left exactly as it was.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.begin_attempt().await;
        match self.backend.login(email, password).await {
            Ok(response) => {
                tracing::info!(email, role = %response.user.role(), "Signed in");
                self.adopt_session(&response.access_token, response.user)
                    .await;
                true
            }
            Err(err) => {
                let message = err.user_message();
                tracing::warn!(email, error = %message, "Login failed");
                self.fail_attempt(message).await;
                false
            }
        }
    }

    /// Create an account and sign in as it. Returns `true` on success.
    ///
    /// The request is validated locally first; an invalid one never
    /// reaches the backend.
    pub async fn register(&self, request: &RegisterRequest) -> bool {
        if let Err(err) = request.validate() {
            let message = err.user_message();
            tracing::debug!(error = %message, "Rejected registration before submit");
            let mut state = self.inner.write().await;
            state.error = Some(message);
            return false;
        }

        self.begin_attempt().await;
        match self.backend.register(request).await {
            Ok(response) => {
                tracing::info!(
                    user_id = response.user.id(),
                    role = %response.user.role(),
                    "Account registered"
                );
                self.adopt_session(&response.access_token, response.user)
                    .await;
                true
            }
            Err(err) => {
                let message = err.user_message();
                tracing::warn!(error = %message, "Registration failed");
                self.fail_attempt(message).await;
                false
            }
        }
    }

    /// Drop the session in memory and on disk. Purely local.
    pub async fn logout(&self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "Failed to remove persisted session");
        }
        let mut state = self.inner.write().await;
        state.user = None;
        state.error = None;
        tracing::info!("Signed out");
    }

    /// Re-fetch the signed-in account's profile with relations.
    ///
    /// Within the cache TTL a fresh copy is served from the session store
    /// unless `force` is set. A 401 means the token no longer stands, so
    /// the whole session is cleared; any other failure leaves the current
    /// session untouched and only sets `error`.
    pub async fn refresh_profile(&self, force: bool) -> Option<Account> {
        if !force {
            if let Some(cached) = self.store.cached_profile() {
                let mut state = self.inner.write().await;
                state.user = Some(cached.clone());
                return Some(cached);
            }
        }

        self.begin_attempt().await;
        match self.backend.fetch_profile(true).await {
            Ok(profile) => {
                if let Err(err) = self.store.store_profile(&profile) {
                    tracing::warn!(error = %err, "Failed to cache refreshed profile");
                }
                let mut state = self.inner.write().await;
                state.user = Some(profile.clone());
                state.loading = false;
                Some(profile)
            }
            Err(err) if err.is_unauthorized() => {
                tracing::info!("Profile fetch returned 401, discarding session");
                if let Err(clear_err) = self.store.clear() {
                    tracing::warn!(error = %clear_err, "Failed to remove persisted session");
                }
                let mut state = self.inner.write().await;
                state.user = None;
                state.error = Some(err.user_message());
                state.loading = false;
                None
            }
            Err(err) => {
                self.fail_attempt(err.user_message()).await;
                None
            }
        }
    }

    // ---- snapshot accessors ----

    pub async fn current_user(&self) -> Option<Account> {
        self.inner.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.user.is_some()
    }

    pub async fn loading(&self) -> bool {
        self.inner.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }

    pub async fn has_role(&self, role: Role) -> bool {
        self.inner
            .read()
            .await
            .user
            .as_ref()
            .map(|user| user.role() == role)
            .unwrap_or(false)
    }

    pub async fn has_any_role(&self, roles: &[Role]) -> bool {
        self.inner
            .read()
            .await
            .user
            .as_ref()
            .map(|user| roles.contains(&user.role()))
            .unwrap_or(false)
    }

    /// The session store this controller persists through.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    // ---- private helpers ----

    /// Every attempt starts loading with the previous error cleared, so
    /// `error` reflects at most the outcome of the latest attempt.
    async fn begin_attempt(&self) {
        let mut state = self.inner.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn fail_attempt(&self, message: String) {
        let mut state = self.inner.write().await;
        state.error = Some(message);
        state.loading = false;
    }

    /// Adopt a fresh token/account pair. Persistence failures are logged
    /// and swallowed: the session stays valid for this run even when the
    /// disk copy could not be written.
    async fn adopt_session(&self, access_token: &str, user: Account) {
        if let Err(err) = self.store.save(access_token, &user) {
            tracing::warn!(error = %err, "Failed to persist session");
        }
        let mut state = self.inner.write().await;
        state.user = Some(user);
        state.loading = false;
    }
}
