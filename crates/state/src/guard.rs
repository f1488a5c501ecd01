//! Session-aware route guarding.
//!
//! [`RouteGuard`] wires the pure [`evaluate`] decision to the live
//! session: before deciding, it checks the persisted token's expiry and
//! signs the visitor out when it has lapsed, so a protected target
//! redirects to login instead of serving a screen whose first request
//! would bounce with a 401.

use std::sync::Arc;

use scholarbase_core::{evaluate, is_token_expired, RouteDecision, RouteRequirement};

use crate::auth::AuthSession;

pub struct RouteGuard {
    session: Arc<AuthSession>,
}

impl RouteGuard {
    pub fn new(session: Arc<AuthSession>) -> Self {
        Self { session }
    }

    /// Decide whether the visitor may reach `target`.
    ///
    /// Expiry runs first and unconditionally: an expired token clears
    /// the session even when the target itself is public. The decision
    /// then runs against whoever is still signed in, with `target` as
    /// the return location for a login redirect.
    pub async fn check(&self, target: &str, requirement: &RouteRequirement) -> RouteDecision {
        if let Some(token) = self.session.store().token() {
            if is_token_expired(&token) {
                tracing::info!(target, "Access token expired, signing out");
                self.session.logout().await;
            }
        }

        let user = self.session.current_user().await;
        evaluate(user.as_ref(), requirement, Some(target))
    }
}
