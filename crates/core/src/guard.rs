//! Navigation-time access decisions.
//!
//! Pure decision logic: given who is (maybe) signed in and what a route
//! requires, produce a [`RouteDecision`]. Session plumbing (token expiry,
//! clearing state) lives a layer up; this function never does I/O.

use crate::account::Account;
use crate::types::Role;

/// What a route demands of its visitor.
#[derive(Debug, Clone, Default)]
pub struct RouteRequirement {
    /// When true, an unauthenticated visitor is sent to login.
    pub require_auth: bool,
    /// When non-empty, a signed-in visitor must hold one of these roles.
    pub allowed_roles: Vec<Role>,
}

impl RouteRequirement {
    /// Anyone may pass.
    pub fn public() -> Self {
        RouteRequirement {
            require_auth: false,
            allowed_roles: Vec::new(),
        }
    }

    /// Any signed-in account may pass.
    pub fn authenticated() -> Self {
        RouteRequirement {
            require_auth: true,
            allowed_roles: Vec::new(),
        }
    }

    /// Signed in and holding one of `roles`.
    pub fn roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        RouteRequirement {
            require_auth: true,
            allowed_roles: roles.into_iter().collect(),
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    /// Sign in first; `from` carries the originating location so the
    /// visitor can be returned there after login.
    RedirectLogin { from: Option<String> },
    RedirectUnauthorized,
}

/// Decide whether `user` may visit a route with `requirement`.
///
/// The authentication gate runs before the role gate. Role gating only
/// applies to a known user: an anonymous visitor on a route that does not
/// require auth passes even when roles are listed.
pub fn evaluate(
    user: Option<&Account>,
    requirement: &RouteRequirement,
    from: Option<&str>,
) -> RouteDecision {
    if requirement.require_auth && user.is_none() {
        return RouteDecision::RedirectLogin {
            from: from.map(str::to_owned),
        };
    }

    if !requirement.allowed_roles.is_empty() {
        if let Some(user) = user {
            if !requirement.allowed_roles.contains(&user.role()) {
                return RouteDecision::RedirectUnauthorized;
            }
        }
    }

    RouteDecision::Allow
}
