//! Stateful controllers for the ScholarBase portal client.
//!
//! This crate is the layer between the HTTP client and whatever front
//! end renders it: it owns the in-memory truth a UI binds to and keeps
//! that truth consistent across overlapping loads and mutations.
//!
//! - [`AuthSession`] — the signed-in account, hydration from the
//!   persisted session, login/register/logout, profile refresh.
//! - [`ProjectStore`] — the normalized project table with its three
//!   listings, mutations, and derived queries.
//! - [`RouteGuard`] — navigation decisions against the live session,
//!   including token-expiry sign-out.
//! - [`NoticeBus`] — the broadcast feed mutations report through.

pub mod auth;
pub mod guard;
pub mod notify;
pub mod projects;

pub use auth::AuthSession;
pub use guard::RouteGuard;
pub use notify::{Notice, NoticeBus, NoticeLevel};
pub use projects::ProjectStore;
