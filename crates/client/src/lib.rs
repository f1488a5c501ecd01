//! HTTP client and session persistence for the ScholarBase portal.
//!
//! This crate owns everything that touches the network or the disk:
//!
//! - [`PortalApi`] — the REST client, one endpoint-group module per
//!   backend router (`auth`, `projects`, `supervisor`, `admin`,
//!   `catalog`).
//! - [`SessionStore`] — durable token/profile persistence with the
//!   time-boxed profile cache, over a pluggable [`SessionStorage`].
//! - [`AuthBackend`] / [`ProjectBackend`] — the trait seams the state
//!   layer consumes, implemented by [`PortalApi`] and by
//!   [`mock::MockPortal`].
//! - [`RequestSlot`] — latest-wins guard for racing listing loads.

pub mod admin;
pub mod api;
pub mod auth;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod mock;
pub mod projects;
pub mod session;
pub mod slot;
pub mod supervisor;

pub use api::PortalApi;
pub use backend::{AuthBackend, ProjectBackend};
pub use catalog::UploadKind;
pub use config::ClientConfig;
pub use error::{PortalApiError, SessionError};
pub use session::{
    FileSessionStorage, MemorySessionStorage, SessionStorage, SessionStore, StoredSession,
    PROFILE_CACHE_TTL_SECS,
};
pub use slot::RequestSlot;
