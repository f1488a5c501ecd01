//! One module per command group, mirroring the portal's screens.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod projects;
pub mod review;

use scholarbase_client::PortalApiError;
use scholarbase_core::{CoreError, ProjectStatus, Tag};

/// Flatten an API failure to its user-facing message.
pub(crate) fn friendly(err: PortalApiError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}

pub(crate) fn parse_tag(raw: &str) -> Result<Tag, String> {
    raw.parse().map_err(|err: CoreError| err.to_string())
}

pub(crate) fn parse_status(raw: &str) -> Result<ProjectStatus, String> {
    raw.parse().map_err(|err: CoreError| err.to_string())
}
