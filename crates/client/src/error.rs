//! Error types for the portal HTTP client and session storage.

use scholarbase_core::error::{extract_detail, GENERIC_ERROR_MESSAGE};

/// Errors from the portal REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum PortalApiError {
    /// The HTTP request itself failed (network, DNS, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code. `message` is the
    /// normalized `detail` payload when one was present.
    #[error("Portal API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl PortalApiError {
    /// The single line a user should see for this failure.
    pub fn user_message(&self) -> String {
        match self {
            PortalApiError::Request(e) => e.to_string(),
            PortalApiError::Api { message, .. } => message.clone(),
        }
    }

    /// True for a 401, meaning the session's token no longer works.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, PortalApiError::Api { status: 401, .. })
    }

    /// Build an `Api` error from a failed response's status and body,
    /// normalizing the backend's `detail` shape into one message.
    pub(crate) fn from_response(status: u16, body: String) -> Self {
        let message = extract_detail(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                GENERIC_ERROR_MESSAGE.to_string()
            } else {
                body
            }
        });
        PortalApiError::Api { status, message }
    }
}

/// Errors from reading or writing the persisted session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session record (de)serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
