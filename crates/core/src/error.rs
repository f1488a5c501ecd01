//! Core error type and backend error-payload normalization.
//!
//! The backend reports failures as `{"detail": ...}` where `detail` is
//! either a flat string or a list of field errors, each carrying a `msg`.
//! Every layer above funnels through [`ErrorDetail::first_message`] so a
//! failure surfaces as exactly one human-readable line.

use serde::Deserialize;

/// Fallback message when a failure carries no usable detail.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid token: {0}")]
    Token(String),
}

impl CoreError {
    /// The single line shown to the user for this failure, without the
    /// variant prefix the `Display` form carries.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Validation(msg) | CoreError::Token(msg) => msg.clone(),
        }
    }
}

/* --------------------------------------------------------------------------
Backend error payload
-------------------------------------------------------------------------- */

/// The body shape of a non-2xx backend response.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

/// `detail` is a flat message for domain errors and a list of per-field
/// entries for request validation failures.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Fields(Vec<FieldError>),
}

/// One entry of a validation-error list. Extra keys (`loc`, `type`) are
/// ignored; only the message matters to the client.
#[derive(Debug, Deserialize)]
pub struct FieldError {
    pub msg: String,
}

impl ErrorDetail {
    /// The single line shown to the user: the flat message, or the first
    /// field error's message.
    pub fn first_message(&self) -> Option<&str> {
        match self {
            ErrorDetail::Message(msg) => Some(msg.as_str()),
            ErrorDetail::Fields(fields) => fields.first().map(|f| f.msg.as_str()),
        }
    }
}

/// Pull the normalized detail message out of a raw response body, if any.
///
/// Returns `None` for non-JSON bodies, JSON without a `detail` key, and
/// empty field-error lists.
pub fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .detail
        .as_ref()
        .and_then(ErrorDetail::first_message)
        .map(str::to_owned)
}
