//! API client error types.
//!
//! The taxonomy mirrors how failures surface to the customer: local
//! validation blocks the action before any network call, rejections carry
//! the server's message, transport failures get a generic message, and an
//! expired session forces a redirect to login.

use thiserror::Error;

/// Errors that can occur when talking to the commerce API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Local, pre-network failure (e.g. missing authentication token).
    /// No request was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The call completed but the server envelope has `status: false`.
    #[error("{message}")]
    Rejected {
        /// Server-provided message, or a generic fallback.
        message: String,
    },

    /// Network or timeout failure.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status with no parseable envelope.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The session is no longer valid (HTTP 401 or "Unauthenticated").
    /// Not locally recoverable; the session store has been cleared and a
    /// login redirect recorded.
    #[error("Session expired")]
    SessionExpired,

    /// The response body did not match the expected shape.
    #[error("Failed to parse response for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Generic fallback message for rejections without a server message.
    pub const GENERIC_REJECTION: &'static str = "Something went wrong, please try again";

    /// Check whether this failure forces a login redirect.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }

    /// User-facing toast message for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(msg) | ApiError::Rejected { message: msg } => msg.clone(),
            ApiError::SessionExpired => "Please login to continue".to_string(),
            _ => Self::GENERIC_REJECTION.to_string(),
        }
    }
}
