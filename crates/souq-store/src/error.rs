//! Store error type.

use souq_api::ApiError;
use souq_commerce::CommerceError;
use thiserror::Error;

/// Errors surfaced by the application-state layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Local domain validation failure; no network call was made.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Failure from the API client.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl StoreError {
    /// Check whether this failure forces a login redirect.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, StoreError::Api(e) if e.is_session_expired())
    }

    /// User-facing toast message for this failure.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Commerce(e) => e.to_string(),
            StoreError::Api(e) => e.user_message(),
        }
    }
}
