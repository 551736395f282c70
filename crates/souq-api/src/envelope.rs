//! The commerce API response envelope and its normalization.
//!
//! Every endpoint answers `{status, data, message}`, but the conventions
//! are not uniform: some `status: false` responses are real errors while
//! others just mean "the collection is empty" (the cart endpoint reports
//! "Cart Is Empty" this way). All of that is normalized here, at a single
//! boundary, into [`Outcome`] before it reaches any caller.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Message the server uses for an expired or missing session.
pub const UNAUTHENTICATED_MESSAGE: &str = "Unauthenticated";

/// `status: false` messages that denote an empty collection, not an error.
const EMPTY_MARKERS: &[&str] = &["Cart Is Empty"];

/// Raw wire envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// `true` on success.
    #[serde(default)]
    pub status: bool,
    /// Payload, when the endpoint returns one.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Check whether this envelope's message marks the session as expired.
    pub fn is_unauthenticated(&self) -> bool {
        self.message.as_deref() == Some(UNAUTHENTICATED_MESSAGE)
    }
}

/// A normalized API response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Success with a payload.
    Ok(T),
    /// Success, but the endpoint returned no payload (e.g. a mutation
    /// acknowledged without echoing the new state).
    Missing,
    /// An error-shaped response that actually denotes an empty collection.
    Empty,
}

impl<T> Outcome<T> {
    /// The payload, if present.
    pub fn into_ok(self) -> Option<T> {
        match self {
            Outcome::Ok(value) => Some(value),
            _ => None,
        }
    }

    /// Map the payload, preserving the other cases.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Missing => Outcome::Missing,
            Outcome::Empty => Outcome::Empty,
        }
    }
}

/// Check whether a `status: false` message denotes an empty collection.
pub fn is_empty_marker(message: &str) -> bool {
    EMPTY_MARKERS.iter().any(|m| message.contains(m))
}

/// Fold an envelope into a typed [`Outcome`].
///
/// `context` names the operation for deserialization diagnostics.
pub fn decode<T: DeserializeOwned>(
    envelope: Envelope,
    context: &str,
) -> Result<Outcome<T>, ApiError> {
    if envelope.is_unauthenticated() {
        return Err(ApiError::SessionExpired);
    }
    if !envelope.status {
        if envelope.message.as_deref().is_some_and(is_empty_marker) {
            return Ok(Outcome::Empty);
        }
        return Err(ApiError::Rejected {
            message: envelope
                .message
                .unwrap_or_else(|| ApiError::GENERIC_REJECTION.to_string()),
        });
    }
    match envelope.data {
        Some(value) if !value.is_null() => serde_json::from_value(value)
            .map(Outcome::Ok)
            .map_err(|e| ApiError::Deserialize {
                context: context.to_string(),
                source: e,
            }),
        _ => Ok(Outcome::Missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_decode_success() {
        let env = envelope(json!({"status": true, "data": {"id": 1}, "message": "ok"}));
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Data {
            id: i64,
        }
        let outcome: Outcome<Data> = decode(env, "test").unwrap();
        assert_eq!(outcome, Outcome::Ok(Data { id: 1 }));
    }

    #[test]
    fn test_decode_missing_payload() {
        let env = envelope(json!({"status": true, "data": null}));
        let outcome: Outcome<serde_json::Value> = decode(env, "test").unwrap();
        assert_eq!(outcome, Outcome::Missing);
    }

    #[test]
    fn test_empty_cart_is_not_an_error() {
        let env = envelope(json!({"status": false, "message": "Cart Is Empty"}));
        let outcome: Outcome<serde_json::Value> = decode(env, "my-cart").unwrap();
        assert_eq!(outcome, Outcome::Empty);
    }

    #[test]
    fn test_rejection_carries_server_message() {
        let env = envelope(json!({"status": false, "message": "Out of stock"}));
        let err = decode::<serde_json::Value>(env, "add-to-cart").unwrap_err();
        match err {
            ApiError::Rejected { message } => assert_eq!(message, "Out of stock"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejection_without_message_gets_fallback() {
        let env = envelope(json!({"status": false}));
        let err = decode::<serde_json::Value>(env, "add-to-cart").unwrap_err();
        match err {
            ApiError::Rejected { message } => {
                assert_eq!(message, ApiError::GENERIC_REJECTION);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unauthenticated_message_expires_session() {
        let env = envelope(json!({"status": false, "message": "Unauthenticated"}));
        let err = decode::<serde_json::Value>(env, "my-cart").unwrap_err();
        assert!(err.is_session_expired());
    }
}
