//! Client session state.
//!
//! Holds the bearer token, any staged registration data (consumed by the
//! OTP complete-registration flow), and the forced-redirect target set when
//! the server invalidates the session. Shared by handle: every component
//! talking to the API clones the same [`Session`].

use serde_json::Value;
use std::sync::{Arc, RwLock};

/// Route the customer is sent to when a session is required or expired.
pub const LOGIN_ROUTE: &str = "/auth/login";

/// Route the customer is sent to after a successful login.
pub const HOME_ROUTE: &str = "/";

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<Value>,
    registration_draft: Option<Value>,
    redirect: Option<String>,
}

/// Shared session handle.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

impl Session {
    /// Create an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session already holding a token.
    pub fn authenticated(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    /// Check whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Store a bearer token (login success).
    pub fn set_token(&self, token: impl Into<String>) {
        self.write().token = Some(token.into());
    }

    /// Store the logged-in user payload.
    pub fn set_user(&self, user: Value) {
        self.write().user = Some(user);
    }

    /// The logged-in user payload, if any.
    pub fn user(&self) -> Option<Value> {
        self.read().user.clone()
    }

    /// Stage registration data for the OTP complete-registration flow.
    pub fn stage_registration(&self, draft: Value) {
        self.write().registration_draft = Some(draft);
    }

    /// The staged registration data, if any.
    pub fn registration_draft(&self) -> Option<Value> {
        self.read().registration_draft.clone()
    }

    /// Drop the staged registration data (after a successful login).
    pub fn clear_registration(&self) {
        self.write().registration_draft = None;
    }

    /// Expire the session: wipe token and user data and record the forced
    /// login redirect. Called by the global 401 interceptor.
    pub fn expire(&self) {
        let mut state = self.write();
        state.token = None;
        state.user = None;
        state.redirect = Some(LOGIN_ROUTE.to_string());
    }

    /// Record a login redirect without clearing anything (unauthenticated
    /// attempt at an endpoint that requires a session).
    pub fn require_login(&self) {
        self.write().redirect = Some(LOGIN_ROUTE.to_string());
    }

    /// Record an arbitrary pending navigation.
    pub fn set_redirect(&self, route: impl Into<String>) {
        self.write().redirect = Some(route.into());
    }

    /// Consume the pending redirect, if any.
    pub fn take_redirect(&self) -> Option<String> {
        self.write().redirect.take()
    }

    /// Peek at the pending redirect without consuming it.
    pub fn pending_redirect(&self) -> Option<String> {
        self.read().redirect.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
