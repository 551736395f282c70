//! OTP verification flow.
//!
//! Wires the [`OtpEntry`] form state to the `login-or-register` endpoint:
//! digit entry and focus movement delegate to the entry machine, and a
//! short debounce after the last keystroke fires the one-shot auto-submit.
//! A verified code stores the token and user on the session, consumes any
//! staged registration draft, and yields the home redirect.

use std::sync::Mutex;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use souq_api::{ApiError, Outcome, StorefrontClient, HOME_ROUTE};
use souq_commerce::checkout::{InputDirection, OtpEntry};
use souq_commerce::CommerceError;

use crate::error::StoreError;

/// Delay between the last completing keystroke and the auto-submit, so a
/// paste or rapid typing settles before the request goes out.
const AUTO_SUBMIT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Drives OTP entry and verification for a phone number.
pub struct OtpFlow {
    client: StorefrontClient,
    phone: String,
    entry: Mutex<OtpEntry>,
}

impl OtpFlow {
    /// Start a verification flow for a phone number.
    pub fn new(client: StorefrontClient, phone: impl Into<String>, direction: InputDirection) -> Self {
        Self {
            client,
            phone: phone.into(),
            entry: Mutex::new(OtpEntry::new(direction)),
        }
    }

    /// Snapshot of the entry form state.
    pub fn entry(&self) -> OtpEntry {
        self.lock().clone()
    }

    /// Enter a digit, returning the cell focus should move to.
    pub fn enter_digit(&self, index: usize, ch: char) -> Result<Option<usize>, CommerceError> {
        self.lock().enter_digit(index, ch)
    }

    /// Backspace a cell, returning the cell focus should move to.
    pub fn clear_digit(&self, index: usize) -> Result<Option<usize>, CommerceError> {
        self.lock().clear_digit(index)
    }

    /// Paste a full code. All-or-nothing.
    pub fn paste(&self, text: &str) -> bool {
        self.lock().paste(text)
    }

    /// Debounced one-shot submit after the entry becomes complete.
    ///
    /// Returns `Ok(None)` when the trigger has already been consumed, the
    /// entry is incomplete, or a prior failure is pending; otherwise
    /// verifies the code and returns the post-login redirect.
    pub async fn try_auto_submit(&self) -> Result<Option<String>, StoreError> {
        sleep(AUTO_SUBMIT_DEBOUNCE).await;
        let code = {
            let mut entry = self.lock();
            if !entry.take_auto_submit() {
                return Ok(None);
            }
            entry.begin_submit();
            match entry.code() {
                Some(code) => code,
                None => return Ok(None),
            }
        };
        debug!("auto-submitting verification code");
        self.verify(code).await.map(Some)
    }

    /// Submit the entered code explicitly (the form's submit button).
    pub async fn submit(&self) -> Result<String, StoreError> {
        let code = {
            let mut entry = self.lock();
            let code = entry.code().ok_or_else(|| {
                ApiError::Validation("Enter the full verification code".to_string())
            })?;
            entry.begin_submit();
            code
        };
        self.verify(code).await
    }

    async fn verify(&self, code: String) -> Result<String, StoreError> {
        let session = self.client.session().clone();
        let payload = souq_api::login_payload(session.registration_draft(), &self.phone, &code);

        let result = self.client.login_or_register(&payload).await;
        let auth = match result {
            Ok(Outcome::Ok(auth)) => auth,
            Ok(Outcome::Missing) | Ok(Outcome::Empty) => {
                self.lock().submit_failed();
                return Err(ApiError::Rejected {
                    message: "Verification failed, please try again".to_string(),
                }
                .into());
            }
            Err(e) => {
                self.lock().submit_failed();
                return Err(e.into());
            }
        };

        let token = match auth.token {
            Some(token) => token,
            // Success envelope without a token is still a failed login.
            None => {
                self.lock().submit_failed();
                return Err(ApiError::Rejected {
                    message: "Verification failed, please try again".to_string(),
                }
                .into());
            }
        };

        session.set_token(token);
        if let Some(user) = auth.user {
            session.set_user(user);
        }
        session.clear_registration();
        self.lock().submit_succeeded();
        info!("verification succeeded");
        Ok(HOME_ROUTE.to_string())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, OtpEntry> {
        self.entry.lock().unwrap_or_else(|e| e.into_inner())
    }
}
