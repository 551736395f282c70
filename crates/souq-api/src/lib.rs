//! HTTP client for the storefront commerce API.
//!
//! The remote API answers every call with a `{status, data, message}`
//! envelope, with a few non-uniform conventions (an empty cart arrives as
//! an error-shaped response, session expiry as HTTP 401 or an
//! "Unauthenticated" message). This crate normalizes all of that at a
//! single boundary:
//!
//! - [`StorefrontClient`] — one typed method per endpoint, attaching the
//!   bearer token and locale headers
//! - [`Outcome`] — the tagged result every endpoint returns
//!   (`Ok | Missing | Empty`), with failures as [`ApiError`]
//! - [`Session`] — shared token/redirect state, cleared by the global
//!   401 interceptor
//!
//! # Example
//!
//! ```rust,ignore
//! use souq_api::{ApiConfig, Session, StorefrontClient};
//!
//! let session = Session::authenticated(token);
//! let client = StorefrontClient::new(&ApiConfig::new(base_url), session)?;
//! match client.my_cart().await? {
//!     Outcome::Ok(cart) => render(cart),
//!     Outcome::Empty | Outcome::Missing => render_empty(),
//! }
//! ```

mod client;
mod config;
mod envelope;
mod error;
mod requests;
mod session;

pub use client::StorefrontClient;
pub use config::ApiConfig;
pub use envelope::{Envelope, Outcome, UNAUTHENTICATED_MESSAGE};
pub use error::ApiError;
pub use requests::{login_payload, AuthData, OrderMessage};
pub use session::{Session, HOME_ROUTE, LOGIN_ROUTE};
