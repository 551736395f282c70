//! Client-side application state for the storefront.
//!
//! Sits between the UI and [`souq_api`], holding the state the server does
//! not own and orchestrating the calls it does:
//!
//! - [`VariationResolver`] — resolves attribute selections to purchasable
//!   variations with last-selection-wins semantics
//! - [`CartStore`] — read-through cache of the server-owned cart
//! - [`CheckoutFlow`] — drives the checkout wizard and order placement
//! - [`OtpFlow`] — OTP entry, debounced auto-submit, and login

mod cart_store;
mod checkout_flow;
mod error;
mod otp_flow;
mod resolver;

pub use cart_store::CartStore;
pub use checkout_flow::{CheckoutFlow, OrderConfirmation};
pub use error::StoreError;
pub use otp_flow::OtpFlow;
pub use resolver::{PendingResolution, ResolveState, VariationResolver};
