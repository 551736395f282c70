//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// The product requires a complete attribute selection before purchase.
    #[error("Incomplete selection: missing {0}")]
    IncompleteSelection(String),

    /// Attribute does not belong to this product.
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(i64),

    /// Quantity outside the allowed per-item range.
    #[error("Invalid quantity {0}: must be between {1} and {2}")]
    InvalidQuantity(i64, i64, i64),

    /// A shipping address must be selected first.
    #[error("No shipping address selected")]
    MissingShippingAddress,

    /// A shipping method must be selected first.
    #[error("No shipping method selected")]
    MissingShippingMethod,

    /// A payment method must be selected first.
    #[error("No payment method selected")]
    MissingPaymentMethod,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Checkout already reached its terminal state.
    #[error("Checkout is already confirmed")]
    CheckoutComplete,

    /// OTP input that is not a single ASCII digit.
    #[error("Invalid OTP input: {0:?}")]
    InvalidOtpInput(char),

    /// OTP cell index outside the code length.
    #[error("OTP cell index {0} out of range")]
    OtpIndexOutOfRange(usize),
}
