//! Checkout state machines: the order wizard and OTP entry.

mod otp;
mod wizard;

pub use otp::{InputDirection, OtpEntry, OTP_LENGTH};
pub use wizard::{CheckoutStatus, CheckoutWizard};
