//! Storefront domain types and checkout state machines.
//!
//! This crate provides the client-side domain model for the storefront:
//!
//! - **Catalog**: products, attributes, selections, resolved variations
//! - **Cart**: the server-owned cart snapshot and its line items
//! - **Checkout**: the order wizard and OTP entry state machines
//!
//! It performs no I/O. The server owns all business logic (pricing, stock,
//! tax); these types mirror its responses and gate what the client may ask
//! for next.
//!
//! # Example
//!
//! ```rust
//! use souq_commerce::prelude::*;
//!
//! let mut wizard = CheckoutWizard::new();
//! wizard.select_address(AddressId::new(3));
//! assert_eq!(wizard.advance(), Ok(CheckoutStatus::ShippingMethod));
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod ids;

pub use error::CommerceError;
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{
        Attribute, AttributeType, AttributeValue, Product, Selection, Variation,
    };

    // Cart
    pub use crate::cart::{
        validate_quantity, Cart, CartItem, OrderAttribute, PaymentMethod, ShippingMethod,
        MAX_QUANTITY, MIN_QUANTITY,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutStatus, CheckoutWizard, InputDirection, OtpEntry, OTP_LENGTH,
    };
}
