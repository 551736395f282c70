//! Server-owned cart snapshot types.
//!
//! The server is the single source of truth for the cart: items, totals,
//! vouchers, shipping cost, tax. The client never computes derived totals;
//! it holds a read-through snapshot replaced wholesale on every mutation
//! response.

mod item;
mod snapshot;

pub use item::{validate_quantity, CartItem, MAX_QUANTITY, MIN_QUANTITY};
pub use snapshot::{Cart, OrderAttribute, PaymentMethod, ShippingMethod};
