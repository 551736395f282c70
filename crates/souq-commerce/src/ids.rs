//! Newtype IDs for type-safe identifiers.
//!
//! The commerce API identifies everything by numeric id. Using newtypes
//! prevents accidentally mixing up different ID kinds, e.g. passing a
//! ProductId where a VariationId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs over the API's numeric ids.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique numeric identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from a raw number.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw numeric value.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

// Define all ID types
define_id!(ProductId);
define_id!(VariationId);
define_id!(AttributeId);
define_id!(AttributeValueId);
define_id!(CartId);
define_id!(CartItemId);
define_id!(AddressId);
define_id!(PaymentMethodId);
define_id!(OrderId);
