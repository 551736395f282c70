//! Cart line items.

use crate::error::CommerceError;
use crate::ids::CartItemId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minimum quantity per cart item.
pub const MIN_QUANTITY: i64 = 1;

/// Maximum quantity per cart item.
pub const MAX_QUANTITY: i64 = 10;

/// Validate a requested quantity against the per-item range.
pub fn validate_quantity(qty: i64) -> Result<(), CommerceError> {
    if (MIN_QUANTITY..=MAX_QUANTITY).contains(&qty) {
        Ok(())
    } else {
        Err(CommerceError::InvalidQuantity(qty, MIN_QUANTITY, MAX_QUANTITY))
    }
}

/// An item in the server cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique cart item identifier.
    pub id: CartItemId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Product image URL.
    #[serde(default)]
    pub image: String,
    /// Variation description string (encodes size/color, e.g. "XL / Blue").
    #[serde(default)]
    pub variation: String,
    /// Quantity.
    pub qty: i64,
    /// Unit price.
    pub price: Decimal,
}

impl CartItem {
    /// Split the variation description into its parts.
    ///
    /// The backend encodes variation values joined by " / "; an empty
    /// description yields no parts.
    pub fn variation_parts(&self) -> Vec<&str> {
        if self.variation.is_empty() {
            Vec::new()
        } else {
            self.variation.split(" / ").collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_range() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(11).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_variation_parts() {
        let item = CartItem {
            id: CartItemId::new(1),
            name: "Shirt".to_string(),
            image: String::new(),
            variation: "XL / Blue".to_string(),
            qty: 1,
            price: Decimal::ZERO,
        };
        assert_eq!(item.variation_parts(), vec!["XL", "Blue"]);

        let plain = CartItem {
            variation: String::new(),
            ..item
        };
        assert!(plain.variation_parts().is_empty());
    }
}
