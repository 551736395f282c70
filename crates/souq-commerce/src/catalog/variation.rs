//! Resolved purchasable variations.

use crate::ids::VariationId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A concrete purchasable unit of a configurable product.
///
/// Only exists as the output of a successful resolution of a complete
/// [`Selection`](crate::catalog::Selection); it is invalidated whenever the
/// selection or the product changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    /// Unique variation identifier.
    pub id: VariationId,
    /// Display name (e.g. "XL / Blue").
    #[serde(default)]
    pub name: Option<String>,
    /// Price before any discount.
    // The backend spells this field "price_befor_discount" on the wire.
    #[serde(
        default,
        alias = "price_befor_discount",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_before_discount: Option<Decimal>,
    /// Price after discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_after_discount: Option<Decimal>,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
}

impl Variation {
    /// Check whether the variation can currently be purchased.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Effective unit price shown to the customer.
    pub fn display_price(&self) -> Option<Decimal> {
        self.price_after_discount.or(self.price_before_discount)
    }
}
