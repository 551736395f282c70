//! The authoritative cart snapshot returned by the server.

use crate::cart::CartItem;
use crate::ids::{CartId, PaymentMethodId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A shipping method the cart is eligible for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    /// Slug used when persisting the choice to the cart.
    pub slug: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Shipping cost.
    #[serde(default)]
    pub price: Decimal,
}

/// A payment method the cart is eligible for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Unique payment method identifier.
    pub id: PaymentMethodId,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// A fee or discount line item applied to the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAttribute {
    /// Display label (e.g. "Shipping fee").
    #[serde(alias = "name")]
    pub label: String,
    /// Signed amount.
    pub amount: Decimal,
}

/// The server-owned cart.
///
/// Owned exclusively by the server; the client holds a read-through cache
/// replaced on every mutation response. [`Cart::empty`] is the distinguished
/// empty value the client synthesizes when the server reports "Cart Is
/// Empty" through an error-shaped response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Server-side cart status token.
    #[serde(default)]
    pub status: String,
    /// Sum of line totals before fees and tax.
    #[serde(default)]
    pub sub_total: Decimal,
    /// VAT amount.
    #[serde(default)]
    pub vat_amount: Decimal,
    /// Grand total.
    #[serde(default)]
    pub total_amount: Decimal,
    /// Amount the customer still has to pay at checkout.
    #[serde(default)]
    pub amount_to_pay: Decimal,
    /// Total item count.
    #[serde(default)]
    pub cart_count: i64,
    /// Items in the cart. The backend calls these "products".
    #[serde(rename = "products", default)]
    pub items: Vec<CartItem>,
    /// Shipping methods this cart is eligible for.
    #[serde(default)]
    pub shipping_methods: Vec<ShippingMethod>,
    /// Payment methods this cart is eligible for.
    #[serde(default)]
    pub allowed_payment_methods: Vec<PaymentMethod>,
    /// Fee/discount line items.
    #[serde(default)]
    pub order_attributes: Vec<OrderAttribute>,
    /// Applied voucher code, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voucher: Option<String>,
}

impl Cart {
    /// The distinguished empty cart (all totals zero, no items).
    pub fn empty() -> Self {
        Self {
            id: CartId::new(0),
            status: String::new(),
            sub_total: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            amount_to_pay: Decimal::ZERO,
            cart_count: 0,
            items: Vec::new(),
            shipping_methods: Vec::new(),
            allowed_payment_methods: Vec::new(),
            order_attributes: Vec::new(),
            voucher: None,
        }
    }

    /// Check whether the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Nothing left to pay: the order may bypass payment-method selection
    /// and go straight to placement.
    pub fn can_skip_payment(&self) -> bool {
        self.amount_to_pay.is_zero()
    }

    /// Look up an item by its cart item id.
    pub fn item(&self, id: crate::ids::CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::empty()
    }
}
