//! Typed request bodies and auxiliary response payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use souq_commerce::catalog::Selection;
use souq_commerce::ids::{AddressId, CartId, CartItemId, ProductId};
use std::collections::BTreeMap;

/// Body for `POST /catalog/products/get-variation-by-attribute`.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveVariationRequest {
    pub product_id: ProductId,
    /// Map of attribute id to chosen value id, keyed by the attribute id's
    /// decimal string (the backend expects a JSON object).
    pub attributes: BTreeMap<String, i64>,
}

impl ResolveVariationRequest {
    /// Build the request from a complete selection.
    pub fn new(product_id: ProductId, selection: &Selection) -> Self {
        Self {
            product_id,
            attributes: selection
                .iter()
                .map(|(attr, value)| (attr.to_string(), value.as_i64()))
                .collect(),
        }
    }
}

/// Body for `POST /marketplace/cart/add-to-cart`.
#[derive(Debug, Clone, Serialize)]
pub struct AddToCartRequest {
    /// Variation id for configurable products, raw product id otherwise.
    pub item_id: i64,
    pub qty: i64,
    pub customer_note: String,
    #[serde(rename = "type")]
    pub item_type: &'static str,
}

impl AddToCartRequest {
    pub fn new(item_id: i64, qty: i64, customer_note: impl Into<String>) -> Self {
        Self {
            item_id,
            qty,
            customer_note: customer_note.into(),
            item_type: "product",
        }
    }
}

/// Body for `POST /marketplace/cart/update-quantity-cart`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateQuantityRequest {
    pub order_id: CartId,
    pub cart_item_id: CartItemId,
    pub qty: i64,
}

/// Body for `POST /marketplace/cart/delete-item-from-cart`.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveItemRequest {
    pub order_id: CartId,
    pub cart_item_id: CartItemId,
    #[serde(rename = "type")]
    pub item_type: &'static str,
}

impl RemoveItemRequest {
    pub fn new(order_id: CartId, cart_item_id: CartItemId) -> Self {
        Self {
            order_id,
            cart_item_id,
            item_type: "product",
        }
    }
}

/// Body for `POST /marketplace/cart/cart-details/{cartId}`.
#[derive(Debug, Clone, Serialize)]
pub struct CartDetailsRequest {
    pub shipping_method_slug: String,
    pub user_address_id: AddressId,
}

/// Build the body for `POST /auth/login-or-register`.
///
/// When registration data is staged (complete-registration flow) the OTP
/// code is merged into the draft; otherwise a plain phone login payload is
/// built.
pub fn login_payload(registration_draft: Option<Value>, phone: &str, otp_code: &str) -> Value {
    match registration_draft {
        Some(Value::Object(mut draft)) => {
            draft.insert("otp_code".to_string(), Value::String(otp_code.to_string()));
            Value::Object(draft)
        }
        _ => serde_json::json!({
            "phone": phone,
            "otp_code": otp_code,
        }),
    }
}

/// Payload of a successful `login-or-register` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthData {
    /// Bearer token. Absent tokens are treated as a failed verification.
    #[serde(default)]
    pub token: Option<String>,
    /// The logged-in user object, passed through as-is.
    #[serde(default)]
    pub user: Option<Value>,
}

/// Payload of the order finalization endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderMessage {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use souq_commerce::ids::{AttributeId, AttributeValueId};

    #[test]
    fn test_resolve_request_shape() {
        let mut selection = Selection::new();
        selection.set(AttributeId::new(1), AttributeValueId::new(11));
        selection.set(AttributeId::new(2), AttributeValueId::new(22));

        let request = ResolveVariationRequest::new(ProductId::new(5), &selection);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "product_id": 5,
                "attributes": {"1": 11, "2": 22},
            })
        );
    }

    #[test]
    fn test_add_to_cart_shape() {
        let body = serde_json::to_value(AddToCartRequest::new(9, 1, "")).unwrap();
        assert_eq!(
            body,
            json!({"item_id": 9, "qty": 1, "customer_note": "", "type": "product"})
        );
    }

    #[test]
    fn test_login_payload_prefers_registration_draft() {
        let draft = json!({"phone": "0500000000", "first_name": "A"});
        let body = login_payload(Some(draft), "ignored", "12345");
        assert_eq!(
            body,
            json!({"phone": "0500000000", "first_name": "A", "otp_code": "12345"})
        );
    }

    #[test]
    fn test_login_payload_phone_fallback() {
        let body = login_payload(None, "0511111111", "54321");
        assert_eq!(body, json!({"phone": "0511111111", "otp_code": "54321"}));
    }
}
