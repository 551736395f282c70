//! HTTP client for the commerce API.
//!
//! Wraps `reqwest` with the storefront's conventions: bearer token and
//! locale headers on every call, envelope normalization at the response
//! boundary, and the global session interceptor (HTTP 401 or an
//! "Unauthenticated" message clears the session and records the login
//! redirect before the error is surfaced).

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use souq_commerce::cart::Cart;
use souq_commerce::catalog::{Selection, Variation};
use souq_commerce::ids::{AddressId, CartId, CartItemId, ProductId};

use crate::config::ApiConfig;
use crate::envelope::{self, Envelope, Outcome};
use crate::error::ApiError;
use crate::requests::{
    AddToCartRequest, AuthData, CartDetailsRequest, OrderMessage, RemoveItemRequest,
    ResolveVariationRequest, UpdateQuantityRequest,
};
use crate::session::Session;

/// Whether an endpoint requires an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Required,
    None,
}

/// Client for the storefront commerce API.
///
/// Cheap to clone; all clones share the same session handle.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: reqwest::Client,
    base_url: String,
    locale: String,
    session: Session,
}

impl StorefrontClient {
    /// Create a client from configuration and a shared session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            locale: config.locale.clone(),
            session,
        })
    }

    /// The session this client reports to.
    pub fn session(&self) -> &Session {
        &self.session
    }

    // === Endpoints ===

    /// Resolve the purchasable variation for a complete attribute selection.
    ///
    /// `POST /catalog/products/get-variation-by-attribute`
    pub async fn resolve_variation(
        &self,
        product_id: ProductId,
        selection: &Selection,
    ) -> Result<Outcome<Variation>, ApiError> {
        let body = ResolveVariationRequest::new(product_id, selection);
        let envelope = self
            .post("/catalog/products/get-variation-by-attribute", &body, Auth::Required)
            .await?;
        envelope::decode(envelope, "get-variation-by-attribute")
    }

    /// Add an item to the cart. `item_id` is a variation id for
    /// configurable products and the raw product id otherwise.
    ///
    /// `POST /marketplace/cart/add-to-cart`
    pub async fn add_to_cart(
        &self,
        item_id: i64,
        qty: i64,
        customer_note: &str,
    ) -> Result<Outcome<Cart>, ApiError> {
        let body = AddToCartRequest::new(item_id, qty, customer_note);
        let envelope = self
            .post("/marketplace/cart/add-to-cart", &body, Auth::Required)
            .await?;
        envelope::decode(envelope, "add-to-cart")
    }

    /// Change the quantity of a cart item.
    ///
    /// `POST /marketplace/cart/update-quantity-cart`
    pub async fn update_quantity(
        &self,
        order_id: CartId,
        cart_item_id: CartItemId,
        qty: i64,
    ) -> Result<Outcome<Cart>, ApiError> {
        let body = UpdateQuantityRequest {
            order_id,
            cart_item_id,
            qty,
        };
        let envelope = self
            .post("/marketplace/cart/update-quantity-cart", &body, Auth::Required)
            .await?;
        envelope::decode(envelope, "update-quantity-cart")
    }

    /// Remove an item from the cart.
    ///
    /// `POST /marketplace/cart/delete-item-from-cart`
    pub async fn remove_item(
        &self,
        order_id: CartId,
        cart_item_id: CartItemId,
    ) -> Result<Outcome<Cart>, ApiError> {
        let body = RemoveItemRequest::new(order_id, cart_item_id);
        let envelope = self
            .post("/marketplace/cart/delete-item-from-cart", &body, Auth::Required)
            .await?;
        envelope::decode(envelope, "delete-item-from-cart")
    }

    /// Fetch the authoritative cart. "Cart Is Empty" responses normalize
    /// to [`Outcome::Empty`].
    ///
    /// `GET /marketplace/cart/my-cart`
    pub async fn my_cart(&self) -> Result<Outcome<Cart>, ApiError> {
        let envelope = self.get("/marketplace/cart/my-cart", Auth::Required).await?;
        envelope::decode(envelope, "my-cart")
    }

    /// Persist the shipping method and address to the server cart. The
    /// returned cart reflects the shipping cost.
    ///
    /// `POST /marketplace/cart/cart-details/{cartId}`
    pub async fn set_cart_details(
        &self,
        cart_id: CartId,
        shipping_method_slug: &str,
        user_address_id: AddressId,
    ) -> Result<Outcome<Cart>, ApiError> {
        let body = CartDetailsRequest {
            shipping_method_slug: shipping_method_slug.to_string(),
            user_address_id,
        };
        let path = format!("/marketplace/cart/cart-details/{cart_id}");
        let envelope = self.post(&path, &body, Auth::Required).await?;
        envelope::decode(envelope, "cart-details")
    }

    /// Convert a fully-paid cart directly into an order.
    ///
    /// `POST /order/orders/change-cart-to-order/{cartId}`
    pub async fn change_cart_to_order(
        &self,
        cart_id: CartId,
    ) -> Result<Outcome<OrderMessage>, ApiError> {
        let path = format!("/order/orders/change-cart-to-order/{cart_id}");
        let envelope = self
            .post(&path, &serde_json::json!({}), Auth::Required)
            .await?;
        envelope::decode(envelope, "change-cart-to-order")
    }

    /// Confirm a cash-on-delivery order.
    ///
    /// `GET /payment/cash-on-delivery/{cartId}`
    pub async fn cash_on_delivery(
        &self,
        cart_id: CartId,
    ) -> Result<Outcome<OrderMessage>, ApiError> {
        let path = format!("/payment/cash-on-delivery/{cart_id}");
        let envelope = self.get(&path, Auth::Required).await?;
        envelope::decode(envelope, "cash-on-delivery")
    }

    /// Verify an OTP code, logging in or completing a registration.
    ///
    /// `POST /auth/login-or-register`
    pub async fn login_or_register(
        &self,
        payload: &serde_json::Value,
    ) -> Result<Outcome<AuthData>, ApiError> {
        let envelope = self
            .post("/auth/login-or-register", payload, Auth::None)
            .await?;
        envelope::decode(envelope, "login-or-register")
    }

    // === Transport ===

    async fn get(&self, path: &str, auth: Auth) -> Result<Envelope, ApiError> {
        let request = self.http.get(self.url(path));
        self.send(request, path, auth).await
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<Envelope, ApiError> {
        let request = self.http.post(self.url(path)).json(body);
        self.send(request, path, auth).await
    }

    async fn send(
        &self,
        mut request: reqwest::RequestBuilder,
        path: &str,
        auth: Auth,
    ) -> Result<Envelope, ApiError> {
        request = request.header("Accept-Language", &self.locale);
        match (auth, self.session.token()) {
            (_, Some(token)) => request = request.bearer_auth(token),
            (Auth::Required, None) => {
                // No network call: the user has to log in first.
                self.session.require_login();
                return Err(ApiError::Validation(
                    "Please login first".to_string(),
                ));
            }
            (Auth::None, None) => {}
        }

        debug!(path, "sending request");
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            info!(path, "session expired, forcing login redirect");
            self.session.expire();
            return Err(ApiError::SessionExpired);
        }

        let bytes = response.bytes().await?;
        let envelope: Envelope = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(source) => {
                if !status.is_success() {
                    return Err(ApiError::Http {
                        status: status.as_u16(),
                        message: String::from_utf8_lossy(&bytes).into_owned(),
                    });
                }
                return Err(ApiError::Deserialize {
                    context: path.to_string(),
                    source,
                });
            }
        };

        if envelope.is_unauthenticated() {
            info!(path, "unauthenticated response, forcing login redirect");
            self.session.expire();
            return Err(ApiError::SessionExpired);
        }
        if !envelope.status {
            warn!(path, message = envelope.message.as_deref(), "api rejection");
        }
        Ok(envelope)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
