//! Client-side cart cache.
//!
//! The server owns the cart; this store holds a read-through snapshot that
//! is replaced wholesale by every response carrying a cart. Mutations that
//! succeed without returning a cart fall back to a refetch, and "Cart Is
//! Empty" responses adopt the distinguished empty cart instead of erroring.

use std::sync::RwLock;

use tracing::debug;

use souq_api::{Outcome, StorefrontClient};
use souq_commerce::cart::{self, Cart};
use souq_commerce::catalog::Product;
use souq_commerce::ids::{CartItemId, VariationId};
use souq_commerce::CommerceError;

use crate::error::StoreError;

/// Server-authoritative cart snapshot with typed mutation operations.
pub struct CartStore {
    client: StorefrontClient,
    snapshot: RwLock<Option<Cart>>,
}

impl CartStore {
    /// Create an empty store; call [`CartStore::refresh`] to populate it.
    pub fn new(client: StorefrontClient) -> Self {
        Self {
            client,
            snapshot: RwLock::new(None),
        }
    }

    /// Current snapshot, if the cart has been loaded.
    pub fn snapshot(&self) -> Option<Cart> {
        self.read().clone()
    }

    /// Number of items per the last snapshot (0 before the first load).
    pub fn item_count(&self) -> i64 {
        self.read().as_ref().map(|c| c.cart_count).unwrap_or(0)
    }

    /// Refetch the authoritative cart from the server.
    pub async fn refresh(&self) -> Result<Cart, StoreError> {
        let cart = match self.client.my_cart().await? {
            Outcome::Ok(cart) => cart,
            // Both the error-shaped "Cart Is Empty" and a bare success
            // without data mean there is nothing in the cart.
            Outcome::Empty | Outcome::Missing => Cart::empty(),
        };
        Ok(self.adopt(cart))
    }

    /// Add a product to the cart.
    ///
    /// The purchasable unit is chosen in priority order: the product's
    /// `default_variation_id`, then the resolved variation, then the raw
    /// product id for non-configurable products. A configurable product
    /// with no resolved variation fails locally, before any network call.
    pub async fn add_item(
        &self,
        product: &Product,
        resolved: Option<VariationId>,
        qty: i64,
        note: &str,
    ) -> Result<Cart, StoreError> {
        cart::validate_quantity(qty)?;
        let item_id = match (product.default_variation_id, resolved) {
            (Some(default), _) => default.as_i64(),
            (None, Some(variation)) => variation.as_i64(),
            (None, None) if !product.requires_selection() => product.id.as_i64(),
            (None, None) => {
                return Err(CommerceError::IncompleteSelection(product.name.clone()).into());
            }
        };

        debug!(product = %product.id, item_id, qty, "adding to cart");
        let outcome = self.client.add_to_cart(item_id, qty, note).await?;
        self.adopt_or_refresh(outcome).await
    }

    /// Set the quantity of a cart item. Idempotent: if the snapshot already
    /// holds the requested quantity, no request is made.
    pub async fn update_quantity(&self, item_id: CartItemId, qty: i64) -> Result<Cart, StoreError> {
        cart::validate_quantity(qty)?;
        let cart_id = {
            let guard = self.read();
            let cart = guard.as_ref().ok_or_else(Self::not_loaded)?;
            if cart.item(item_id).is_some_and(|i| i.qty == qty) {
                debug!(%item_id, qty, "quantity unchanged, skipping request");
                return Ok(cart.clone());
            }
            cart.id
        };
        let outcome = self.client.update_quantity(cart_id, item_id, qty).await?;
        self.adopt_or_refresh(outcome).await
    }

    /// Remove an item from the cart.
    pub async fn remove_item(&self, item_id: CartItemId) -> Result<Cart, StoreError> {
        let cart_id = {
            let guard = self.read();
            guard.as_ref().ok_or_else(Self::not_loaded)?.id
        };
        let outcome = self.client.remove_item(cart_id, item_id).await?;
        self.adopt_or_refresh(outcome).await
    }

    /// Persist a shipping method and delivery address to the server cart
    /// and adopt the repriced snapshot.
    pub async fn apply_shipping(
        &self,
        shipping_method_slug: &str,
        address_id: souq_commerce::ids::AddressId,
    ) -> Result<Cart, StoreError> {
        let cart_id = {
            let guard = self.read();
            guard.as_ref().ok_or_else(Self::not_loaded)?.id
        };
        let outcome = self
            .client
            .set_cart_details(cart_id, shipping_method_slug, address_id)
            .await?;
        self.adopt_or_refresh(outcome).await
    }

    /// Drop the snapshot (logout, order placed).
    pub fn clear(&self) {
        *self.write() = None;
    }

    /// Adopt the cart from a mutation response, refetching when the server
    /// acknowledged without returning one.
    async fn adopt_or_refresh(&self, outcome: Outcome<Cart>) -> Result<Cart, StoreError> {
        match outcome {
            Outcome::Ok(cart) => Ok(self.adopt(cart)),
            Outcome::Empty => Ok(self.adopt(Cart::empty())),
            Outcome::Missing => self.refresh().await,
        }
    }

    fn adopt(&self, cart: Cart) -> Cart {
        *self.write() = Some(cart.clone());
        cart
    }

    fn not_loaded() -> StoreError {
        StoreError::Api(souq_api::ApiError::Validation(
            "Cart has not been loaded yet".to_string(),
        ))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Cart>> {
        self.snapshot.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Cart>> {
        self.snapshot.write().unwrap_or_else(|e| e.into_inner())
    }
}
