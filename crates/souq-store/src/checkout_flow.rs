//! Checkout orchestration.
//!
//! Drives the [`CheckoutWizard`] step machine and performs the server
//! calls each transition requires. Every async transition validates the
//! wizard guard first and advances the step only after the server call
//! succeeds, so a failed call always leaves the wizard where it was.

use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use souq_api::{ApiError, Outcome, StorefrontClient};
use souq_commerce::cart::Cart;
use souq_commerce::checkout::{CheckoutStatus, CheckoutWizard};
use souq_commerce::ids::{AddressId, CartId, PaymentMethodId};
use souq_commerce::CommerceError;

use crate::cart_store::CartStore;
use crate::error::StoreError;

/// Result of a successfully placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// The cart that became the order.
    pub cart_id: CartId,
    /// Server confirmation message, when provided.
    pub message: Option<String>,
    /// Route the UI should navigate to.
    pub redirect: String,
}

/// Orchestrates the checkout steps against the cart store and the API.
pub struct CheckoutFlow {
    client: StorefrontClient,
    cart: Arc<CartStore>,
    wizard: RwLock<CheckoutWizard>,
}

impl CheckoutFlow {
    /// Start a checkout over the given cart.
    pub fn new(client: StorefrontClient, cart: Arc<CartStore>) -> Self {
        Self {
            client,
            cart,
            wizard: RwLock::new(CheckoutWizard::new()),
        }
    }

    /// Current wizard state.
    pub fn wizard(&self) -> CheckoutWizard {
        self.read().clone()
    }

    /// Active checkout step.
    pub fn status(&self) -> CheckoutStatus {
        self.read().status
    }

    /// Choose the shipping address for the current checkout.
    pub fn select_address(&self, address: AddressId) {
        self.write().select_address(address);
    }

    /// Choose a shipping method (not yet persisted to the server).
    pub fn select_shipping_method(&self, slug: impl Into<String>) {
        self.write().select_shipping_method(slug);
    }

    /// Choose a payment method.
    pub fn select_payment_method(&self, method: PaymentMethodId) {
        self.write().select_payment_method(method);
    }

    /// Leave the address step. Purely local: the address is persisted
    /// together with the shipping method at the next step.
    pub fn proceed_to_shipping_method(&self) -> Result<CheckoutStatus, StoreError> {
        let mut wizard = self.write();
        if wizard.status != CheckoutStatus::ShippingAddress {
            return Err(Self::wrong_step(&wizard, CheckoutStatus::ShippingMethod));
        }
        Ok(wizard.advance()?)
    }

    /// Persist the chosen shipping method and address to the server cart,
    /// then advance to the payment step.
    ///
    /// The repriced cart (shipping cost applied) is adopted by the cart
    /// store. On failure the wizard stays at the shipping method step.
    pub async fn confirm_shipping_method(&self) -> Result<Cart, StoreError> {
        let (slug, address) = {
            let wizard = self.read();
            if wizard.status != CheckoutStatus::ShippingMethod {
                return Err(Self::wrong_step(&wizard, CheckoutStatus::Payment));
            }
            let slug = wizard
                .shipping_method_slug
                .clone()
                .ok_or(CommerceError::MissingShippingMethod)?;
            let address = wizard
                .shipping_address_id
                .ok_or(CommerceError::MissingShippingAddress)?;
            (slug, address)
        };

        let cart = self.cart.apply_shipping(&slug, address).await?;
        self.write().advance()?;
        Ok(cart)
    }

    /// Leave the payment step with a payment method selected.
    pub fn confirm_payment_method(&self) -> Result<CheckoutStatus, StoreError> {
        let mut wizard = self.write();
        if wizard.status != CheckoutStatus::Payment {
            return Err(Self::wrong_step(&wizard, CheckoutStatus::PlaceOrder));
        }
        Ok(wizard.advance()?)
    }

    /// Skip payment-method selection. Only allowed when the cart has
    /// nothing left to pay.
    pub fn skip_payment(&self) -> Result<CheckoutStatus, StoreError> {
        let skippable = self
            .cart
            .snapshot()
            .is_some_and(|c| c.can_skip_payment());
        if !skippable {
            return Err(CommerceError::MissingPaymentMethod.into());
        }
        Ok(self.write().skip_payment()?)
    }

    /// Go back one step, discarding downstream choices.
    pub fn go_back(&self) -> Result<CheckoutStatus, StoreError> {
        Ok(self.write().go_back()?)
    }

    /// Place the order.
    ///
    /// A cart with nothing left to pay converts directly into an order;
    /// anything else confirms as cash on delivery. Exactly one of the two
    /// endpoints is called. On success the wizard reaches its terminal
    /// step and the cart cache is dropped; on failure the wizard stays at
    /// the place-order step.
    pub async fn place_order(&self) -> Result<OrderConfirmation, StoreError> {
        let cart = {
            let wizard = self.read();
            if wizard.status != CheckoutStatus::PlaceOrder {
                return Err(Self::wrong_step(&wizard, CheckoutStatus::Confirmed));
            }
            self.cart.snapshot().ok_or_else(|| {
                StoreError::Api(ApiError::Validation(
                    "Cart has not been loaded yet".to_string(),
                ))
            })?
        };

        let outcome = if cart.can_skip_payment() {
            info!(cart_id = %cart.id, "placing fully-paid order");
            self.client.change_cart_to_order(cart.id).await
        } else {
            info!(cart_id = %cart.id, "confirming cash-on-delivery order");
            self.client.cash_on_delivery(cart.id).await
        };
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(cart_id = %cart.id, error = %e, "order placement failed");
                return Err(e.into());
            }
        };

        let message = match outcome {
            Outcome::Ok(m) => m.message,
            Outcome::Missing | Outcome::Empty => None,
        };
        self.write().advance()?;
        self.cart.clear();
        Ok(OrderConfirmation {
            cart_id: cart.id,
            message,
            redirect: format!("/checkoutConfirmation?orderId={}", cart.id),
        })
    }

    fn wrong_step(wizard: &CheckoutWizard, to: CheckoutStatus) -> StoreError {
        CommerceError::InvalidTransition {
            from: wizard.status.as_str().to_string(),
            to: to.as_str().to_string(),
        }
        .into()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CheckoutWizard> {
        self.wizard.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CheckoutWizard> {
        self.wizard.write().unwrap_or_else(|e| e.into_inner())
    }
}
