//! Checkout wizard state machine.
//!
//! Client-side state only, distinct from the server cart: it tracks which
//! checkout step is active and which address/shipping/payment choices have
//! been made. The server owns the actual order entity.

use crate::error::CommerceError;
use crate::ids::{AddressId, PaymentMethodId};
use serde::{Deserialize, Serialize};

/// The active checkout step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStatus {
    /// Choosing a shipping address.
    #[default]
    ShippingAddress,
    /// Choosing a shipping method.
    ShippingMethod,
    /// Choosing a payment method.
    Payment,
    /// Ready to place the order.
    PlaceOrder,
    /// Order placed. Terminal.
    Confirmed,
}

impl CheckoutStatus {
    /// Wire/status token for this step.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::ShippingAddress => "shippingAddress",
            CheckoutStatus::ShippingMethod => "shippingMethod",
            CheckoutStatus::Payment => "Payment",
            CheckoutStatus::PlaceOrder => "PlaceOrder",
            CheckoutStatus::Confirmed => "confirmed",
        }
    }

    /// Check if this is the terminal step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutStatus::Confirmed)
    }
}

/// The checkout wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutWizard {
    /// Selected shipping address.
    pub shipping_address_id: Option<AddressId>,
    /// Selected shipping method slug.
    pub shipping_method_slug: Option<String>,
    /// Selected payment method.
    pub payment_method_id: Option<PaymentMethodId>,
    /// Active step.
    pub status: CheckoutStatus,
}

impl CheckoutWizard {
    /// Start a fresh checkout at the shipping address step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a shipping address.
    pub fn select_address(&mut self, address: AddressId) {
        self.shipping_address_id = Some(address);
    }

    /// Select a shipping method.
    pub fn select_shipping_method(&mut self, slug: impl Into<String>) {
        self.shipping_method_slug = Some(slug.into());
    }

    /// Select a payment method.
    pub fn select_payment_method(&mut self, method: PaymentMethodId) {
        self.payment_method_id = Some(method);
    }

    /// Check whether the wizard may advance from the current step.
    pub fn can_advance(&self) -> bool {
        match self.status {
            CheckoutStatus::ShippingAddress => self.shipping_address_id.is_some(),
            CheckoutStatus::ShippingMethod => self.shipping_method_slug.is_some(),
            CheckoutStatus::Payment => self.payment_method_id.is_some(),
            CheckoutStatus::PlaceOrder => {
                self.shipping_address_id.is_some() && self.shipping_method_slug.is_some()
            }
            CheckoutStatus::Confirmed => false,
        }
    }

    /// Advance to the next step.
    ///
    /// Returns the missing requirement when a guard fails; the status is
    /// left unchanged so the caller can retry.
    pub fn advance(&mut self) -> Result<CheckoutStatus, CommerceError> {
        let next = match self.status {
            CheckoutStatus::ShippingAddress => {
                if self.shipping_address_id.is_none() {
                    return Err(CommerceError::MissingShippingAddress);
                }
                CheckoutStatus::ShippingMethod
            }
            CheckoutStatus::ShippingMethod => {
                if self.shipping_method_slug.is_none() {
                    return Err(CommerceError::MissingShippingMethod);
                }
                CheckoutStatus::Payment
            }
            CheckoutStatus::Payment => {
                if self.payment_method_id.is_none() {
                    return Err(CommerceError::MissingPaymentMethod);
                }
                CheckoutStatus::PlaceOrder
            }
            CheckoutStatus::PlaceOrder => {
                if self.shipping_address_id.is_none() {
                    return Err(CommerceError::MissingShippingAddress);
                }
                if self.shipping_method_slug.is_none() {
                    return Err(CommerceError::MissingShippingMethod);
                }
                CheckoutStatus::Confirmed
            }
            CheckoutStatus::Confirmed => return Err(CommerceError::CheckoutComplete),
        };
        self.status = next;
        Ok(next)
    }

    /// Skip payment-method selection.
    ///
    /// Only valid at the payment step, for carts with nothing left to pay.
    pub fn skip_payment(&mut self) -> Result<CheckoutStatus, CommerceError> {
        if self.status != CheckoutStatus::Payment {
            return Err(CommerceError::InvalidTransition {
                from: self.status.as_str().to_string(),
                to: CheckoutStatus::PlaceOrder.as_str().to_string(),
            });
        }
        self.status = CheckoutStatus::PlaceOrder;
        Ok(self.status)
    }

    /// Go back one step, clearing the choices made downstream of the step
    /// being returned to so a stale choice cannot survive an upstream change.
    pub fn go_back(&mut self) -> Result<CheckoutStatus, CommerceError> {
        let prev = match self.status {
            CheckoutStatus::ShippingAddress => {
                return Err(CommerceError::InvalidTransition {
                    from: self.status.as_str().to_string(),
                    to: "none".to_string(),
                })
            }
            CheckoutStatus::ShippingMethod => {
                self.shipping_method_slug = None;
                self.payment_method_id = None;
                CheckoutStatus::ShippingAddress
            }
            CheckoutStatus::Payment => {
                self.payment_method_id = None;
                CheckoutStatus::ShippingMethod
            }
            CheckoutStatus::PlaceOrder => {
                self.payment_method_id = None;
                CheckoutStatus::Payment
            }
            CheckoutStatus::Confirmed => return Err(CommerceError::CheckoutComplete),
        };
        self.status = prev;
        Ok(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_step() {
        let wizard = CheckoutWizard::new();
        assert_eq!(wizard.status, CheckoutStatus::ShippingAddress);
        assert!(!wizard.can_advance());
    }

    #[test]
    fn test_cannot_leave_address_step_without_address() {
        let mut wizard = CheckoutWizard::new();
        assert_eq!(
            wizard.advance(),
            Err(CommerceError::MissingShippingAddress)
        );
        assert_eq!(wizard.status, CheckoutStatus::ShippingAddress);

        wizard.select_address(AddressId::new(3));
        assert!(wizard.can_advance());
        assert_eq!(wizard.advance(), Ok(CheckoutStatus::ShippingMethod));
    }

    #[test]
    fn test_full_forward_path() {
        let mut wizard = CheckoutWizard::new();
        wizard.select_address(AddressId::new(1));
        wizard.advance().unwrap();

        wizard.select_shipping_method("express");
        wizard.advance().unwrap();
        assert_eq!(wizard.status, CheckoutStatus::Payment);

        wizard.select_payment_method(PaymentMethodId::new(2));
        wizard.advance().unwrap();
        assert_eq!(wizard.status, CheckoutStatus::PlaceOrder);

        wizard.advance().unwrap();
        assert_eq!(wizard.status, CheckoutStatus::Confirmed);
        assert!(wizard.status.is_terminal());
        assert_eq!(wizard.advance(), Err(CommerceError::CheckoutComplete));
    }

    #[test]
    fn test_skip_payment_for_zero_amount() {
        let mut wizard = CheckoutWizard::new();
        wizard.select_address(AddressId::new(1));
        wizard.advance().unwrap();
        wizard.select_shipping_method("standard");
        wizard.advance().unwrap();

        // No payment method selected.
        assert_eq!(wizard.advance(), Err(CommerceError::MissingPaymentMethod));
        assert_eq!(wizard.skip_payment(), Ok(CheckoutStatus::PlaceOrder));
    }

    #[test]
    fn test_skip_payment_invalid_elsewhere() {
        let mut wizard = CheckoutWizard::new();
        assert!(wizard.skip_payment().is_err());
        assert_eq!(wizard.status, CheckoutStatus::ShippingAddress);
    }

    #[test]
    fn test_go_back_clears_downstream_choices() {
        let mut wizard = CheckoutWizard::new();
        wizard.select_address(AddressId::new(1));
        wizard.advance().unwrap();
        wizard.select_shipping_method("express");
        wizard.advance().unwrap();
        wizard.select_payment_method(PaymentMethodId::new(9));

        // Back to shipping method: payment choice must not survive.
        wizard.go_back().unwrap();
        assert_eq!(wizard.status, CheckoutStatus::ShippingMethod);
        assert!(wizard.payment_method_id.is_none());
        assert_eq!(wizard.shipping_method_slug.as_deref(), Some("express"));

        // Back to address: shipping method must not survive either.
        wizard.go_back().unwrap();
        assert_eq!(wizard.status, CheckoutStatus::ShippingAddress);
        assert!(wizard.shipping_method_slug.is_none());
        assert_eq!(wizard.shipping_address_id, Some(AddressId::new(1)));
    }

    #[test]
    fn test_go_back_from_first_step_fails() {
        let mut wizard = CheckoutWizard::new();
        assert!(wizard.go_back().is_err());
    }

    #[test]
    fn test_status_tokens() {
        assert_eq!(CheckoutStatus::ShippingAddress.as_str(), "shippingAddress");
        assert_eq!(CheckoutStatus::ShippingMethod.as_str(), "shippingMethod");
        assert_eq!(CheckoutStatus::Payment.as_str(), "Payment");
        assert_eq!(CheckoutStatus::PlaceOrder.as_str(), "PlaceOrder");
    }
}
