//! Checkout session.

use std::sync::Arc;

use tracing::info;
use vitrine::prelude::{
    CheckoutFlow, CheckoutFlowError, CheckoutPolicy, CheckoutStage, ExpiryCutoff, OrderPayload,
    PaymentForm, PriceError, Quote, ShippingForm, quote,
};

use crate::{
    cart::CartStore,
    checkout::CheckoutError,
    orders::{OrderConfirmation, OrdersApi},
};

/// Drives one checkout from shipping capture to a placed order.
///
/// The session owns the stage machine and the pricing policy; the cart stays
/// with its store and is only read here, except for the wipe after a placed
/// order.
pub struct CheckoutSession {
    flow: CheckoutFlow,
    policy: CheckoutPolicy,
    orders: Arc<dyn OrdersApi>,
}

impl CheckoutSession {
    /// Start a fresh checkout under the given policy.
    #[must_use]
    pub fn new(policy: CheckoutPolicy, orders: Arc<dyn OrdersApi>) -> Self {
        Self {
            flow: CheckoutFlow::new(),
            policy,
            orders,
        }
    }

    /// The current checkout stage.
    #[must_use]
    pub fn stage(&self) -> CheckoutStage {
        self.flow.stage()
    }

    /// The message from the last failed submission, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.flow.last_error()
    }

    /// Price the cart as it stands. Derived fresh on every call.
    ///
    /// # Errors
    ///
    /// Returns a `PriceError` if the tax rate cannot be applied.
    pub fn quote(&self, cart: &CartStore) -> Result<Quote, PriceError> {
        quote(&cart.snapshot(), &self.policy)
    }

    /// Validate and store the shipping form, advancing to payment capture.
    ///
    /// # Errors
    ///
    /// Returns the stage or field failures from the flow.
    pub fn submit_shipping(&mut self, form: ShippingForm) -> Result<(), CheckoutFlowError> {
        self.flow.submit_shipping(form)
    }

    /// Validate and store the payment form, advancing to review.
    ///
    /// Card expiry is checked against the current month.
    ///
    /// # Errors
    ///
    /// Returns the stage or field failures from the flow.
    pub fn submit_payment(&mut self, form: PaymentForm) -> Result<(), CheckoutFlowError> {
        self.flow.submit_payment(form, current_cutoff())
    }

    /// Return to shipping capture, keeping everything entered.
    ///
    /// # Errors
    ///
    /// Returns the flow's stage error.
    pub fn back_to_shipping(&mut self) -> Result<(), CheckoutFlowError> {
        self.flow.back_to_shipping()
    }

    /// Return to payment capture, keeping everything entered.
    ///
    /// # Errors
    ///
    /// Returns the flow's stage error.
    pub fn back_to_payment(&mut self) -> Result<(), CheckoutFlowError> {
        self.flow.back_to_payment()
    }

    /// Submit the order. This is the only asynchronous step in checkout.
    ///
    /// On success the flow completes and the cart is wiped. On failure the
    /// flow returns to review with the message surfaced via
    /// [`last_error`](Self::last_error); resubmitting is the shopper's call.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCart` before any transition when there is nothing to
    /// order, a flow error for a wrong stage or an in-flight submission, or
    /// the order collaborator's error after a failed submission.
    pub async fn submit_order(
        &mut self,
        cart: &mut CartStore,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let snapshot = cart.snapshot();

        if snapshot.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let quote = quote(&snapshot, &self.policy)?;
        let draft = self.flow.begin_submission()?;
        let payload = OrderPayload::assemble(draft, &snapshot, &quote);

        match self.orders.create_order(payload).await {
            Ok(confirmation) => {
                self.flow.complete()?;
                cart.clear();

                info!(order_id = %confirmation.order_id, total = quote.total, "order placed");

                Ok(confirmation)
            }
            Err(err) => {
                self.flow.fail(err.to_string())?;

                Err(CheckoutError::Orders(err))
            }
        }
    }
}

fn current_cutoff() -> ExpiryCutoff {
    let today = jiff::Zoned::now();

    ExpiryCutoff {
        year: u16::try_from(today.year()).unwrap_or(u16::MAX),
        month: u8::try_from(today.month()).unwrap_or(1),
    }
}
