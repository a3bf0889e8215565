//! Checkout flow
//!
//! The staged state machine between "cart is ready" and "order placed":
//! shipping capture, payment capture, review, a single in-flight submission,
//! then completion. Moving backwards never discards what the shopper has
//! already entered, and a submission can only be started from review.

use thiserror::Error;

use crate::{
    checkout::forms::{ExpiryCutoff, FieldErrors, PaymentForm, ShippingForm},
    order::{Customer, PaymentMethod, ShippingAddress},
};

/// Stages of the checkout flow, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// Capturing the shipping form
    CollectingShipping,

    /// Capturing the payment form
    CollectingPayment,

    /// Shopper reviews the order before submitting
    ReviewingOrder,

    /// A submission is in flight; no further submissions are allowed
    Submitting,

    /// The order was placed; terminal
    Complete,
}

/// Errors raised by flow transitions.
#[derive(Debug, Error)]
pub enum CheckoutFlowError {
    /// The requested step is not available in the current stage.
    #[error("step not available while {0:?}")]
    WrongStage(CheckoutStage),

    /// The entered data failed validation.
    #[error(transparent)]
    Invalid(#[from] FieldErrors),

    /// A submission is already in flight.
    #[error("an order submission is already in progress")]
    SubmissionInFlight,

    /// Review was reached without both forms captured.
    #[error("shipping and payment details are incomplete")]
    IncompleteForms,
}

/// Everything the flow has captured, assembled for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    /// Who is ordering
    pub customer: Customer,

    /// Where the order ships
    pub address: ShippingAddress,

    /// Redacted payment selection
    pub payment: PaymentMethod,
}

/// The checkout state machine.
///
/// Holds the current stage plus the forms entered so far. Forms survive
/// backward transitions and failed submissions; only a brand new flow starts
/// blank.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
    shipping: Option<ShippingForm>,
    payment: Option<PaymentForm>,
    last_error: Option<String>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        CheckoutFlow::new()
    }
}

impl CheckoutFlow {
    /// Starts a fresh flow at shipping capture.
    #[must_use]
    pub fn new() -> Self {
        CheckoutFlow {
            stage: CheckoutStage::CollectingShipping,
            shipping: None,
            payment: None,
            last_error: None,
        }
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// The shipping form captured so far, if any.
    #[must_use]
    pub fn shipping(&self) -> Option<&ShippingForm> {
        self.shipping.as_ref()
    }

    /// The payment form captured so far, if any.
    #[must_use]
    pub fn payment(&self) -> Option<&PaymentForm> {
        self.payment.as_ref()
    }

    /// The message from the most recent failed submission, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Validates and stores the shipping form, advancing to payment capture.
    ///
    /// # Errors
    ///
    /// Returns `WrongStage` outside shipping capture, or the field failures
    /// if validation rejects the form. The stage does not change on failure.
    pub fn submit_shipping(&mut self, form: ShippingForm) -> Result<(), CheckoutFlowError> {
        if self.stage != CheckoutStage::CollectingShipping {
            return Err(CheckoutFlowError::WrongStage(self.stage));
        }

        form.validate()?;

        self.shipping = Some(form);
        self.stage = CheckoutStage::CollectingPayment;

        Ok(())
    }

    /// Validates and stores the payment form, advancing to review.
    ///
    /// # Errors
    ///
    /// Returns `WrongStage` outside payment capture, or the field failures
    /// if validation rejects the form. The stage does not change on failure.
    pub fn submit_payment(
        &mut self,
        form: PaymentForm,
        cutoff: ExpiryCutoff,
    ) -> Result<(), CheckoutFlowError> {
        if self.stage != CheckoutStage::CollectingPayment {
            return Err(CheckoutFlowError::WrongStage(self.stage));
        }

        form.validate(cutoff)?;

        self.payment = Some(form);
        self.stage = CheckoutStage::ReviewingOrder;

        Ok(())
    }

    /// Returns to shipping capture. Entered forms are kept.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionInFlight` while submitting, or `WrongStage` when
    /// there is nothing to go back from.
    pub fn back_to_shipping(&mut self) -> Result<(), CheckoutFlowError> {
        match self.stage {
            CheckoutStage::CollectingPayment | CheckoutStage::ReviewingOrder => {
                self.stage = CheckoutStage::CollectingShipping;
                Ok(())
            }
            CheckoutStage::Submitting => Err(CheckoutFlowError::SubmissionInFlight),
            stage => Err(CheckoutFlowError::WrongStage(stage)),
        }
    }

    /// Returns from review to payment capture. Entered forms are kept.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionInFlight` while submitting, or `WrongStage`
    /// outside review.
    pub fn back_to_payment(&mut self) -> Result<(), CheckoutFlowError> {
        match self.stage {
            CheckoutStage::ReviewingOrder => {
                self.stage = CheckoutStage::CollectingPayment;
                Ok(())
            }
            CheckoutStage::Submitting => Err(CheckoutFlowError::SubmissionInFlight),
            stage => Err(CheckoutFlowError::WrongStage(stage)),
        }
    }

    /// Starts a submission, handing back the assembled draft.
    ///
    /// Only available from review; a second call while one submission is in
    /// flight is rejected, which is what makes double submission impossible.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionInFlight` while submitting, `WrongStage` outside
    /// review, or `IncompleteForms` if either form is missing.
    pub fn begin_submission(&mut self) -> Result<OrderDraft, CheckoutFlowError> {
        match self.stage {
            CheckoutStage::Submitting => Err(CheckoutFlowError::SubmissionInFlight),
            CheckoutStage::ReviewingOrder => {
                let Some(shipping) = self.shipping.as_ref() else {
                    return Err(CheckoutFlowError::IncompleteForms);
                };
                let Some(payment) = self.payment.as_ref() else {
                    return Err(CheckoutFlowError::IncompleteForms);
                };

                let draft = OrderDraft {
                    customer: Customer {
                        full_name: shipping.full_name.clone(),
                        email: shipping.email.clone(),
                        phone: shipping.phone.clone(),
                    },
                    address: ShippingAddress {
                        address_line: shipping.address_line.clone(),
                        city: shipping.city.clone(),
                        postal_code: shipping.postal_code.clone(),
                        country: shipping.country.clone(),
                    },
                    payment: PaymentMethod::from(payment),
                };

                self.stage = CheckoutStage::Submitting;
                self.last_error = None;

                Ok(draft)
            }
            stage => Err(CheckoutFlowError::WrongStage(stage)),
        }
    }

    /// Marks the in-flight submission as placed. Terminal.
    ///
    /// # Errors
    ///
    /// Returns `WrongStage` unless a submission is in flight.
    pub fn complete(&mut self) -> Result<(), CheckoutFlowError> {
        if self.stage != CheckoutStage::Submitting {
            return Err(CheckoutFlowError::WrongStage(self.stage));
        }

        self.stage = CheckoutStage::Complete;

        Ok(())
    }

    /// Returns the failed submission to review, keeping the forms and
    /// surfacing the message. Resubmission is up to the shopper; nothing
    /// retries automatically.
    ///
    /// # Errors
    ///
    /// Returns `WrongStage` unless a submission is in flight.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), CheckoutFlowError> {
        if self.stage != CheckoutStage::Submitting {
            return Err(CheckoutFlowError::WrongStage(self.stage));
        }

        self.last_error = Some(message.into());
        self.stage = CheckoutStage::ReviewingOrder;

        Ok(())
    }
}
