//! Checkout session errors.

use thiserror::Error;
use vitrine::prelude::{CheckoutFlowError, PriceError};

use crate::orders::OrdersError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout requires at least one item in the cart.
    #[error("your cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Flow(#[from] CheckoutFlowError),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Orders(#[from] OrdersError),
}
