//! Checkout session over the core flow.

mod errors;
mod session;

pub use errors::CheckoutError;
pub use session::CheckoutSession;
