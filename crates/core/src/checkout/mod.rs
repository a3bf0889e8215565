//! Checkout
//!
//! Everything between a filled cart and a placed order: the pricing policy,
//! pure quote derivation, the capture forms and the staged flow.

pub mod flow;
pub mod forms;
pub mod policy;
pub mod quote;

pub use flow::{CheckoutFlow, CheckoutFlowError, CheckoutStage, OrderDraft};
pub use forms::{CardDetails, ExpiryCutoff, FieldError, FieldErrors, PaymentForm, ShippingForm};
pub use policy::{CheckoutPolicy, PolicyError, parse_percentage};
pub use quote::{Quote, quote};
