//! Vitrine prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AddOutcome, Cart, CartSnapshot, LineItem, QuantityOutcome},
    checkout::{
        CardDetails, CheckoutFlow, CheckoutFlowError, CheckoutPolicy, CheckoutStage, ExpiryCutoff,
        FieldError, FieldErrors, OrderDraft, PaymentForm, PolicyError, Quote, ShippingForm,
        parse_percentage, quote,
    },
    fixtures::{FixtureError, load_products, load_products_str, sample_products},
    order::{
        Customer, ORDER_SCHEMA_VERSION, OrderLine, OrderPayload, PaymentMethod, ShippingAddress,
    },
    prices::{Price, PriceError, format_minor, rate_of_minor},
    products::{Product, ProductId},
};
