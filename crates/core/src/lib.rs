//! Vitrine
//!
//! Vitrine is a client-side storefront core: a cart engine with derived
//! totals, a pure checkout pricing calculator and a staged checkout flow,
//! with typed records at every external boundary.

pub mod cart;
pub mod checkout;
pub mod fixtures;
pub mod order;
pub mod prelude;
pub mod prices;
pub mod products;
pub mod validate;
