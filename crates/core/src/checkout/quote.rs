//! Checkout quotes
//!
//! Quote derivation is a pure function of a cart snapshot and a policy.
//! Nothing here caches or stores; callers re-derive whenever the cart
//! changes.

use rusty_money::iso::Currency;

use crate::{
    cart::CartSnapshot,
    checkout::policy::CheckoutPolicy,
    prices::{PriceError, rate_of_minor},
};

/// Derived checkout amounts, all in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Sum of cart line totals
    pub subtotal: u64,

    /// Shipping charge under the policy
    pub shipping: u64,

    /// Tax on the subtotal
    pub tax: u64,

    /// Grand total
    pub total: u64,

    /// Display currency inherited from the policy
    pub currency: &'static Currency,
}

/// Derives a quote for the given cart snapshot under a policy.
///
/// An empty cart quotes to all zeros. A subtotal strictly above the free
/// shipping threshold ships free; a subtotal exactly at the threshold still
/// pays the flat fee.
///
/// # Errors
///
/// Returns a `PriceError` if the tax rate cannot be applied.
pub fn quote(snapshot: &CartSnapshot, policy: &CheckoutPolicy) -> Result<Quote, PriceError> {
    let subtotal = snapshot.subtotal;

    let shipping = if snapshot.is_empty() || subtotal > policy.free_shipping_threshold.minor() {
        0
    } else {
        policy.flat_shipping_fee.minor()
    };

    let tax = rate_of_minor(&policy.tax_rate, subtotal)?;
    let total = subtotal.saturating_add(shipping).saturating_add(tax);

    Ok(Quote {
        subtotal,
        shipping,
        tax,
        total,
        currency: policy.currency,
    })
}
