//! Checkout policy
//!
//! The pricing constants quotes are derived under: free shipping threshold,
//! flat shipping fee and tax rate. The policy is injected wherever quotes
//! are derived, so alternative configurations are testable without touching
//! the engine.

use decimal_percentage::Percentage;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use thiserror::Error;

use crate::prices::{Price, PriceError};

/// Errors raised while building a checkout policy from configuration.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Invalid percentage format
    #[error("invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Invalid monetary amount
    #[error(transparent)]
    Amount(#[from] PriceError),

    /// Unknown currency code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Pricing constants used when deriving a checkout quote.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutPolicy {
    /// Subtotals strictly above this ship for free.
    pub free_shipping_threshold: Price,

    /// Flat fee charged when an order does not ship free.
    pub flat_shipping_fee: Price,

    /// Tax rate applied to the subtotal.
    pub tax_rate: Percentage,

    /// Display currency for derived quotes.
    pub currency: &'static Currency,
}

impl Default for CheckoutPolicy {
    /// The stock storefront policy: free shipping strictly above 100.00,
    /// a 10.00 flat fee otherwise, 8% tax, dollars.
    fn default() -> Self {
        CheckoutPolicy {
            free_shipping_threshold: Price::from_minor(10_000),
            flat_shipping_fee: Price::from_minor(1_000),
            tax_rate: Percentage::from(0.08),
            currency: USD,
        }
    }
}

impl CheckoutPolicy {
    /// Builds a policy from configuration strings.
    ///
    /// Amounts are decimal major units (e.g. `"100.00"`); the rate accepts
    /// both `"8%"` and `"0.08"`.
    ///
    /// # Errors
    ///
    /// Returns a `PolicyError` if any amount, percentage or currency code
    /// cannot be parsed.
    pub fn parse(
        free_shipping_threshold: &str,
        flat_shipping_fee: &str,
        tax_rate: &str,
        currency_code: &str,
    ) -> Result<Self, PolicyError> {
        let currency = match currency_code.trim() {
            "USD" => USD,
            "GBP" => GBP,
            "EUR" => EUR,
            other => return Err(PolicyError::UnknownCurrency(other.to_string())),
        };

        Ok(CheckoutPolicy {
            free_shipping_threshold: free_shipping_threshold.parse()?,
            flat_shipping_fee: flat_shipping_fee.parse()?,
            tax_rate: parse_percentage(tax_rate)?,
            currency,
        })
    }
}

/// Parse percentage string (e.g., "8%" or "0.08") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "8%" for 8%
/// - Decimal format: "0.08" for 8%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or if the value is invalid.
pub fn parse_percentage(s: &str) -> Result<Percentage, PolicyError> {
    let trimmed = s.trim();

    if let Some(percent_str) = trimmed.strip_suffix('%') {
        // Parse as percentage (e.g., "8%" -> 0.08)
        let value = percent_str
            .trim()
            .parse::<f64>()
            .map_err(|_err| PolicyError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value / 100.0))
    } else {
        // Parse as decimal (e.g., "0.08" -> 0.08)
        let value = trimmed
            .parse::<f64>()
            .map_err(|_err| PolicyError::InvalidPercentage(s.to_string()))?;

        Ok(Percentage::from(value))
    }
}
