//! Prices
//!
//! Monetary amounts are held in minor units (pence/cents) so that cart and
//! checkout arithmetic stays in integers. Decimal amounts only appear at the
//! boundary, when external data is validated into a [`Price`].

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to price construction and rate arithmetic.
#[derive(Debug, Error)]
pub enum PriceError {
    /// A monetary amount was negative.
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),

    /// A monetary amount did not fit into minor units.
    #[error("amount out of range: {0}")]
    OutOfRange(Decimal),

    /// An amount string could not be parsed as a decimal.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Rate application overflowed or could not be safely represented.
    #[error("rate conversion overflowed or was not finite")]
    RateConversion,
}

/// A price in minor units (pence/cents).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Creates a price from an amount already in minor units.
    #[must_use]
    pub const fn from_minor(value: u64) -> Self {
        Price { value }
    }

    /// Creates a price from a decimal amount in major units (e.g. `49.99`).
    ///
    /// Sub-cent precision is rounded to the nearest cent, half away from
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns a `PriceError` if the amount is negative or does not fit into
    /// minor units.
    pub fn from_decimal(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }

        let value = amount
            .checked_mul(Decimal::new(100, 0))
            .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|minor| minor.to_u64())
            .ok_or(PriceError::OutOfRange(amount))?;

        Ok(Price { value })
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor(self) -> u64 {
        self.value
    }

    /// Multiplies the price by a quantity, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> u64 {
        self.value.saturating_mul(u64::from(quantity))
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| PriceError::InvalidAmount(s.to_string()))?;

        Self::from_decimal(amount)
    }
}

/// Applies a percentage rate to an amount in minor units, rounding to whole
/// minor units half away from zero.
///
/// # Errors
///
/// Returns `PriceError::RateConversion` if the calculation overflows or
/// cannot be safely represented.
pub fn rate_of_minor(rate: &Percentage, minor: u64) -> Result<u64, PriceError> {
    let minor = Decimal::from_u64(minor).ok_or(PriceError::RateConversion)?;

    ((*rate) * Decimal::ONE) // decimal_percentage does not expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(PriceError::RateConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PriceError::RateConversion)
}

/// Formats an amount in minor units for display in the given currency.
#[must_use]
pub fn format_minor(minor: u64, currency: &'static Currency) -> String {
    let minor = i64::try_from(minor).unwrap_or(i64::MAX);

    Money::from_minor(minor, currency).to_string()
}
