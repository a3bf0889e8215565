//! Product Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    prices::Price,
    products::{Product, ProductId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product price (e.g., "12.50 USD")
    pub price: String,

    /// Optional category label
    #[serde(default)]
    pub category: Option<String>,

    /// Optional image location
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProductFixture {
    /// Converts the fixture entry into a product keyed by its fixture key.
    ///
    /// # Errors
    ///
    /// Returns a `FixtureError` if the price cannot be parsed.
    pub fn into_product(self, key: &str) -> Result<Product, FixtureError> {
        let (price, _currency) = parse_price(&self.price)?;

        Ok(Product {
            id: ProductId::from(key),
            name: self.name,
            price,
            category: self.category,
            image_url: self.image_url,
        })
    }
}

/// Parse price string (e.g., "2.99 GBP") into a price and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(Price, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let price =
        Price::from_decimal(amount).map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((price, currency))
}
