//! Products
//!
//! Catalog records as the storefront sees them. Product data always arrives
//! from outside (the catalog API or fixtures), so construction goes through
//! a validating boundary rather than trusting the wire format.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::prices::{Price, PriceError};

/// Opaque catalog-assigned product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id from its catalog representation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Optional category label
    pub category: Option<String>,

    /// Optional image location, passed through unchanged
    pub image_url: Option<String>,
}

impl Product {
    /// Creates a product from already-validated parts.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            category: None,
            image_url: None,
        }
    }

    /// Validates external catalog data into a product.
    ///
    /// # Errors
    ///
    /// Returns a `PriceError` if the price is negative or out of range.
    pub fn from_parts(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Decimal,
        category: Option<String>,
        image_url: Option<String>,
    ) -> Result<Self, PriceError> {
        Ok(Product {
            id: id.into(),
            name: name.into(),
            price: Price::from_decimal(price)?,
            category,
            image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_parts_validates_price() -> TestResult {
        let product = Product::from_parts(
            "sku-1",
            "Paperback",
            Decimal::new(1250, 2),
            Some("books".to_string()),
            None,
        )?;

        assert_eq!(product.id.as_str(), "sku-1");
        assert_eq!(product.price.minor(), 1250);
        assert_eq!(product.category.as_deref(), Some("books"));

        Ok(())
    }

    #[test]
    fn from_parts_rejects_negative_price() {
        let result = Product::from_parts("sku-1", "Paperback", Decimal::new(-1, 0), None, None);

        assert!(matches!(result, Err(PriceError::Negative(_))));
    }
}
