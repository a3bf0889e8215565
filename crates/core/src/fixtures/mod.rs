//! Fixtures
//!
//! YAML product catalogs for demos and tests. Fixture prices are written as
//! `"AMOUNT CURRENCY"` strings and validated into [`Product`]s on load.

use std::{fs, path::Path};

use thiserror::Error;

use crate::products::Product;

pub mod products;

pub use products::{ProductFixture, ProductsFixture, parse_price};

/// A small built-in catalog used by demos and tests.
pub const SAMPLE_CATALOG: &str = include_str!("../../fixtures/catalog.yaml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

/// Loads a product catalog from a YAML fixture file.
///
/// Products come back sorted by fixture key, so loads are deterministic.
///
/// # Errors
///
/// Returns a `FixtureError` if the file cannot be read or parsed.
pub fn load_products(path: impl AsRef<Path>) -> Result<Vec<Product>, FixtureError> {
    let raw = fs::read_to_string(path)?;

    load_products_str(&raw)
}

/// Parses a product catalog from YAML text.
///
/// # Errors
///
/// Returns a `FixtureError` if the YAML or any price cannot be parsed.
pub fn load_products_str(raw: &str) -> Result<Vec<Product>, FixtureError> {
    let fixture: ProductsFixture = serde_norway::from_str(raw)?;

    let mut entries: Vec<(String, ProductFixture)> = fixture.products.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    entries
        .into_iter()
        .map(|(key, product)| product.into_product(&key))
        .collect()
}

/// Parses the built-in sample catalog.
///
/// # Errors
///
/// Returns a `FixtureError` if the embedded YAML is invalid, which would be
/// a packaging bug.
pub fn sample_products() -> Result<Vec<Product>, FixtureError> {
    load_products_str(SAMPLE_CATALOG)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn sample_catalog_loads() -> TestResult {
        let products = sample_products()?;

        assert!(!products.is_empty());
        assert!(products.iter().all(|product| product.price.minor() > 0));

        Ok(())
    }

    #[test]
    fn products_come_back_sorted_by_key() -> TestResult {
        let raw = r#"
products:
  zine:
    name: "Stapled Zine"
    price: "4.00 USD"
  atlas:
    name: "Road Atlas"
    price: "18.00 USD"
"#;

        let products = load_products_str(raw)?;
        let ids: Vec<&str> = products.iter().map(|product| product.id.as_str()).collect();

        assert_eq!(ids, vec!["atlas", "zine"]);

        Ok(())
    }

    #[test]
    fn load_products_reads_from_disk() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "products:")?;
        writeln!(file, "  tote:")?;
        writeln!(file, "    name: Canvas Tote")?;
        writeln!(file, "    price: 9.00 USD")?;

        let products = load_products(file.path())?;

        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.price.minor()), Some(900));

        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_products("does-not-exist.yaml");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn invalid_yaml_is_a_yaml_error() {
        let result = load_products_str("products: [");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));
    }
}
