//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;
use vitrine::prelude::{Product, ProductId};

use crate::catalog::{CatalogError, ProductFilter};

/// Configuration for the hosted catalog endpoints.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the storefront backend, e.g. `"http://localhost:4000"`.
    pub base_url: String,
}

/// HTTP client for the product catalog.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    config: CatalogConfig,
    http: Client,
}

impl HttpCatalogApi {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    #[tracing::instrument(name = "catalog.list_products", skip(self), err)]
    async fn list_products(
        &self,
        filter: Option<ProductFilter>,
    ) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/products", self.config.base_url);

        let mut request = self.http.get(&url);

        if let Some(filter) = &filter {
            if let Some(category) = &filter.category {
                request = request.query(&[("category", category)]);
            }

            if let Some(search) = &filter.search {
                request = request.query(&[("search", search)]);
            }
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "product listing failed with status {status}: {text}"
            )));
        }

        let parsed: ProductListResponse = response.json().await?;

        Ok(parsed
            .products
            .into_iter()
            .filter_map(ProductRecord::into_product)
            .collect())
    }

    #[tracing::instrument(name = "catalog.get_product", skip(self), fields(product_id = %id), err)]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = format!("{}/products/{}", self.config.base_url, id.as_str());

        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "product lookup failed with status {status}: {text}"
            )));
        }

        let record: ProductRecord = response.json().await?;

        record
            .into_product()
            .ok_or_else(|| CatalogError::UnexpectedResponse("product record is invalid".into()))
    }
}

#[automock]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Retrieve products, optionally constrained by a filter.
    async fn list_products(
        &self,
        filter: Option<ProductFilter>,
    ) -> Result<Vec<Product>, CatalogError>;

    /// Retrieve a single product by id.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;
}

#[derive(Debug, Deserialize)]
struct ProductListResponse {
    products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: String,
    name: String,
    price: Decimal,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

impl ProductRecord {
    /// Validate the record at the boundary; invalid prices drop the record.
    fn into_product(self) -> Option<Product> {
        match Product::from_parts(self.id, self.name, self.price, self.category, self.image_url) {
            Ok(product) => Some(product),
            Err(err) => {
                warn!(error = %err, "skipping catalog record with invalid price");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;

    fn client_for(server: &MockServer) -> HttpCatalogApi {
        HttpCatalogApi::new(CatalogConfig {
            base_url: server.uri(),
        })
    }

    #[tokio::test]
    async fn list_products_parses_records() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [
                    {
                        "id": "tote",
                        "name": "Canvas Tote",
                        "price": "9.00",
                        "category": "accessories",
                    },
                    {
                        "id": "hardcover",
                        "name": "Clothbound Hardcover",
                        "price": "50.00",
                    },
                ]
            })))
            .mount(&server)
            .await;

        let products = client_for(&server).list_products(None).await?;

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id.as_str(), "tote");
        assert_eq!(products[0].price.minor(), 900);
        assert_eq!(products[0].category.as_deref(), Some("accessories"));
        assert_eq!(products[1].price.minor(), 5_000);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_skips_invalid_records() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [
                    { "id": "bad", "name": "Negative", "price": "-1.00" },
                    { "id": "tote", "name": "Canvas Tote", "price": "9.00" },
                ]
            })))
            .mount(&server)
            .await;

        let products = client_for(&server).list_products(None).await?;

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "tote");

        Ok(())
    }

    #[tokio::test]
    async fn list_products_forwards_the_category_filter() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("category", "books"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
            .mount(&server)
            .await;

        let products = client_for(&server)
            .list_products(Some(ProductFilter::category("books")))
            .await?;

        assert!(products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_products_maps_server_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = client_for(&server).list_products(None).await;

        assert!(
            matches!(result, Err(CatalogError::UnexpectedResponse(_))),
            "expected UnexpectedResponse, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_returns_the_record() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/tote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "tote",
                "name": "Canvas Tote",
                "price": "9.00",
            })))
            .mount(&server)
            .await;

        let product = client_for(&server)
            .get_product(ProductId::new("tote"))
            .await?;

        assert_eq!(product.name, "Canvas Tote");
        assert_eq!(product.price.minor(), 900);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_maps_404_to_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client_for(&server).get_product(ProductId::new("ghost")).await;

        assert!(
            matches!(result, Err(CatalogError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
