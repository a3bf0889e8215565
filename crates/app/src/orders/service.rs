//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use vitrine::prelude::OrderPayload;

use crate::orders::{OrderConfirmation, OrdersError};

/// Configuration for the hosted order endpoints.
#[derive(Debug, Clone)]
pub struct OrdersConfig {
    /// Base URL of the storefront backend, e.g. `"http://localhost:4000"`.
    pub base_url: String,
}

/// HTTP client for order placement.
#[derive(Debug, Clone)]
pub struct HttpOrdersApi {
    config: OrdersConfig,
    http: Client,
}

impl HttpOrdersApi {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: OrdersConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl OrdersApi for HttpOrdersApi {
    #[tracing::instrument(
        name = "orders.create_order",
        skip(self, payload),
        fields(items = payload.items.len(), total = payload.total),
        err
    )]
    async fn create_order(&self, payload: OrderPayload) -> Result<OrderConfirmation, OrdersError> {
        let url = format!("{}/orders", self.config.base_url);

        let response = self.http.post(&url).json(&payload).send().await?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            let text = response.text().await.unwrap_or_default();

            return Err(OrdersError::Rejected(text));
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(OrdersError::UnexpectedResponse(format!(
                "order submission failed with status {status}: {text}"
            )));
        }

        let confirmation: OrderConfirmation = response.json().await?;

        Ok(confirmation)
    }
}

#[automock]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Submit an assembled order payload, returning the confirmation.
    async fn create_order(&self, payload: OrderPayload) -> Result<OrderConfirmation, OrdersError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use vitrine::prelude::{
        Cart, CheckoutPolicy, Customer, OrderDraft, PaymentForm, PaymentMethod, Price, Product,
        ShippingAddress, quote,
    };
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, method, path},
    };

    use super::*;

    fn sample_payload() -> OrderPayload {
        let mut cart = Cart::new();
        cart.add(
            &Product::new("tote", "Canvas Tote", Price::from_minor(900)),
            2,
        );

        let snapshot = cart.snapshot();
        let quote = quote(&snapshot, &CheckoutPolicy::default()).expect("quote");

        let draft = OrderDraft {
            customer: Customer {
                full_name: "Ada Lovelace".to_owned(),
                email: "ada@example.com".to_owned(),
                phone: None,
            },
            address: ShippingAddress {
                address_line: "12 Analytical Row".to_owned(),
                city: "London".to_owned(),
                postal_code: "N1 9GU".to_owned(),
                country: "GB".to_owned(),
            },
            payment: PaymentMethod::from(&PaymentForm::CashOnDelivery),
        };

        OrderPayload::assemble(draft, &snapshot, &quote)
    }

    #[tokio::test]
    async fn create_order_posts_the_payload_and_parses_the_confirmation() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/orders"))
            .and(body_partial_json(json!({
                "schema_version": 1,
                "total": 2_944,
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "order_id": "ord_1017",
                "placed_at": "2026-08-21T10:15:00Z",
            })))
            .mount(&server)
            .await;

        let api = HttpOrdersApi::new(OrdersConfig {
            base_url: server.uri(),
        });

        let confirmation = api.create_order(sample_payload()).await?;

        assert_eq!(confirmation.order_id, "ord_1017");

        Ok(())
    }

    #[tokio::test]
    async fn create_order_maps_422_to_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(422).set_body_string("card declined"))
            .mount(&server)
            .await;

        let api = HttpOrdersApi::new(OrdersConfig {
            base_url: server.uri(),
        });

        let result = api.create_order(sample_payload()).await;

        assert!(
            matches!(result, Err(OrdersError::Rejected(ref message)) if message == "card declined"),
            "expected Rejected, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_order_maps_server_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/orders"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let api = HttpOrdersApi::new(OrdersConfig {
            base_url: server.uri(),
        });

        let result = api.create_order(sample_payload()).await;

        assert!(
            matches!(result, Err(OrdersError::UnexpectedResponse(_))),
            "expected UnexpectedResponse, got {result:?}"
        );
    }
}
