//! Order payloads
//!
//! The versioned contract handed to the orders backend. Amounts are copied
//! from the derived quote, never recomputed here, so the payload cannot
//! disagree with what the shopper reviewed. Card numbers never appear in a
//! payload; only the last four digits survive redaction.

use serde::{Deserialize, Serialize};

use crate::{
    cart::CartSnapshot,
    checkout::{flow::OrderDraft, forms::PaymentForm, quote::Quote},
    prices::Price,
    products::ProductId,
};

/// Payload schema version, bumped on breaking shape changes.
pub const ORDER_SCHEMA_VERSION: u32 = 1;

/// Customer contact details on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Full name
    pub full_name: String,

    /// Contact email
    pub email: String,

    /// Optional contact phone
    pub phone: Option<String>,
}

/// Shipping destination on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Street address line
    pub address_line: String,

    /// City or town
    pub city: String,

    /// Postal or ZIP code
    pub postal_code: String,

    /// Country name or code
    pub country: String,
}

/// Redacted payment selection carried on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card, identified only by its last four digits
    Card {
        /// Last four digits of the account number
        last_four: String,
    },

    /// Cash on delivery
    CashOnDelivery,
}

impl From<&PaymentForm> for PaymentMethod {
    fn from(form: &PaymentForm) -> Self {
        match form {
            PaymentForm::CashOnDelivery => PaymentMethod::CashOnDelivery,
            PaymentForm::Card(card) => {
                let digits: String = card.number.chars().filter(char::is_ascii_digit).collect();
                let last_four = digits
                    .chars()
                    .skip(digits.len().saturating_sub(4))
                    .collect();

                PaymentMethod::Card { last_four }
            }
        }
    }
}

/// One ordered line on a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product id
    pub product_id: ProductId,

    /// Product name as carted
    pub name: String,

    /// Unit price in minor units
    pub unit_price: Price,

    /// Units ordered
    pub quantity: u32,
}

/// The versioned order submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Payload schema version
    pub schema_version: u32,

    /// Customer contact
    pub customer: Customer,

    /// Shipping destination
    pub shipping_address: ShippingAddress,

    /// Ordered lines
    pub items: Vec<OrderLine>,

    /// Cart subtotal in minor units
    pub subtotal: u64,

    /// Shipping charge in minor units
    pub shipping: u64,

    /// Tax in minor units
    pub tax: u64,

    /// Grand total in minor units
    pub total: u64,

    /// Redacted payment selection
    pub payment_method: PaymentMethod,

    /// Optional order notes
    pub notes: Option<String>,
}

impl OrderPayload {
    /// Assembles the submission payload from the flow draft, the cart
    /// snapshot and the derived quote.
    #[must_use]
    pub fn assemble(draft: OrderDraft, snapshot: &CartSnapshot, quote: &Quote) -> Self {
        let items = snapshot
            .items
            .iter()
            .map(|line| OrderLine {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
            })
            .collect();

        OrderPayload {
            schema_version: ORDER_SCHEMA_VERSION,
            customer: draft.customer,
            shipping_address: draft.address,
            items,
            subtotal: quote.subtotal,
            shipping: quote.shipping,
            tax: quote.tax,
            total: quote.total,
            payment_method: draft.payment,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        cart::Cart,
        checkout::{
            forms::CardDetails,
            policy::CheckoutPolicy,
            quote::quote,
        },
        prices::Price,
        products::Product,
    };

    use super::*;

    fn draft() -> OrderDraft {
        OrderDraft {
            customer: Customer {
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
            },
            address: ShippingAddress {
                address_line: "12 Analytical Row".to_string(),
                city: "London".to_string(),
                postal_code: "N1 9GU".to_string(),
                country: "United Kingdom".to_string(),
            },
            payment: PaymentMethod::Card {
                last_four: "4242".to_string(),
            },
        }
    }

    #[test]
    fn assemble_copies_quote_amounts_verbatim() -> TestResult {
        let mut cart = Cart::new();
        cart.add(&Product::new("sku-1", "Paperback", Price::from_minor(6_000)), 2);

        let snapshot = cart.snapshot();
        let quote = quote(&snapshot, &CheckoutPolicy::default())?;

        let payload = OrderPayload::assemble(draft(), &snapshot, &quote);

        assert_eq!(payload.schema_version, ORDER_SCHEMA_VERSION);
        assert_eq!(payload.subtotal, quote.subtotal);
        assert_eq!(payload.shipping, quote.shipping);
        assert_eq!(payload.tax, quote.tax);
        assert_eq!(payload.total, quote.total);
        assert_eq!(payload.items.len(), 1);

        Ok(())
    }

    #[test]
    fn card_redaction_keeps_only_last_four() {
        let form = PaymentForm::Card(CardDetails {
            number: "4242 4242 4242 4242".to_string(),
            holder: "Ada Lovelace".to_string(),
            expiry_month: 12,
            expiry_year: 2027,
            cvc: "123".to_string(),
        });

        let method = PaymentMethod::from(&form);

        assert_eq!(
            method,
            PaymentMethod::Card {
                last_four: "4242".to_string()
            }
        );
    }

    #[test]
    fn payload_json_never_contains_the_card_number() -> TestResult {
        let mut cart = Cart::new();
        cart.add(&Product::new("sku-1", "Paperback", Price::from_minor(1_000)), 1);

        let snapshot = cart.snapshot();
        let quote = quote(&snapshot, &CheckoutPolicy::default())?;
        let payload = OrderPayload::assemble(draft(), &snapshot, &quote);

        let json = serde_json::to_string(&payload)?;

        assert!(json.contains("\"last_four\":\"4242\""));
        assert!(
            !json.contains("4242 4242"),
            "full card numbers must never be serialized"
        );

        Ok(())
    }

    #[test]
    fn cash_on_delivery_converts_without_redaction() {
        let method = PaymentMethod::from(&PaymentForm::CashOnDelivery);

        assert_eq!(method, PaymentMethod::CashOnDelivery);
    }
}
