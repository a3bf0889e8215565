//! Scripted storefront session against in-memory collaborators.
//!
//! Walks a full visit: restore the cart, sign in, browse the sample catalog,
//! fill the cart, and place an order, printing the cart and the quote along
//! the way.
//!
//! Run with `cargo run --example storefront`.

use std::sync::Arc;

use async_trait::async_trait;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tracing_subscriber::EnvFilter;

use vitrine::prelude::{
    CardDetails, CartSnapshot, CheckoutPolicy, OrderPayload, PaymentForm, Product, ProductId,
    Quote, ShippingForm, format_minor, sample_products,
};
use vitrine_app::{
    cart::{CartStore, Notice, NoticeSink},
    catalog::{CatalogApi, CatalogError, ProductFilter},
    checkout::CheckoutSession,
    identity::{
        AuthProvider, IdentityError, IdentityProvider, Password, Session, SessionManager,
        UserProfile, VerificationTicket,
    },
    orders::{OrderConfirmation, OrdersApi, OrdersError},
    storage::MemoryStore,
};

/// Catalog backed by the embedded sample fixture.
struct DemoCatalog {
    products: Vec<Product>,
}

#[async_trait]
impl CatalogApi for DemoCatalog {
    async fn list_products(
        &self,
        filter: Option<ProductFilter>,
    ) -> Result<Vec<Product>, CatalogError> {
        let category = filter.as_ref().and_then(|filter| filter.category.clone());

        Ok(self
            .products
            .iter()
            .filter(|product| match &category {
                Some(category) => product.category.as_deref() == Some(category),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }
}

/// Identity backend that accepts any credentials.
struct DemoIdentity;

#[async_trait]
impl IdentityProvider for DemoIdentity {
    async fn sign_in_with_password(
        &self,
        email: String,
        _password: Password,
    ) -> Result<Session, IdentityError> {
        Ok(Session {
            user_id: uuid::Uuid::new_v4().to_string(),
            email: Some(email),
            display_name: Some("Demo Shopper".to_owned()),
        })
    }

    async fn sign_up_with_password(
        &self,
        email: String,
        _password: Password,
        profile: UserProfile,
    ) -> Result<Session, IdentityError> {
        Ok(Session {
            user_id: uuid::Uuid::new_v4().to_string(),
            email: Some(email),
            display_name: Some(profile.full_name),
        })
    }

    async fn sign_in_with_provider(
        &self,
        _provider: AuthProvider,
    ) -> Result<Session, IdentityError> {
        Ok(Session {
            user_id: uuid::Uuid::new_v4().to_string(),
            email: Some("shopper@example.com".to_owned()),
            display_name: Some("Demo Shopper".to_owned()),
        })
    }

    async fn send_phone_verification(
        &self,
        _phone: String,
    ) -> Result<VerificationTicket, IdentityError> {
        Ok(VerificationTicket {
            id: uuid::Uuid::new_v4().to_string(),
        })
    }

    async fn confirm_phone_verification(
        &self,
        _ticket: VerificationTicket,
        _code: String,
    ) -> Result<Session, IdentityError> {
        Ok(Session {
            user_id: uuid::Uuid::new_v4().to_string(),
            email: None,
            display_name: None,
        })
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        Ok(())
    }
}

/// Order backend that accepts every payload.
struct DemoOrders;

#[async_trait]
impl OrdersApi for DemoOrders {
    async fn create_order(&self, payload: OrderPayload) -> Result<OrderConfirmation, OrdersError> {
        tracing::info!(
            items = payload.items.len(),
            total = payload.total,
            "accepting order"
        );

        Ok(OrderConfirmation {
            order_id: format!("ord_{}", uuid::Uuid::new_v4().simple()),
            placed_at: jiff::Timestamp::now(),
        })
    }
}

/// Prints each notice the way a UI toast would show it.
struct PrintedNotices;

impl NoticeSink for PrintedNotices {
    fn notify(&self, notice: Notice) {
        println!("  * {notice}");
    }
}

fn print_cart(snapshot: &CartSnapshot, quote: &Quote) {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit", "Line total"]);

    for line in &snapshot.items {
        builder.push_record([
            line.name.clone(),
            line.quantity.to_string(),
            format_minor(line.unit_price.minor(), quote.currency),
            format_minor(line.line_total(), quote.currency),
        ]);
    }

    builder.push_record([
        "Subtotal".to_owned(),
        String::new(),
        String::new(),
        format_minor(quote.subtotal, quote.currency),
    ]);
    builder.push_record([
        "Shipping".to_owned(),
        String::new(),
        String::new(),
        format_minor(quote.shipping, quote.currency),
    ]);
    builder.push_record([
        "Tax".to_owned(),
        String::new(),
        String::new(),
        format_minor(quote.tax, quote.currency),
    ]);
    builder.push_record([
        "Total".to_owned(),
        String::new(),
        String::new(),
        format_minor(quote.total, quote.currency),
    ]);

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..), Alignment::right());

    println!("{table}");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let storage = Arc::new(MemoryStore::new());
    let catalog = DemoCatalog {
        products: sample_products()?,
    };

    // Restore (empty on a first visit) and sign in
    let mut cart = CartStore::restore(storage.clone(), Arc::new(PrintedNotices));

    let sessions = SessionManager::new(Arc::new(DemoIdentity), storage.clone());
    let session = sessions
        .sign_in_with_password("shopper@example.com", Password::new("correct horse battery"))
        .await?;

    println!(
        "Signed in as {}\n",
        session.display_name.as_deref().unwrap_or("shopper")
    );

    // Browse the books category and fill the cart
    let books = catalog
        .list_products(Some(ProductFilter::category("books")))
        .await?;

    println!("Books in the catalog:");
    for product in &books {
        println!(
            "  - {} ({})",
            product.name,
            format_minor(product.price.minor(), CheckoutPolicy::default().currency)
        );
    }
    println!();

    let hardcover = catalog.get_product(ProductId::new("hardcover")).await?;
    let tote = catalog.get_product(ProductId::new("tote")).await?;

    cart.add_item(&hardcover, 2);
    cart.add_item(&tote, 1);
    cart.update_quantity(&tote.id, 2);
    println!();

    // Quote and print the cart
    let mut checkout = CheckoutSession::new(CheckoutPolicy::default(), Arc::new(DemoOrders));
    let quote = checkout.quote(&cart)?;

    print_cart(&cart.snapshot(), &quote);

    // Checkout
    checkout.submit_shipping(ShippingForm {
        full_name: "Demo Shopper".to_owned(),
        email: "shopper@example.com".to_owned(),
        phone: None,
        address_line: "1 Example Way".to_owned(),
        city: "Springfield".to_owned(),
        postal_code: "94111".to_owned(),
        country: "US".to_owned(),
    })?;

    checkout.submit_payment(PaymentForm::Card(CardDetails {
        number: "4242 4242 4242 4242".to_owned(),
        holder: "Demo Shopper".to_owned(),
        expiry_month: 12,
        expiry_year: 2031,
        cvc: "123".to_owned(),
    }))?;

    let confirmation = checkout.submit_order(&mut cart).await?;

    println!(
        "\nOrder {} placed at {}",
        confirmation.order_id, confirmation.placed_at
    );

    sessions.sign_out().await?;

    Ok(())
}
