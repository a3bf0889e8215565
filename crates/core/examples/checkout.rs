//! Storefront Checkout Example
//!
//! Builds a cart from the bundled sample catalog, derives a quote under the
//! default policy and prints the amounts.

use anyhow::{Context, Result};

use vitrine::prelude::{Cart, CheckoutPolicy, format_minor, quote, sample_products};

/// Storefront checkout example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    let products = sample_products()?;

    let mut cart = Cart::new();

    for (id, quantity) in [("hardcover", 2_u32), ("tote", 1), ("bookmark", 3)] {
        let product = products
            .iter()
            .find(|product| product.id.as_str() == id)
            .with_context(|| format!("sample catalog is missing {id}"))?;

        cart.add(product, quantity);
    }

    let snapshot = cart.snapshot();
    let policy = CheckoutPolicy::default();
    let priced = quote(&snapshot, &policy)?;

    for line in &snapshot.items {
        println!(
            "{:>3} x {:<24} {:>10}",
            line.quantity,
            line.name,
            format_minor(line.line_total(), policy.currency)
        );
    }

    println!();
    println!(
        "{:>30} {:>10}",
        "Subtotal",
        format_minor(priced.subtotal, priced.currency)
    );
    println!(
        "{:>30} {:>10}",
        "Shipping",
        format_minor(priced.shipping, priced.currency)
    );
    println!(
        "{:>30} {:>10}",
        "Tax",
        format_minor(priced.tax, priced.currency)
    );
    println!(
        "{:>30} {:>10}",
        "Total",
        format_minor(priced.total, priced.currency)
    );

    Ok(())
}
