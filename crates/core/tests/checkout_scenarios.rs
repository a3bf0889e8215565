//! Integration tests for cart totals and checkout quote derivation.
//!
//! The quote arithmetic under the stock policy (free shipping strictly above
//! $100.00, $10.00 flat fee otherwise, 8% tax):
//!
//! 1. One $50.00 item, quantity 2
//!    - Subtotal: $100.00 (10000 cents), exactly at the threshold
//!    - Shipping: $10.00 (not strictly above, so the flat fee applies)
//!    - Tax: 8% of $100.00 = $8.00
//!    - Total: $118.00 (11800 cents)
//!
//! 2. One $60.00 item, quantity 2
//!    - Subtotal: $120.00 (12000 cents), above the threshold
//!    - Shipping: $0.00
//!    - Tax: 8% of $120.00 = $9.60
//!    - Total: $129.60 (12960 cents)
//!
//! 3. Empty cart
//!    - Everything is zero; an empty cart never charges shipping.

use testresult::TestResult;

use vitrine::prelude::*;

fn product(id: &str, name: &str, minor: u64) -> Product {
    Product::new(id, name, Price::from_minor(minor))
}

#[test]
fn fifty_dollar_item_twice_pays_shipping() -> TestResult {
    let mut cart = Cart::new();
    cart.add(&product("sku-50", "Clothbound Hardcover", 5_000), 2);

    let quote = quote(&cart.snapshot(), &CheckoutPolicy::default())?;

    assert_eq!(quote.subtotal, 10_000);
    assert_eq!(quote.shipping, 1_000);
    assert_eq!(quote.tax, 800);
    assert_eq!(quote.total, 11_800);

    Ok(())
}

#[test]
fn sixty_dollar_item_twice_ships_free() -> TestResult {
    let mut cart = Cart::new();
    cart.add(&product("sku-60", "Collected Boxed Set", 6_000), 2);

    let quote = quote(&cart.snapshot(), &CheckoutPolicy::default())?;

    assert_eq!(quote.subtotal, 12_000);
    assert_eq!(quote.shipping, 0);
    assert_eq!(quote.tax, 960);
    assert_eq!(quote.total, 12_960);

    Ok(())
}

#[test]
fn empty_cart_quotes_to_zero() -> TestResult {
    let quote = quote(&Cart::new().snapshot(), &CheckoutPolicy::default())?;

    assert_eq!(
        (quote.subtotal, quote.shipping, quote.tax, quote.total),
        (0, 0, 0, 0)
    );

    Ok(())
}

#[test]
fn one_cent_over_the_threshold_flips_shipping() -> TestResult {
    let policy = CheckoutPolicy::default();

    let mut at_threshold = Cart::new();
    at_threshold.add(&product("sku-a", "At threshold", 10_000), 1);

    let mut just_over = Cart::new();
    just_over.add(&product("sku-b", "Just over", 10_001), 1);

    assert_eq!(quote(&at_threshold.snapshot(), &policy)?.shipping, 1_000);
    assert_eq!(quote(&just_over.snapshot(), &policy)?.shipping, 0);

    Ok(())
}

#[test]
fn quote_tracks_a_long_mutation_sequence() -> TestResult {
    let policy = CheckoutPolicy::default();
    let mut cart = Cart::new();

    let hardcover = product("hardcover", "Clothbound Hardcover", 5_000);
    let tote = product("tote", "Canvas Tote", 900);
    let bookmark = product("bookmark", "Brass Bookmark", 300);

    // Start with a hardcover: below the threshold, so shipping applies.
    cart.add(&hardcover, 1);
    let q = quote(&cart.snapshot(), &policy)?;
    assert_eq!((q.subtotal, q.shipping, q.total), (5_000, 1_000, 6_400));

    // A second hardcover merges into the same line and lands exactly on the
    // threshold, which still pays shipping.
    cart.add(&hardcover, 1);
    let q = quote(&cart.snapshot(), &policy)?;
    assert_eq!((q.subtotal, q.shipping, q.total), (10_000, 1_000, 11_800));

    // The tote pushes the subtotal over the threshold.
    cart.add(&tote, 1);
    let q = quote(&cart.snapshot(), &policy)?;
    assert_eq!((q.subtotal, q.shipping, q.total), (10_900, 0, 11_772));

    // Dropping to one hardcover brings shipping back.
    cart.set_quantity(&hardcover.id, 1);
    let q = quote(&cart.snapshot(), &policy)?;
    assert_eq!((q.subtotal, q.shipping, q.total), (5_900, 1_000, 7_372));

    // Bookmarks merge like anything else.
    cart.add(&bookmark, 3);
    cart.add(&bookmark, 2);
    let q = quote(&cart.snapshot(), &policy)?;
    assert_eq!(cart.total_items(), 7);
    assert_eq!((q.subtotal, q.shipping, q.total), (7_400, 1_000, 8_992));

    // Quantity zero removes the line outright.
    cart.set_quantity(&bookmark.id, 0);
    assert!(!cart.contains(&bookmark.id));
    let q = quote(&cart.snapshot(), &policy)?;
    assert_eq!((q.subtotal, q.shipping, q.total), (5_900, 1_000, 7_372));

    // Clearing the cart zeroes the quote.
    cart.clear();
    let q = quote(&cart.snapshot(), &policy)?;
    assert_eq!((q.subtotal, q.shipping, q.tax, q.total), (0, 0, 0, 0));

    Ok(())
}

#[test]
fn sample_catalog_scenario_matches_hand_arithmetic() -> TestResult {
    let products = sample_products()?;
    let boxed_set = products
        .iter()
        .find(|product| product.id.as_str() == "boxed-set")
        .ok_or("boxed-set missing from the sample catalog")?;

    let mut cart = Cart::new();
    cart.add(boxed_set, 2);

    let quote = quote(&cart.snapshot(), &CheckoutPolicy::default())?;

    assert_eq!(quote.total, 12_960);
    assert_eq!(format_minor(quote.total, quote.currency), "$129.60");

    Ok(())
}
