//! Cart
//!
//! An ordered collection of line items, unique by product id. Totals are
//! always derived from the lines; no running sum is ever stored, so the
//! contents cannot drift out of agreement with the items.

use serde::{Deserialize, Serialize};

use crate::{
    prices::Price,
    products::{Product, ProductId},
};

/// One product entry in the cart.
///
/// The unit price is snapshotted when the product is first added; later
/// catalog changes do not reprice lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product id this line is keyed by
    pub product_id: ProductId,

    /// Product name at time of add
    pub name: String,

    /// Unit price at time of add
    pub unit_price: Price,

    /// Number of units, always at least one
    pub quantity: u32,

    /// Optional category label
    pub category: Option<String>,

    /// Optional image location
    pub image_url: Option<String>,
}

impl LineItem {
    /// Builds a line from a catalog product and a quantity.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            category: product.category.clone(),
            image_url: product.image_url.clone(),
        }
    }

    /// Line total in minor units.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price.times(self.quantity)
    }
}

/// What happened when a product was added to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added,

    /// The product was already present, so quantities were merged.
    Merged,
}

/// Result of an absolute quantity update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityOutcome {
    /// The line now carries the given quantity.
    Set {
        /// Product name, for display
        name: String,

        /// New quantity
        quantity: u32,
    },

    /// Quantity zero removed the line.
    Removed(LineItem),

    /// No line with that id exists; nothing changed.
    Absent,
}

/// Ordered cart contents, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredCart")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from loose lines, merging duplicate ids and dropping
    /// zero quantities.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        StoredCart {
            items: items.into_iter().collect(),
        }
        .into()
    }

    /// Adds a product to the cart.
    ///
    /// If a line with the same product id already exists its quantity is
    /// incremented, otherwise a new line is appended at the end. A quantity
    /// of zero is a caller bug; debug builds assert, release builds clamp to
    /// one.
    pub fn add(&mut self, product: &Product, quantity: u32) -> AddOutcome {
        debug_assert!(quantity > 0, "add called with zero quantity");
        let quantity = quantity.max(1);

        match self.line_mut(&product.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity);
                AddOutcome::Merged
            }
            None => {
                self.items.push(LineItem::from_product(product, quantity));
                AddOutcome::Added
            }
        }
    }

    /// Removes the line with the given product id, returning it if present.
    /// Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|line| &line.product_id == id)?;

        Some(self.items.remove(index))
    }

    /// Sets an absolute quantity for the line with the given product id.
    ///
    /// A quantity of zero is a removal request. Updating an absent id is a
    /// no-op.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> QuantityOutcome {
        if quantity == 0 {
            return match self.remove(id) {
                Some(line) => QuantityOutcome::Removed(line),
                None => QuantityOutcome::Absent,
            };
        }

        match self.line_mut(id) {
            Some(line) => {
                line.quantity = quantity;
                QuantityOutcome::Set {
                    name: line.name.clone(),
                    quantity,
                }
            }
            None => QuantityOutcome::Absent,
        }
    }

    /// Removes every line from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Checks whether a product id is present.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|line| &line.product_id == id)
    }

    /// Returns the line with the given product id, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|line| &line.product_id == id)
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |sum, line| sum.saturating_add(u64::from(line.quantity)))
    }

    /// Sum of all line totals in minor units.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |sum, line| sum.saturating_add(line.line_total()))
    }

    /// Takes a point-in-time read model of the cart with derived totals.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total_items: self.total_items(),
            subtotal: self.subtotal(),
        }
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|line| &line.product_id == id)
    }
}

/// Point-in-time read model of the cart with its derived totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    /// Lines in insertion order
    pub items: Vec<LineItem>,

    /// Sum of all line quantities
    pub total_items: u64,

    /// Sum of all line totals in minor units
    pub subtotal: u64,
}

impl CartSnapshot {
    /// Checks whether the snapshot holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Persisted cart shape.
///
/// Loading re-validates: duplicate ids re-merge and zero quantities drop, so
/// hand-edited or stale storage cannot produce an invalid cart.
#[derive(Debug, Deserialize)]
struct StoredCart {
    #[serde(default)]
    items: Vec<LineItem>,
}

impl From<StoredCart> for Cart {
    fn from(stored: StoredCart) -> Self {
        let mut cart = Cart::new();

        for item in stored.items {
            if item.quantity == 0 {
                continue;
            }

            match cart.line_mut(&item.product_id) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }

        cart
    }
}
