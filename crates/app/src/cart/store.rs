//! Cart store.

use std::sync::Arc;

use tracing::{debug, warn};
use vitrine::prelude::{Cart, CartSnapshot, Product, ProductId, QuantityOutcome};

use crate::{
    cart::notices::{Notice, NoticeSink},
    storage::{CART_KEY, KeyValueStore},
};

/// Single owner of the session cart.
///
/// Every mutation persists the cart under [`CART_KEY`] before returning and
/// emits a [`Notice`] describing what changed. A failed persist is logged and
/// swallowed; the in-memory cart stays authoritative and the mutation is not
/// rolled back.
pub struct CartStore {
    cart: Cart,
    storage: Arc<dyn KeyValueStore>,
    notices: Arc<dyn NoticeSink>,
}

impl CartStore {
    /// Restores the persisted cart, or starts empty.
    ///
    /// Absent, unreadable or corrupt stored data degrades to an empty cart
    /// with a warning. Restoring never fails.
    #[must_use]
    pub fn restore(storage: Arc<dyn KeyValueStore>, notices: Arc<dyn NoticeSink>) -> Self {
        let cart = match storage.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(cart) => cart,
                Err(err) => {
                    warn!(error = %err, "discarding unreadable stored cart");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(err) => {
                warn!(error = %err, "cart storage unavailable, starting empty");
                Cart::new()
            }
        };

        Self {
            cart,
            storage,
            notices,
        }
    }

    /// Adds `quantity` units of `product`, merging onto an existing line.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        let outcome = self.cart.add(product, quantity);

        debug!(product_id = %product.id, quantity, ?outcome, "cart add");

        self.persist();
        self.notices.notify(Notice::ItemAdded {
            name: product.name.clone(),
            quantity: quantity.max(1),
        });
    }

    /// Removes the line for `id`. Removing an absent id is a no-op.
    pub fn remove_item(&mut self, id: &ProductId) {
        let Some(line) = self.cart.remove(id) else {
            return;
        };

        debug!(product_id = %id, "cart remove");

        self.persist();
        self.notices.notify(Notice::ItemRemoved { name: line.name });
    }

    /// Sets the line for `id` to an absolute quantity; zero removes it.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        match self.cart.set_quantity(id, quantity) {
            QuantityOutcome::Set { name, quantity } => {
                debug!(product_id = %id, quantity, "cart quantity set");

                self.persist();
                self.notices
                    .notify(Notice::QuantityUpdated { name, quantity });
            }
            QuantityOutcome::Removed(line) => {
                debug!(product_id = %id, "cart quantity zero, line removed");

                self.persist();
                self.notices.notify(Notice::ItemRemoved { name: line.name });
            }
            QuantityOutcome::Absent => {}
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.cart.clear();

        debug!("cart cleared");

        self.persist();
        self.notices.notify(Notice::CartCleared);
    }

    /// The cart contents plus derived totals, recomputed on every call.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Whether a line for `id` exists.
    #[must_use]
    pub fn is_in_cart(&self, id: &ProductId) -> bool {
        self.cart.contains(id)
    }

    fn persist(&self) {
        let serialized = match serde_json::to_string(&self.cart) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(error = %err, "failed to serialize cart, keeping in-memory state");
                return;
            }
        };

        if let Err(err) = self.storage.set(CART_KEY, &serialized) {
            warn!(error = %err, "failed to persist cart, keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use vitrine::prelude::Price;

    use crate::{
        cart::notices::{RecordedNotices, SilentNotices},
        storage::{MemoryStore, MockKeyValueStore, StorageError},
    };

    use super::*;

    fn tote() -> Product {
        Product::new("tote", "Canvas Tote", Price::from_minor(900))
    }

    fn hardcover() -> Product {
        Product::new("hardcover", "Clothbound Hardcover", Price::from_minor(5_000))
    }

    fn store_with_memory() -> (CartStore, Arc<MemoryStore>, Arc<RecordedNotices>) {
        let storage = Arc::new(MemoryStore::new());
        let notices = Arc::new(RecordedNotices::new());
        let store = CartStore::restore(storage.clone(), notices.clone());

        (store, storage, notices)
    }

    #[test]
    fn restore_starts_empty_without_stored_data() {
        let (store, _storage, _notices) = store_with_memory();

        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn restore_reads_back_a_persisted_cart() {
        let (mut store, storage, _notices) = store_with_memory();

        store.add_item(&tote(), 2);
        store.add_item(&hardcover(), 1);

        let reloaded = CartStore::restore(storage, Arc::new(SilentNotices));
        let snapshot = reloaded.snapshot();

        assert_eq!(snapshot.total_items, 3);
        assert_eq!(snapshot.subtotal, 6_800);
    }

    #[test]
    fn restore_degrades_corrupt_data_to_an_empty_cart() {
        let storage = Arc::new(MemoryStore::new());
        storage.preload(CART_KEY, "{not valid json");

        let store = CartStore::restore(storage, Arc::new(SilentNotices));

        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn restore_degrades_unreadable_storage_to_an_empty_cart() {
        let mut storage = MockKeyValueStore::new();
        storage
            .expect_get()
            .returning(|_| Err(StorageError::Io(std::io::Error::other("no disk"))));

        let store = CartStore::restore(Arc::new(storage), Arc::new(SilentNotices));

        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn every_mutation_persists_before_returning() {
        let (mut store, storage, _notices) = store_with_memory();

        store.add_item(&tote(), 1);

        let persisted = storage.get(CART_KEY).expect("get").expect("cart stored");
        let cart: Cart = serde_json::from_str(&persisted).expect("stored cart parses");

        assert_eq!(cart.total_items(), 1);

        store.update_quantity(&ProductId::new("tote"), 4);

        let persisted = storage.get(CART_KEY).expect("get").expect("cart stored");
        let cart: Cart = serde_json::from_str(&persisted).expect("stored cart parses");

        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn mutations_emit_notices_in_order() {
        let (mut store, _storage, notices) = store_with_memory();

        store.add_item(&tote(), 2);
        store.update_quantity(&ProductId::new("tote"), 5);
        store.remove_item(&ProductId::new("tote"));
        store.clear();

        let recorded = notices.drain();

        assert_eq!(
            recorded,
            vec![
                Notice::ItemAdded {
                    name: "Canvas Tote".to_owned(),
                    quantity: 2,
                },
                Notice::QuantityUpdated {
                    name: "Canvas Tote".to_owned(),
                    quantity: 5,
                },
                Notice::ItemRemoved {
                    name: "Canvas Tote".to_owned(),
                },
                Notice::CartCleared,
            ]
        );
    }

    #[test]
    fn removing_an_absent_line_emits_nothing() {
        let (mut store, _storage, notices) = store_with_memory();

        store.remove_item(&ProductId::new("never-added"));
        store.update_quantity(&ProductId::new("never-added"), 3);

        assert!(notices.drain().is_empty());
    }

    #[test]
    fn failed_persist_keeps_the_in_memory_cart() {
        let mut storage = MockKeyValueStore::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|_, _| Err(StorageError::Io(std::io::Error::other("disk full"))));

        let mut store = CartStore::restore(Arc::new(storage), Arc::new(SilentNotices));

        store.add_item(&tote(), 2);

        let snapshot = store.snapshot();

        assert_eq!(snapshot.total_items, 2);
        assert_eq!(snapshot.subtotal, 1_800);
    }
}
