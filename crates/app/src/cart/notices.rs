//! User-facing cart notifications.

use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

/// What a cart mutation changed, phrased for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A product was added, or an existing line grew by merging.
    ItemAdded {
        /// Product name
        name: String,

        /// Units added by this mutation
        quantity: u32,
    },

    /// A line was removed outright.
    ItemRemoved {
        /// Product name
        name: String,
    },

    /// A line was set to a new absolute quantity.
    QuantityUpdated {
        /// Product name
        name: String,

        /// The quantity the line now carries
        quantity: u32,
    },

    /// Every line was removed.
    CartCleared,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ItemAdded { name, quantity } => {
                write!(f, "Added {name} (x{quantity}) to your cart")
            }
            Notice::ItemRemoved { name } => write!(f, "Removed {name} from your cart"),
            Notice::QuantityUpdated { name, quantity } => {
                write!(f, "Set {name} quantity to {quantity}")
            }
            Notice::CartCleared => f.write_str("Your cart is now empty"),
        }
    }
}

/// Receives notices as cart mutations happen.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Sink that drops every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotices;

impl NoticeSink for SilentNotices {
    fn notify(&self, _notice: Notice) {}
}

/// Sink that records notices for later inspection.
#[derive(Debug, Default)]
pub struct RecordedNotices {
    notices: Mutex<Vec<Notice>>,
}

impl RecordedNotices {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes everything recorded so far, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(
            &mut *self
                .notices
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl NoticeSink for RecordedNotices {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_render_for_display() {
        let added = Notice::ItemAdded {
            name: "Canvas Tote".to_owned(),
            quantity: 2,
        };

        assert_eq!(added.to_string(), "Added Canvas Tote (x2) to your cart");
        assert_eq!(Notice::CartCleared.to_string(), "Your cart is now empty");
    }

    #[test]
    fn recorded_notices_drain_in_order() {
        let sink = RecordedNotices::new();

        sink.notify(Notice::CartCleared);
        sink.notify(Notice::ItemRemoved {
            name: "Brass Bookmark".to_owned(),
        });

        let drained = sink.drain();

        assert_eq!(drained.len(), 2);
        assert_eq!(drained.first(), Some(&Notice::CartCleared));
        assert!(sink.drain().is_empty());
    }
}
