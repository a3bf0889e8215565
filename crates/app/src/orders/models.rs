//! Order placement models.

use jiff::Timestamp;
use serde::Deserialize;

/// A placed order as acknowledged by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderConfirmation {
    /// Backend-assigned order id.
    pub order_id: String,

    /// When the order was accepted.
    pub placed_at: Timestamp,
}
