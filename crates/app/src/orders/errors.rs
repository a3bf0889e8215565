//! Orders collaborator errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersError {
    /// The backend refused the order; the message is shown to the shopper.
    #[error("order was not accepted: {0}")]
    Rejected(String),

    #[error("order request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from order service: {0}")]
    UnexpectedResponse(String),
}
