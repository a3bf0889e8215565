//! Catalog collaborator errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product not found")]
    NotFound,

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from catalog: {0}")]
    UnexpectedResponse(String),
}
