//! Identity collaborator errors.

use thiserror::Error;

/// Errors from sign-in, sign-up and verification flows.
///
/// Display strings are written for the shopper; raw transport detail stays in
/// the source chain.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("verification code is invalid or has expired")]
    CodeRejected,

    /// Input failed validation before any request was made.
    #[error("{0}")]
    Invalid(String),

    #[error("identity request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from identity provider: {0}")]
    UnexpectedResponse(String),
}
