//! Durable key-value storage boundary.

mod file;
mod memory;

use mockall::automock;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Storage key holding the last signed-in email address.
pub const REMEMBERED_EMAIL_KEY: &str = "remembered_email";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be encoded or decoded.
    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Synchronous string key-value storage.
///
/// Writes are durable by the time the call returns; the cart store relies on
/// this when persisting after every mutation.
#[automock]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the write does not complete.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` if present. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the write does not complete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
