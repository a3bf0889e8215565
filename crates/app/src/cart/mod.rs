//! Session cart ownership and persistence.

mod notices;
mod store;

pub use notices::*;
pub use store::CartStore;
