//! Storefront session runtime: cart ownership and persistence, collaborator
//! boundaries, and single-submit checkout over the `vitrine` domain engine.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod context;
pub mod identity;
pub mod orders;
pub mod storage;
