//! App Context

use std::sync::Arc;

use thiserror::Error;
use vitrine::prelude::{CheckoutPolicy, PolicyError};

use crate::{
    catalog::{CatalogApi, CatalogConfig, HttpCatalogApi},
    config::AppConfig,
    identity::{HttpIdentityProvider, IdentityConfig, IdentityProvider},
    orders::{HttpOrdersApi, OrdersApi, OrdersConfig},
    storage::{FileStore, KeyValueStore, StorageError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open state storage")]
    Storage(#[source] StorageError),

    #[error("invalid checkout policy settings")]
    Policy(#[source] PolicyError),
}

/// Shared collaborator handles plus the pricing policy.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogApi>,
    pub orders: Arc<dyn OrdersApi>,
    pub identity: Arc<dyn IdentityProvider>,
    pub storage: Arc<dyn KeyValueStore>,
    pub policy: CheckoutPolicy,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the policy settings do not parse or the state
    /// file exists but cannot be read.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let policy = config
            .policy
            .checkout_policy()
            .map_err(AppInitError::Policy)?;

        let storage =
            FileStore::open(&config.storage.state_path).map_err(AppInitError::Storage)?;

        let base_url = &config.api.base_url;

        Ok(Self {
            catalog: Arc::new(HttpCatalogApi::new(CatalogConfig {
                base_url: base_url.clone(),
            })),
            orders: Arc::new(HttpOrdersApi::new(OrdersConfig {
                base_url: base_url.clone(),
            })),
            identity: Arc::new(HttpIdentityProvider::new(IdentityConfig {
                base_url: base_url.clone(),
            })),
            storage: Arc::new(storage),
            policy,
        })
    }

    /// Build application context from already constructed parts.
    #[must_use]
    pub fn from_parts(
        catalog: Arc<dyn CatalogApi>,
        orders: Arc<dyn OrdersApi>,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn KeyValueStore>,
        policy: CheckoutPolicy,
    ) -> Self {
        Self {
            catalog,
            orders,
            identity,
            storage,
            policy,
        }
    }
}
