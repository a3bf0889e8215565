//! App configuration.

use std::path::PathBuf;

use clap::{Args, Parser};
use thiserror::Error;
use vitrine::prelude::{CheckoutPolicy, PolicyError};

/// Vitrine storefront runtime configuration
#[derive(Debug, Parser)]
#[command(name = "vitrine", about = "Vitrine storefront runtime", long_about = None)]
pub struct AppConfig {
    /// Backend endpoint settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local state settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Checkout pricing settings.
    #[command(flatten)]
    pub policy: PolicyConfig,
}

/// Storefront backend endpoint settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL serving the catalog, order and auth endpoints
    #[arg(long, env = "STORE_API_URL", default_value = "http://localhost:4000")]
    pub base_url: String,
}

/// Local durable state settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Path of the state file holding the cart and remembered email
    #[arg(long, env = "STORE_STATE_PATH", default_value = "vitrine-state.json")]
    pub state_path: PathBuf,
}

/// Checkout pricing settings.
#[derive(Debug, Args)]
pub struct PolicyConfig {
    /// Subtotal above which shipping is free, in major units
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value = "100.00")]
    pub free_shipping_threshold: String,

    /// Flat shipping fee below the threshold, in major units
    #[arg(long, env = "SHIPPING_FLAT_FEE", default_value = "10.00")]
    pub shipping_flat_fee: String,

    /// Tax rate applied to the subtotal, e.g. "8%" or "0.08"
    #[arg(long, env = "TAX_RATE", default_value = "8%")]
    pub tax_rate: String,

    /// ISO currency code used for display
    #[arg(long, env = "STORE_CURRENCY", default_value = "USD")]
    pub currency: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("invalid checkout policy settings")]
    Policy(#[from] PolicyError),
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Ok(Self::try_parse()?)
    }
}

impl PolicyConfig {
    /// Build the checkout policy these settings describe.
    ///
    /// # Errors
    ///
    /// Returns a `PolicyError` if an amount, rate or currency cannot be
    /// parsed.
    pub fn checkout_policy(&self) -> Result<CheckoutPolicy, PolicyError> {
        CheckoutPolicy::parse(
            &self.free_shipping_threshold,
            &self.shipping_flat_fee,
            &self.tax_rate,
            &self.currency,
        )
    }
}
