//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FOOD_STORE_API_URL` - Base URL of the remote store (default: `http://localhost:4000`)
//! - `FOOD_STORE_DELIVERY_FEE` - Flat delivery fee added to non-empty orders (default: 59)
//! - `FOOD_STORE_TOKEN_FILE` - File holding the session token (default: `.food-store-token`)
//! - `FOOD_STORE_ORDER_REDIRECT_DELAY_MS` - Pause between a cash-on-delivery
//!   confirmation and the order history view (default: 1500)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use food_store_core::Price;
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:4000";
const DEFAULT_DELIVERY_FEE: &str = "59";
const DEFAULT_TOKEN_FILE: &str = ".food-store-token";
const DEFAULT_ORDER_REDIRECT_DELAY_MS: &str = "1500";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote store API (also serves `/images/`)
    pub api_url: Url,
    /// Flat delivery fee for non-empty orders
    pub delivery_fee: Price,
    /// File holding the durable session token
    pub token_file: PathBuf,
    /// Pause between a cash-on-delivery confirmation and the order history view
    pub order_redirect_delay: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_url(
            "FOOD_STORE_API_URL",
            &get_env_or_default("FOOD_STORE_API_URL", DEFAULT_API_URL),
        )?;
        let delivery_fee = parse_price(
            "FOOD_STORE_DELIVERY_FEE",
            &get_env_or_default("FOOD_STORE_DELIVERY_FEE", DEFAULT_DELIVERY_FEE),
        )?;
        let token_file =
            PathBuf::from(get_env_or_default("FOOD_STORE_TOKEN_FILE", DEFAULT_TOKEN_FILE));
        let order_redirect_delay = get_env_or_default(
            "FOOD_STORE_ORDER_REDIRECT_DELAY_MS",
            DEFAULT_ORDER_REDIRECT_DELAY_MS,
        )
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| {
            ConfigError::InvalidEnvVar(
                "FOOD_STORE_ORDER_REDIRECT_DELAY_MS".to_string(),
                e.to_string(),
            )
        })?;

        Ok(Self {
            api_url,
            delivery_fee,
            token_file,
            order_redirect_delay,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration pointing at `api_url` with every other value defaulted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_url` is not a valid URL.
    pub fn for_api_url(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_url("api_url", api_url)?,
            delivery_fee: Price::from_units(59),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            order_redirect_delay: Duration::from_millis(1500),
            sentry_dsn: None,
            sentry_environment: None,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an absolute http(s) URL.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// Parse a non-negative decimal amount.
fn parse_price(key: &str, value: &str) -> Result<Price, ConfigError> {
    let amount = Decimal::from_str(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Price::new(amount).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
