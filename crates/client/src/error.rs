//! Unified error handling with Sentry integration.
//!
//! Most failures in a session are logged and swallowed where they happen (see
//! [`crate::cart`]). `AppError` covers the few that reach the front end:
//! configuration problems, token storage, and refused checkouts.

use thiserror::Error;

use crate::api::ApiError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::services::TokenStoreError;

/// Application-level error type for the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote store operation failed.
    #[error("Store error: {0}")]
    Api(#[from] ApiError),

    /// Durable token storage failed.
    #[error("Token storage error: {0}")]
    TokenStore(#[from] TokenStoreError),

    /// Checkout could not be started.
    #[error("Checkout unavailable: {0}")]
    Checkout(#[from] CheckoutError),

    /// The store did not accept the order.
    #[error("Order not placed: {0}")]
    OrderNotPlaced(String),

    /// Bad input from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Log the error and capture it to Sentry if it indicates a fault rather
    /// than a user mistake.
    pub fn report(&self) {
        if matches!(self, Self::Config(_) | Self::Api(_) | Self::TokenStore(_)) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command failed"
            );
        } else {
            tracing::warn!(error = %self, "Command rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error. Without an initialised Sentry client this is a no-op.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("item_id", "66a1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
