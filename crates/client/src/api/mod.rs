//! Remote store API.
//!
//! # Endpoints
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | `GET` | `/api/food/list` | - |
//! | `POST` | `/api/cart/add` | `token` header |
//! | `POST` | `/api/cart/remove` | `token` header |
//! | `GET` | `/api/cart/get` | `token` header |
//! | `POST` | `/api/cart/clear` | `token` header |
//! | `POST` | `/api/order/place` | `token` header |
//!
//! The store is the source of truth for the catalog. The cart is mirrored on
//! a best-effort basis; see [`crate::cart`].
//!
//! # Example
//!
//! ```rust,ignore
//! use food_store_client::api::{HttpStoreApi, StoreApi};
//!
//! let api = HttpStoreApi::new(&config.api_url);
//! let catalog = api.list_foods().await?;
//! ```

mod client;
pub mod types;

pub use client::HttpStoreApi;
pub use types::*;

use async_trait::async_trait;
use food_store_core::{CartQuantities, CatalogItem, ItemId, OrderPayload, SessionToken};
use thiserror::Error;

/// Errors that can occur when talking to the remote store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, reset, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status code.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Start of the response body, for diagnostics.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The store reported a logical failure (`success: false`).
    #[error("Rejected by store: {0}")]
    Rejected(String),

    /// An endpoint URL could not be built from the configured base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Returns `true` for failures the store itself reported.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Operations the client needs from the remote store.
///
/// [`HttpStoreApi`] talks to the real store over HTTP. Tests provide
/// in-memory implementations.
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Fetch the full catalog.
    async fn list_foods(&self) -> Result<Vec<CatalogItem>, ApiError>;

    /// Add one unit of `item` to the remote cart.
    async fn add_to_cart(&self, token: &SessionToken, item: &ItemId) -> Result<(), ApiError>;

    /// Remove one unit of `item` from the remote cart.
    async fn remove_from_cart(&self, token: &SessionToken, item: &ItemId)
    -> Result<(), ApiError>;

    /// Fetch the remote cart snapshot.
    async fn get_cart(&self, token: &SessionToken) -> Result<CartQuantities, ApiError>;

    /// Empty the remote cart.
    async fn clear_cart(&self, token: &SessionToken) -> Result<(), ApiError>;

    /// Place an order.
    ///
    /// A `success: false` answer is returned as `Ok` so the caller can show
    /// the store's message; only transport and protocol failures are `Err`.
    async fn place_order(
        &self,
        token: &SessionToken,
        order: &OrderPayload,
    ) -> Result<PlaceOrderResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Rejected("Item not found".to_string());
        assert_eq!(err.to_string(), "Rejected by store: Item not found");
        assert!(err.is_rejection());

        let err = ApiError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
        assert!(!err.is_rejection());
    }
}
