//! HTTP implementation of [`StoreApi`] using `reqwest`.

use std::sync::Arc;

use async_trait::async_trait;
use food_store_core::{CartQuantities, CatalogItem, ItemId, OrderPayload, SessionToken};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::types::{
    AckResponse, CartDataResponse, CartItemRequest, FoodListResponse, PlaceOrderResponse,
};
use super::{ApiError, StoreApi};

/// Name of the header carrying the session token.
const TOKEN_HEADER: &str = "token";

/// How much of an error body to keep for logs and error messages.
const ERROR_BODY_PREVIEW: usize = 200;

/// Client for the remote store's REST API.
///
/// Cheap to clone; clones share one connection pool. No timeout is set on
/// requests.
#[derive(Clone)]
pub struct HttpStoreApi {
    inner: Arc<HttpStoreApiInner>,
}

struct HttpStoreApiInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for HttpStoreApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpStoreApi")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpStoreApi {
    /// Create a new client for the store at `base_url`.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        // Url::join replaces the last path segment unless the base ends in '/'
        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            inner: Arc::new(HttpStoreApiInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Base URL all endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request and decode the JSON body.
    ///
    /// An empty body decodes as `T::default()`.
    async fn execute<T>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Default,
    {
        let response = request.send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Store API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(ERROR_BODY_PREVIEW).collect(),
            });
        }

        if response_text.trim().is_empty() {
            return Ok(T::default());
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse store API response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a cart mutation and turn `success: false` into [`ApiError::Rejected`].
    async fn acknowledge(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let ack: AckResponse = self.execute(request).await?;
        if ack.is_success() {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                ack.message.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }
}

#[async_trait]
impl StoreApi for HttpStoreApi {
    #[instrument(skip(self))]
    async fn list_foods(&self) -> Result<Vec<CatalogItem>, ApiError> {
        let url = self.endpoint("api/food/list")?;
        let response: FoodListResponse = self.execute(self.inner.client.get(url)).await?;
        if response.success == Some(false) {
            return Err(ApiError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "food list unavailable".to_string()),
            ));
        }
        let received = response.data.len();
        let items = response.into_items();
        debug!(received, items = items.len(), "Fetched food list");
        Ok(items)
    }

    #[instrument(skip(self, token), fields(item_id = %item))]
    async fn add_to_cart(&self, token: &SessionToken, item: &ItemId) -> Result<(), ApiError> {
        let url = self.endpoint("api/cart/add")?;
        let request = self
            .inner
            .client
            .post(url)
            .header(TOKEN_HEADER, token.expose())
            .json(&CartItemRequest {
                item_id: item.clone(),
            });
        self.acknowledge(request).await
    }

    #[instrument(skip(self, token), fields(item_id = %item))]
    async fn remove_from_cart(
        &self,
        token: &SessionToken,
        item: &ItemId,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("api/cart/remove")?;
        let request = self
            .inner
            .client
            .post(url)
            .header(TOKEN_HEADER, token.expose())
            .json(&CartItemRequest {
                item_id: item.clone(),
            });
        self.acknowledge(request).await
    }

    #[instrument(skip(self, token))]
    async fn get_cart(&self, token: &SessionToken) -> Result<CartQuantities, ApiError> {
        let url = self.endpoint("api/cart/get")?;
        let response: CartDataResponse = self
            .execute(self.inner.client.get(url).header(TOKEN_HEADER, token.expose()))
            .await?;
        if response.success == Some(false) {
            return Err(ApiError::Rejected("cart lookup failed".to_string()));
        }
        debug!(entries = response.cart_data.len(), "Fetched remote cart");
        Ok(response.cart_data)
    }

    #[instrument(skip(self, token))]
    async fn clear_cart(&self, token: &SessionToken) -> Result<(), ApiError> {
        let url = self.endpoint("api/cart/clear")?;
        let request = self
            .inner
            .client
            .post(url)
            .header(TOKEN_HEADER, token.expose())
            .json(&serde_json::json!({}));
        self.acknowledge(request).await
    }

    #[instrument(skip(self, token, order), fields(payment_method = %order.payment_method, amount = %order.amount))]
    async fn place_order(
        &self,
        token: &SessionToken,
        order: &OrderPayload,
    ) -> Result<PlaceOrderResponse, ApiError> {
        let url = self.endpoint("api/order/place")?;
        let request = self
            .inner
            .client
            .post(url)
            .header(TOKEN_HEADER, token.expose())
            .json(order);
        self.execute(request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let api = HttpStoreApi::new(&Url::parse("https://store.example.com").unwrap());
        assert_eq!(
            api.endpoint("api/food/list").unwrap().as_str(),
            "https://store.example.com/api/food/list"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = HttpStoreApi::new(&Url::parse("https://example.com/store").unwrap());
        assert_eq!(
            api.endpoint("api/cart/add").unwrap().as_str(),
            "https://example.com/store/api/cart/add"
        );
        assert_eq!(api.base_url().as_str(), "https://example.com/store/");
    }

    #[test]
    fn test_debug_shows_base_url() {
        let api = HttpStoreApi::new(&Url::parse("http://localhost:4000").unwrap());
        assert!(format!("{api:?}").contains("http://localhost:4000/"));
    }
}
