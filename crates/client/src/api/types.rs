//! Wire types for the remote store API.
//!
//! These mirror the JSON bodies exactly; domain types live in
//! `food_store_core`.

use food_store_core::{CartQuantities, CatalogItem, ItemId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Body of `POST /api/cart/add` and `POST /api/cart/remove`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub item_id: ItemId,
}

/// Generic acknowledgement returned by cart mutations.
///
/// Older store deployments answer with an empty body, so every field is
/// optional and a missing `success` counts as success.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AckResponse {
    /// Returns `true` unless the store explicitly reported a failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }
}

/// Response of `GET /api/food/list`.
///
/// Entries are kept as raw JSON so one malformed item cannot spoil the rest;
/// see [`FoodListResponse::into_items`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodListResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

impl FoodListResponse {
    /// Decode each entry on its own, skipping (and logging) any that do not
    /// form a catalog item.
    #[must_use]
    pub fn into_items(self) -> Vec<CatalogItem> {
        self.data
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let id = raw
                    .get("_id")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string);
                match serde_json::from_value::<CatalogItem>(raw) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        warn!(
                            index,
                            item_id = ?id,
                            error = %e,
                            "Skipping malformed catalog item"
                        );
                        None
                    }
                }
            })
            .collect()
    }
}

/// Response of `GET /api/cart/get`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartDataResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(rename = "cartData", default)]
    pub cart_data: CartQuantities,
}

/// Response of `POST /api/order/place`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Hosted payment page for online orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_url: Option<String>,
}
