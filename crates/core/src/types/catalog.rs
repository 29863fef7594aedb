//! Catalog and cart content types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ItemId, Price};

/// Quantity per item, as held locally and as returned by the remote cart.
///
/// A zero entry means the same as a missing one.
pub type CartQuantities = BTreeMap<ItemId, u32>;

/// A dish offered by the store, as returned by the food list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub id: ItemId,
    /// Missing name or price decode as empty/zero; see [`Self::is_displayable`].
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub description: String,
    /// Image file name, resolved against `<api>/images/`.
    #[serde(default)]
    pub image: String,
    /// Fields this client does not interpret (category, version, ...).
    ///
    /// Kept so that order items are faithful copies of what the store sent.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CatalogItem {
    /// Returns `true` if every field needed to display the item is present.
    ///
    /// Items priced at zero are treated as incomplete.
    #[must_use]
    pub fn is_displayable(&self) -> bool {
        !self.id.is_empty()
            && !self.name.is_empty()
            && !self.price.is_zero()
            && !self.description.is_empty()
            && !self.image.is_empty()
    }
}
