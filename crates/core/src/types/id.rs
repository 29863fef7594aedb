//! Newtype IDs for type-safe entity references.
//!
//! Catalog identifiers are opaque strings assigned by the remote store
//! (serialized as `_id` on catalog items and as `itemId` in cart requests).
//! Wrapping them prevents mixing item IDs with other free-form strings such
//! as tokens or address fields.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog item.
///
/// The remote store is the source of truth for identifiers, so no validation
/// is applied: any string the store hands out is a valid `ItemId`, and cart
/// operations accept IDs that are not (yet) in the local catalog.
///
/// # Example
///
/// ```rust
/// # use food_store_core::ItemId;
/// let id = ItemId::new("66a1f0c2e4b0");
/// assert_eq!(id.as_str(), "66a1f0c2e4b0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is the empty string.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
