//! Catalog view model.

use food_store_core::{ItemId, Price};
use tracing::warn;
use url::Url;

use super::image_url;
use crate::cart::CartStore;

/// One dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItemView {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub image_url: String,
    /// Units of this item currently in the cart.
    pub quantity: u32,
}

/// The menu as shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    pub items: Vec<CatalogItemView>,
}

impl CatalogView {
    /// Build the menu from the cart's catalog.
    ///
    /// Items missing an id, name, description, or image, or priced at zero,
    /// are left out.
    #[must_use]
    pub fn build(cart: &CartStore, image_base: &Url) -> Self {
        let items = cart
            .catalog()
            .iter()
            .filter(|item| {
                let displayable = item.is_displayable();
                if !displayable {
                    warn!(item_id = %item.id, name = %item.name, "Skipping incomplete catalog item");
                }
                displayable
            })
            .map(|item| CatalogItemView {
                id: item.id.clone(),
                name: item.name.clone(),
                price: item.price,
                description: item.description.clone(),
                image_url: image_url(image_base, &item.image),
                quantity: cart.quantity(&item.id),
            })
            .collect();

        Self { items }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
