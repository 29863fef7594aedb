//! Cart view model.

use food_store_core::{ItemId, OrderItem, Price};
use url::Url;

use super::image_url;
use crate::cart::CartStore;

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    pub line_total: Price,
    pub image_url: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub total: Price,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::ZERO,
            delivery_fee: Price::ZERO,
            total: Price::ZERO,
        }
    }

    /// Build the cart view. The delivery fee and total are zero while the
    /// subtotal is zero.
    #[must_use]
    pub fn build(cart: &CartStore, delivery_fee: Price, image_base: &Url) -> Self {
        let subtotal = cart.total_amount();
        Self {
            items: cart
                .order_items()
                .iter()
                .map(|line| CartItemView::from_line(line, image_base))
                .collect(),
            subtotal,
            delivery_fee: subtotal.delivery_fee_for(delivery_fee),
            total: subtotal.with_delivery_fee(delivery_fee),
        }
    }

    /// Returns `true` if there is anything to check out.
    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

impl CartItemView {
    fn from_line(line: &OrderItem, image_base: &Url) -> Self {
        Self {
            id: line.item.id.clone(),
            name: line.item.name.clone(),
            price: line.item.price,
            quantity: line.quantity,
            line_total: line.line_total(),
            image_url: image_url(image_base, &line.item.image),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::{FakeStoreApi, catalog_item};

    fn base() -> Url {
        Url::parse("http://localhost:4000").unwrap()
    }

    #[tokio::test]
    async fn test_build_lines_and_totals() {
        let api = FakeStoreApi::with_catalog(vec![catalog_item("A", 100), catalog_item("B", 30)]);
        let mut cart = CartStore::new(Arc::new(api));
        cart.load_catalog().await;
        cart.add_item(&ItemId::new("A"));
        cart.add_item(&ItemId::new("A"));
        cart.add_item(&ItemId::new("ghost"));

        let view = CartView::build(&cart, Price::from_units(59), &base());

        assert!(view.has_items());
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].line_total, Price::from_units(200));
        assert_eq!(view.item_count(), 2);
        assert_eq!(view.subtotal, Price::from_units(200));
        assert_eq!(view.delivery_fee, Price::from_units(59));
        assert_eq!(view.total, Price::from_units(259));
    }

    #[tokio::test]
    async fn test_empty_cart_waives_delivery_fee() {
        let api = FakeStoreApi::with_catalog(vec![catalog_item("A", 100)]);
        let mut cart = CartStore::new(Arc::new(api));
        cart.load_catalog().await;
        cart.add_item(&ItemId::new("A"));
        cart.remove_item(&ItemId::new("A"));

        let view = CartView::build(&cart, Price::from_units(59), &base());

        assert!(!view.has_items());
        assert_eq!(view, CartView::empty());
    }
}
