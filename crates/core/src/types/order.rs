//! Order payload assembly.
//!
//! Everything in here is derived from the catalog, the cart quantities, and
//! the delivery draft at submission time. Nothing is stored.

use serde::{Deserialize, Serialize};

use super::{CartQuantities, CatalogItem, DeliveryAddress, PaymentMethod, Price};

/// Sum of `price × quantity` over cart entries with a positive quantity and a
/// matching catalog item. Entries without a catalog match contribute nothing.
#[must_use]
pub fn cart_subtotal(catalog: &[CatalogItem], quantities: &CartQuantities) -> Price {
    quantities
        .iter()
        .filter(|(_, quantity)| **quantity > 0)
        .filter_map(|(id, quantity)| {
            catalog
                .iter()
                .find(|item| &item.id == id)
                .map(|item| item.price.times(*quantity))
        })
        .sum()
}

/// A catalog item together with the quantity being ordered.
///
/// Serializes as the catalog item's own fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub quantity: u32,
}

impl OrderItem {
    /// Catalog items that have a positive quantity in the cart, in catalog order.
    ///
    /// Each entry is a copy; the catalog itself is left untouched.
    #[must_use]
    pub fn collect(catalog: &[CatalogItem], quantities: &CartQuantities) -> Vec<Self> {
        catalog
            .iter()
            .filter_map(|item| {
                let quantity = quantities.get(&item.id).copied().unwrap_or(0);
                (quantity > 0).then(|| Self {
                    item: item.clone(),
                    quantity,
                })
            })
            .collect()
    }

    /// Price of this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.item.price.times(self.quantity)
    }
}

/// Body of the order placement request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub address: DeliveryAddress,
    pub items: Vec<OrderItem>,
    /// Subtotal plus delivery fee (no fee when the subtotal is zero).
    pub amount: Price,
    pub payment_method: PaymentMethod,
}

impl OrderPayload {
    /// Assemble the payload for the current cart.
    #[must_use]
    pub fn assemble(
        address: &DeliveryAddress,
        catalog: &[CatalogItem],
        quantities: &CartQuantities,
        delivery_fee: Price,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            address: address.clone(),
            items: OrderItem::collect(catalog, quantities),
            amount: cart_subtotal(catalog, quantities).with_delivery_fee(delivery_fee),
            payment_method,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ItemId;

    fn item(id: &str, price: u32) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(id),
            name: format!("Dish {id}"),
            price: Price::from_units(price),
            description: "Tasty".to_string(),
            image: format!("{id}.png"),
            extra: serde_json::Map::new(),
        }
    }

    fn quantities(entries: &[(&str, u32)]) -> CartQuantities {
        entries
            .iter()
            .map(|(id, qty)| (ItemId::new(*id), *qty))
            .collect()
    }

    #[test]
    fn test_subtotal_sums_matched_entries() {
        let catalog = vec![item("a", 100), item("b", 40)];
        let cart = quantities(&[("a", 2), ("b", 3)]);
        assert_eq!(cart_subtotal(&catalog, &cart), Price::from_units(320));
    }

    #[test]
    fn test_subtotal_ignores_unknown_and_zero_entries() {
        let catalog = vec![item("a", 100), item("b", 40)];
        let cart = quantities(&[("a", 1), ("b", 0), ("ghost", 7)]);
        assert_eq!(cart_subtotal(&catalog, &cart), Price::from_units(100));
    }

    #[test]
    fn test_subtotal_of_empty_cart_is_zero() {
        let catalog = vec![item("a", 100)];
        assert_eq!(cart_subtotal(&catalog, &CartQuantities::new()), Price::ZERO);
    }

    #[test]
    fn test_collect_keeps_catalog_order_and_skips_zero() {
        let catalog = vec![item("b", 40), item("a", 100), item("c", 10)];
        let cart = quantities(&[("a", 2), ("b", 1), ("c", 0)]);

        let items = OrderItem::collect(&catalog, &cart);
        let ids: Vec<_> = items.iter().map(|i| i.item.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(items[1].quantity, 2);
        assert_eq!(items[1].line_total(), Price::from_units(200));
    }

    #[test]
    fn test_collect_does_not_touch_catalog() {
        let catalog = vec![item("a", 100)];
        let before = catalog.clone();
        let _ = OrderItem::collect(&catalog, &quantities(&[("a", 5)]));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_payload_amount_includes_delivery_fee() {
        let catalog = vec![item("a", 100)];
        let payload = OrderPayload::assemble(
            &DeliveryAddress::default(),
            &catalog,
            &quantities(&[("a", 2)]),
            Price::from_units(59),
            PaymentMethod::Cod,
        );
        assert_eq!(payload.amount, Price::from_units(259));
    }

    #[test]
    fn test_payload_wire_format() {
        let catalog = vec![item("a", 100)];
        let payload = OrderPayload::assemble(
            &DeliveryAddress::default(),
            &catalog,
            &quantities(&[("a", 2)]),
            Price::from_units(59),
            PaymentMethod::Stripe,
        );

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["paymentMethod"], "stripe");
        assert_eq!(json["amount"], json!(259.0));
        assert_eq!(json["items"][0]["_id"], "a");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["address"]["firstName"], "");
    }
}
