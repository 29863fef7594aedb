//! Plain-text rendering of view models.

#![allow(clippy::print_stdout)]

use food_store_client::views::{CartView, CatalogView};
use food_store_core::Price;

pub fn menu(view: &CatalogView) {
    if view.is_empty() {
        println!("The menu is empty.");
        return;
    }

    for item in &view.items {
        let in_cart = if item.quantity > 0 {
            format!("  [{} in cart]", item.quantity)
        } else {
            String::new()
        };
        println!("{:<26} {:<28} {:>10}{in_cart}", item.id, item.name, item.price);
        println!("    {}", item.description);
    }
}

pub fn cart(view: &CartView) {
    if !view.has_items() {
        println!("Your cart is empty.");
        return;
    }

    println!("{:<28} {:>10} {:>5} {:>10}", "Item", "Price", "Qty", "Total");
    for line in &view.items {
        println!(
            "{:<28} {:>10} {:>5} {:>10}",
            line.name, line.price, line.quantity, line.line_total
        );
    }
    println!();
    totals(view.subtotal, view.delivery_fee, view.total);
}

pub fn order_summary(subtotal: Price, delivery_fee: Price, total: Price) {
    println!("Placing order:");
    totals(subtotal, delivery_fee, total);
}

fn totals(subtotal: Price, delivery_fee: Price, total: Price) {
    println!("{:<20} {:>10}", "Subtotal", subtotal);
    println!("{:<20} {:>10}", "Delivery Fee", delivery_fee);
    println!("{:<20} {:>10}", "Total", total);
}
