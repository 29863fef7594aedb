//! Cart commands.

use food_store_client::error::{AppError, Result};
use food_store_client::state::AppState;
use food_store_core::ItemId;
use tracing::warn;

use super::render;

fn parse_ids(ids: &[String]) -> Result<Vec<ItemId>> {
    ids.iter()
        .map(|raw| {
            let id = ItemId::new(raw.trim());
            if id.is_empty() {
                Err(AppError::BadRequest("item ID cannot be empty".to_string()))
            } else {
                Ok(id)
            }
        })
        .collect()
}

/// Add one unit per listed ID, then show the cart.
pub fn add(state: &mut AppState, ids: &[String]) -> Result<()> {
    for id in parse_ids(ids)? {
        if !state.cart().catalog().iter().any(|item| item.id == id) {
            warn!(item_id = %id, "Item is not on the current menu");
        }
        state.cart_mut().add_item(&id);
    }
    render::cart(&state.cart_view());
    Ok(())
}

/// Remove one unit per listed ID, then show the cart.
pub fn remove(state: &mut AppState, ids: &[String]) -> Result<()> {
    for id in parse_ids(ids)? {
        state.cart_mut().remove_item(&id);
    }
    render::cart(&state.cart_view());
    Ok(())
}

pub fn clear(state: &mut AppState) {
    state.cart_mut().clear_cart();
    render::cart(&state.cart_view());
}
