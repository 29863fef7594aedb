//! View models.
//!
//! Plain data derived from a [`CartStore`](crate::cart::CartStore) for a front
//! end to render. Nothing here talks to the network or mutates the cart.

mod cart;
mod catalog;

pub use cart::{CartItemView, CartView};
pub use catalog::{CatalogItemView, CatalogView};

use url::Url;

/// Resolve a catalog image file name against the store's base URL.
///
/// Images are served from `<base>/images/<file>`.
#[must_use]
pub fn image_url(base: &Url, file: &str) -> String {
    format!("{}/images/{file}", base.as_str().trim_end_matches('/'))
}
