//! Cart state container.
//!
//! [`CartStore`] is the single source of truth for one session's cart
//! quantities, session token, and catalog.
//!
//! # Consistency
//!
//! Mutations are optimistic: the local quantity changes immediately and is
//! visible to the next read. If the user is signed in, the change is then
//! mirrored to the remote store in a background task. That task is never
//! awaited by the mutation, never retried, and never rolled back: a failure
//! is logged and the local state keeps the user's intent. Two rapid mutations
//! on the same item may reach the store in either order.
//!
//! Loads (`load_catalog`, `load_cart_from_remote`) are awaited, but their
//! failures are also only logged; the previous state stays in place.

use std::sync::Arc;

use food_store_core::{
    CartQuantities, CatalogItem, ItemId, OrderItem, Price, SessionToken, cart_subtotal,
};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::api::{ApiError, StoreApi};
use crate::error::add_breadcrumb;
use crate::services::TokenStore;

/// Remote mutation mirrored in the background.
#[derive(Debug, Clone)]
enum SyncOp {
    Add(ItemId),
    Remove(ItemId),
    Clear,
}

impl SyncOp {
    const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add to cart",
            Self::Remove(_) => "remove from cart",
            Self::Clear => "clear cart",
        }
    }

    const fn item(&self) -> Option<&ItemId> {
        match self {
            Self::Add(id) | Self::Remove(id) => Some(id),
            Self::Clear => None,
        }
    }

    async fn send(&self, api: &dyn StoreApi, token: &SessionToken) -> Result<(), ApiError> {
        match self {
            Self::Add(id) => api.add_to_cart(token, id).await,
            Self::Remove(id) => api.remove_from_cart(token, id).await,
            Self::Clear => api.clear_cart(token).await,
        }
    }
}

/// Cart quantities, session token, and catalog for one session.
///
/// Owned by the session and mutated through `&mut self` only; views and the
/// checkout flow borrow it.
pub struct CartStore {
    api: Arc<dyn StoreApi>,
    catalog: Vec<CatalogItem>,
    quantities: CartQuantities,
    token: Option<SessionToken>,
    pending: JoinSet<()>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("catalog_len", &self.catalog.len())
            .field("quantities", &self.quantities)
            .field("signed_in", &self.token.is_some())
            .field("pending_sync", &self.pending.len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Public API
// =============================================================================

impl CartStore {
    /// Create an empty, anonymous cart backed by `api`.
    #[must_use]
    pub fn new(api: Arc<dyn StoreApi>) -> Self {
        Self {
            api,
            catalog: Vec::new(),
            quantities: CartQuantities::new(),
            token: None,
            pending: JoinSet::new(),
        }
    }

    /// Run the session start sequence.
    ///
    /// Loads the catalog first, then looks for a stored token. If one exists
    /// it becomes the session token and the remote cart is loaded. Neither a
    /// catalog failure nor a cart failure stops the sequence.
    pub async fn initialize(&mut self, token_store: &dyn TokenStore) {
        self.load_catalog().await;

        let stored = match token_store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token, continuing anonymously");
                None
            }
        };

        if let Some(token) = stored {
            self.token = Some(token.clone());
            self.load_cart_from_remote(&token).await;
        }

        info!(
            catalog_items = self.catalog.len(),
            signed_in = self.token.is_some(),
            "Session initialised"
        );
    }

    /// Replace the catalog with the store's current list.
    ///
    /// On failure the previous catalog is kept.
    pub async fn load_catalog(&mut self) {
        match self.api.list_foods().await {
            Ok(catalog) => {
                debug!(items = catalog.len(), "Catalog loaded");
                self.catalog = catalog;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch food list");
            }
        }
    }

    /// Replace local quantities with the store's snapshot for `token`.
    ///
    /// On failure the current quantities are kept.
    pub async fn load_cart_from_remote(&mut self, token: &SessionToken) {
        match self.api.get_cart(token).await {
            Ok(quantities) => {
                debug!(entries = quantities.len(), "Remote cart loaded");
                self.quantities = quantities;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load cart data");
            }
        }
    }

    /// Add one unit of `id`.
    ///
    /// The ID is not checked against the catalog.
    pub fn add_item(&mut self, id: &ItemId) {
        let quantity = self.quantities.entry(id.clone()).or_insert(0);
        *quantity = quantity.saturating_add(1);
        debug!(item_id = %id, quantity = *quantity, "Item added");
        add_breadcrumb("cart", "Added item", Some(&[("item_id", id.as_str())]));

        self.sync(SyncOp::Add(id.clone()));
    }

    /// Remove one unit of `id`, never going below zero.
    ///
    /// A zero entry is kept rather than removed.
    pub fn remove_item(&mut self, id: &ItemId) {
        let quantity = self.quantities.entry(id.clone()).or_insert(0);
        *quantity = quantity.saturating_sub(1);
        debug!(item_id = %id, quantity = *quantity, "Item removed");
        add_breadcrumb("cart", "Removed item", Some(&[("item_id", id.as_str())]));

        self.sync(SyncOp::Remove(id.clone()));
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.quantities.clear();
        debug!("Cart cleared");
        add_breadcrumb("cart", "Cleared cart", None);

        self.sync(SyncOp::Clear);
    }

    /// Sum of `price × quantity` over items present in the catalog.
    #[must_use]
    pub fn total_amount(&self) -> Price {
        cart_subtotal(&self.catalog, &self.quantities)
    }

    /// Catalog items with a positive quantity, each paired with its quantity.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItem> {
        OrderItem::collect(&self.catalog, &self.quantities)
    }

    /// Current quantity of `id` (zero if absent).
    #[must_use]
    pub fn quantity(&self, id: &ItemId) -> u32 {
        self.quantities.get(id).copied().unwrap_or(0)
    }

    /// All quantities, including zero entries.
    #[must_use]
    pub const fn quantities(&self) -> &CartQuantities {
        &self.quantities
    }

    /// Returns `true` if any item has a positive quantity.
    #[must_use]
    pub fn has_items(&self) -> bool {
        self.quantities.values().any(|quantity| *quantity > 0)
    }

    /// The catalog as last loaded.
    #[must_use]
    pub fn catalog(&self) -> &[CatalogItem] {
        &self.catalog
    }

    /// The session token, if signed in.
    #[must_use]
    pub const fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Replace the session token (login or logout).
    ///
    /// Local quantities are left alone.
    pub fn set_token(&mut self, token: Option<SessionToken>) {
        self.token = token;
    }

    /// The API this cart mirrors to.
    #[must_use]
    pub fn api(&self) -> Arc<dyn StoreApi> {
        Arc::clone(&self.api)
    }

    /// Number of background sync tasks not yet finished.
    #[must_use]
    pub fn pending_sync(&self) -> usize {
        self.pending.len()
    }

    /// Wait for every background sync task started so far.
    ///
    /// Does not change the order in which the store received them.
    pub async fn settle(&mut self) {
        while let Some(result) = self.pending.join_next().await {
            if let Err(e) = result {
                warn!(error = %e, "Cart sync task did not complete");
            }
        }
    }
}

// =============================================================================
// Private API
// =============================================================================

impl CartStore {
    /// Mirror a local mutation to the store if signed in.
    fn sync(&mut self, op: SyncOp) {
        let Some(token) = self.token.clone() else {
            return;
        };
        let api = Arc::clone(&self.api);

        // Reap finished tasks so the set does not grow for the whole session
        while self.pending.try_join_next().is_some() {}

        self.pending.spawn(async move {
            let result = op.send(api.as_ref(), &token).await;
            log_sync_result(&op, &result);
        });
    }
}

fn log_sync_result(op: &SyncOp, result: &Result<(), ApiError>) {
    match (result, op.item()) {
        (Ok(()), Some(id)) => debug!(item_id = %id, "{} synced", op.name()),
        (Ok(()), None) => debug!("{} synced", op.name()),
        (Err(e), Some(id)) => warn!(item_id = %id, error = %e, "Failed to {}", op.name()),
        (Err(e), None) => warn!(error = %e, "Failed to {}", op.name()),
    }
}
