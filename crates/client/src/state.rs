//! Session state.

use std::sync::Arc;

use food_store_core::SessionToken;
use tracing::info;

use crate::api::{HttpStoreApi, StoreApi};
use crate::cart::CartStore;
use crate::checkout::{CheckoutError, CheckoutFlow, CheckoutSettings};
use crate::config::ClientConfig;
use crate::error::{Result, add_breadcrumb};
use crate::services::{FileTokenStore, Navigator, Notifier, Route, TokenStore};
use crate::views::{CartView, CatalogView};

/// Everything one shopping session needs.
///
/// Owns the [`CartStore`]; views and checkout flows borrow it from here.
pub struct AppState {
    config: ClientConfig,
    cart: CartStore,
    token_store: Arc<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create a session from explicit collaborators.
    #[must_use]
    pub fn new(
        config: ClientConfig,
        api: Arc<dyn StoreApi>,
        token_store: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            cart: CartStore::new(api),
            token_store,
            notifier,
            navigator,
        }
    }

    /// Create a session that talks HTTP to the configured store and keeps the
    /// token in the configured file.
    #[must_use]
    pub fn http(
        config: ClientConfig,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let api = Arc::new(HttpStoreApi::new(&config.api_url));
        let token_store = Arc::new(FileTokenStore::new(config.token_file.clone()));
        Self::new(config, api, token_store, notifier, navigator)
    }

    /// Run the session start sequence (catalog, stored token, remote cart).
    pub async fn start(&mut self) {
        self.cart.initialize(self.token_store.as_ref()).await;
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Sign in with `token`: persist it, adopt it, and load the remote cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be written to durable storage.
    /// The session is left unchanged in that case.
    pub async fn login(&mut self, token: SessionToken) -> Result<()> {
        self.token_store.save(&token)?;
        self.cart.set_token(Some(token.clone()));
        add_breadcrumb("session", "Signed in", None);
        info!("Signed in");

        self.cart.load_cart_from_remote(&token).await;
        Ok(())
    }

    /// Sign out: forget the stored token and return to the home view.
    ///
    /// Local cart quantities are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored token cannot be removed.
    pub fn logout(&mut self) -> Result<()> {
        self.token_store.clear()?;
        self.cart.set_token(None);
        add_breadcrumb("session", "Signed out", None);
        info!("Signed out");

        self.navigator.navigate(Route::Home);
        Ok(())
    }

    /// The menu.
    #[must_use]
    pub fn catalog_view(&self) -> CatalogView {
        CatalogView::build(&self.cart, &self.config.api_url)
    }

    /// The cart with totals.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::build(&self.cart, self.config.delivery_fee, &self.config.api_url)
    }

    /// Checkout settings derived from configuration.
    #[must_use]
    pub const fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            delivery_fee: self.config.delivery_fee,
            order_redirect_delay: self.config.order_redirect_delay,
        }
    }

    /// Enter checkout for the current cart.
    ///
    /// # Errors
    ///
    /// Refused when signed out or when the cart total is zero; the user is
    /// sent back to the cart view.
    pub fn checkout(&self) -> std::result::Result<CheckoutFlow, CheckoutError> {
        CheckoutFlow::enter(
            &self.cart,
            Arc::clone(&self.notifier),
            Arc::clone(&self.navigator),
            self.checkout_settings(),
        )
    }

    /// Wait for background cart sync started so far.
    pub async fn settle(&mut self) {
        self.cart.settle().await;
    }
}
