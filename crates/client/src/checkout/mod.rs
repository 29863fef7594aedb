//! Checkout flow.
//!
//! Collects the delivery address and places the order through one of two
//! paths:
//!
//! - **Online payment**: the store creates a hosted payment session and
//!   answers with its URL; the user is redirected there and the flow ends.
//! - **Cash on delivery**: the address is checked field by field first. Once
//!   the store accepts the order the cart is cleared and, after a short pause,
//!   the user is taken to their order history.
//!
//! Any failure shows a notification and returns the flow to editing with the
//! draft address intact. The cart is only ever cleared after a successful
//! cash-on-delivery order.

mod state;

pub use state::{CheckoutOutcome, CheckoutState};

use std::sync::Arc;
use std::time::Duration;

use food_store_core::{
    AddressError, AddressField, DeliveryAddress, OrderPayload, PaymentMethod, Price,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, PlaceOrderResponse, StoreApi};
use crate::cart::CartStore;
use crate::error::add_breadcrumb;
use crate::services::{Navigator, Notifier, Route};

/// Reasons the checkout cannot be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// No session token.
    #[error("sign in to place an order")]
    NotSignedIn,
    /// Cart total is zero.
    #[error("cart is empty")]
    EmptyCart,
}

/// Settings for a checkout session.
#[derive(Debug, Clone, Copy)]
pub struct CheckoutSettings {
    /// Flat delivery fee added to non-empty orders.
    pub delivery_fee: Price,
    /// Pause between a cash-on-delivery confirmation and the order history view.
    pub order_redirect_delay: Duration,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            delivery_fee: Price::from_units(59),
            order_redirect_delay: Duration::from_millis(1500),
        }
    }
}

/// One checkout session: the delivery draft plus the submission state.
pub struct CheckoutFlow {
    api: Arc<dyn StoreApi>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    settings: CheckoutSettings,
    draft: DeliveryAddress,
    state: CheckoutState,
    last_error: Option<String>,
}

impl std::fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("settings", &self.settings)
            .field("draft", &self.draft)
            .field("state", &self.state)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl CheckoutFlow {
    /// Start a checkout for `cart`.
    ///
    /// # Errors
    ///
    /// Refuses entry, after sending the user back to the cart view, if the
    /// session has no token or the cart total is zero.
    pub fn enter(
        cart: &CartStore,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        settings: CheckoutSettings,
    ) -> Result<Self, CheckoutError> {
        let refusal = if cart.token().is_none() {
            Some(CheckoutError::NotSignedIn)
        } else if cart.total_amount().is_zero() {
            Some(CheckoutError::EmptyCart)
        } else {
            None
        };

        if let Some(reason) = refusal {
            debug!(reason = %reason, "Checkout not available");
            navigator.navigate(Route::Cart);
            return Err(reason);
        }

        add_breadcrumb("checkout", "Entered checkout", None);
        Ok(Self {
            api: cart.api(),
            notifier,
            navigator,
            settings,
            draft: DeliveryAddress::default(),
            state: CheckoutState::Editing,
            last_error: None,
        })
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The delivery draft.
    #[must_use]
    pub const fn draft(&self) -> &DeliveryAddress {
        &self.draft
    }

    /// Message of the most recent failed submission.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Subtotal, delivery fee, and total for `cart` as shown on the form.
    #[must_use]
    pub fn totals(&self, cart: &CartStore) -> (Price, Price, Price) {
        let subtotal = cart.total_amount();
        (
            subtotal,
            subtotal.delivery_fee_for(self.settings.delivery_fee),
            subtotal.with_delivery_fee(self.settings.delivery_fee),
        )
    }

    /// Update one field of the draft. No validation happens here.
    pub fn on_field_change(&mut self, field: AddressField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Place an online-payment order and hand the user to the payment page.
    pub async fn submit_online(&mut self, cart: &CartStore) -> CheckoutOutcome {
        if !self.state.is_editable() {
            return CheckoutOutcome::Busy;
        }
        self.transition(CheckoutState::SubmittingOnline);
        add_breadcrumb("checkout", "Submitted online payment order", None);

        match self.place(cart, PaymentMethod::Stripe).await {
            Ok(PlaceOrderResponse {
                success: true,
                session_url: Some(session_url),
                ..
            }) => {
                info!("Online payment session created");
                self.transition(CheckoutState::Completed);
                self.navigator.redirect(&session_url);
                CheckoutOutcome::Redirected { session_url }
            }
            Ok(PlaceOrderResponse {
                success: true,
                session_url: None,
                ..
            }) => {
                error!("Store accepted online order without a payment session URL");
                self.fail("Stripe Order Failed".to_string())
            }
            Ok(PlaceOrderResponse { message, .. }) => {
                let message = format!("Stripe Error: {}", message.unwrap_or_default());
                self.fail(message)
            }
            Err(e) => {
                error!(error = %e, "Online payment order failed");
                self.fail("Stripe Order Failed".to_string())
            }
        }
    }

    /// Validate the draft and place a cash-on-delivery order.
    ///
    /// On success the cart is cleared and, after the configured delay, the
    /// user is taken to the order history view.
    pub async fn submit_cod(&mut self, cart: &mut CartStore) -> CheckoutOutcome {
        if !self.state.is_editable() {
            return CheckoutOutcome::Busy;
        }
        self.transition(CheckoutState::ValidatingCod);

        if let Err(e @ AddressError::Missing(field)) = self.draft.validate() {
            warn!(field = %field, "Delivery address incomplete");
            self.notifier.warn(&e.to_string());
            self.transition(CheckoutState::Editing);
            return CheckoutOutcome::Incomplete(field);
        }

        self.transition(CheckoutState::SubmittingCod);
        add_breadcrumb("checkout", "Submitted cash on delivery order", None);

        match self.place(cart, PaymentMethod::Cod).await {
            Ok(PlaceOrderResponse { success: true, .. }) => {
                info!("Cash on delivery order placed");
                cart.clear_cart();
                self.notifier
                    .success("Order placed successfully with COD payment");
                self.transition(CheckoutState::Completed);

                tokio::time::sleep(self.settings.order_redirect_delay).await;
                self.navigator.navigate(Route::MyOrders);
                CheckoutOutcome::Placed
            }
            Ok(PlaceOrderResponse { message, .. }) => {
                let message = format!("COD Error: {}", message.unwrap_or_default());
                self.fail(message)
            }
            Err(e) => {
                error!(error = %e, "Cash on delivery order failed");
                self.fail("COD Order Failed".to_string())
            }
        }
    }
}

impl CheckoutFlow {
    async fn place(
        &self,
        cart: &CartStore,
        payment_method: PaymentMethod,
    ) -> Result<PlaceOrderResponse, ApiError> {
        let Some(token) = cart.token() else {
            return Err(ApiError::Rejected("not signed in".to_string()));
        };

        let payload = OrderPayload::assemble(
            &self.draft,
            cart.catalog(),
            cart.quantities(),
            self.settings.delivery_fee,
            payment_method,
        );
        debug!(
            items = payload.items.len(),
            amount = %payload.amount,
            payment_method = %payment_method,
            "Placing order"
        );

        self.api.place_order(token, &payload).await
    }

    /// Record a failed submission, notify the user, and go back to editing.
    fn fail(&mut self, message: String) -> CheckoutOutcome {
        self.notifier.error(&message);
        self.last_error = Some(message.clone());
        self.transition(CheckoutState::Failed(message.clone()));
        self.transition(CheckoutState::Editing);
        CheckoutOutcome::Failed(message)
    }

    fn transition(&mut self, next: CheckoutState) {
        debug!(from = %self.state, to = %next, "Checkout state change");
        self.state = next;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use food_store_core::ItemId;

    use super::*;
    use crate::services::{
        NavigationEvent, NotificationLevel, RecordingNavigator, RecordingNotifier,
    };
    use crate::testing::{ApiCall, FakeStoreApi, catalog_item, token};

    struct Harness {
        api: FakeStoreApi,
        cart: CartStore,
        notifier: RecordingNotifier,
        navigator: RecordingNavigator,
    }

    impl Harness {
        async fn signed_in_with_item() -> Self {
            let api = FakeStoreApi::with_catalog(vec![catalog_item("A", 100)]);
            let mut cart = CartStore::new(Arc::new(api.clone()));
            cart.load_catalog().await;
            cart.set_token(Some(token()));
            cart.add_item(&ItemId::new("A"));
            cart.add_item(&ItemId::new("A"));
            cart.settle().await;

            Self {
                api,
                cart,
                notifier: RecordingNotifier::new(),
                navigator: RecordingNavigator::new(),
            }
        }

        fn enter(&self) -> Result<CheckoutFlow, CheckoutError> {
            CheckoutFlow::enter(
                &self.cart,
                Arc::new(self.notifier.clone()),
                Arc::new(self.navigator.clone()),
                CheckoutSettings {
                    delivery_fee: Price::from_units(59),
                    order_redirect_delay: Duration::ZERO,
                },
            )
        }

        fn order_calls(&self) -> usize {
            self.api
                .calls()
                .iter()
                .filter(|c| matches!(c, ApiCall::PlaceOrder(_)))
                .count()
        }
    }

    fn fill_all(flow: &mut CheckoutFlow) {
        for field in AddressField::ALL {
            flow.on_field_change(field, format!("my {field}"));
        }
    }

    #[tokio::test]
    async fn test_enter_requires_token() {
        let mut h = Harness::signed_in_with_item().await;
        h.cart.set_token(None);

        assert_eq!(h.enter().err(), Some(CheckoutError::NotSignedIn));
        assert_eq!(h.navigator.last(), Some(NavigationEvent::Route(Route::Cart)));
    }

    #[tokio::test]
    async fn test_enter_requires_non_zero_total() {
        let mut h = Harness::signed_in_with_item().await;
        h.cart.clear_cart();

        assert_eq!(h.enter().err(), Some(CheckoutError::EmptyCart));
        assert_eq!(h.navigator.last(), Some(NavigationEvent::Route(Route::Cart)));
    }

    #[tokio::test]
    async fn test_totals_include_delivery_fee() {
        let h = Harness::signed_in_with_item().await;
        let flow = h.enter().unwrap();
        assert_eq!(
            flow.totals(&h.cart),
            (
                Price::from_units(200),
                Price::from_units(59),
                Price::from_units(259)
            )
        );
    }

    #[tokio::test]
    async fn test_cod_with_empty_city_rejected_before_network() {
        let mut h = Harness::signed_in_with_item().await;
        let mut flow = h.enter().unwrap();
        fill_all(&mut flow);
        flow.on_field_change(AddressField::City, "");
        let draft_before = flow.draft().clone();

        let outcome = flow.submit_cod(&mut h.cart).await;

        assert_eq!(outcome, CheckoutOutcome::Incomplete(AddressField::City));
        assert_eq!(flow.state(), &CheckoutState::Editing);
        assert_eq!(flow.draft(), &draft_before);
        assert_eq!(h.order_calls(), 0);
        assert_eq!(h.cart.quantity(&ItemId::new("A")), 2);

        let warning = h.notifier.last().unwrap();
        assert_eq!(warning.level, NotificationLevel::Warning);
        assert_eq!(warning.message, "Please fill in \"city\"");
    }

    #[tokio::test]
    async fn test_cod_reports_first_empty_field_in_form_order() {
        let mut h = Harness::signed_in_with_item().await;
        let mut flow = h.enter().unwrap();
        flow.on_field_change(AddressField::FirstName, "Asha");
        flow.on_field_change(AddressField::Phone, "98450");

        let outcome = flow.submit_cod(&mut h.cart).await;
        assert_eq!(outcome, CheckoutOutcome::Incomplete(AddressField::LastName));
    }

    #[tokio::test]
    async fn test_cod_success_clears_cart_and_navigates_to_orders() {
        let mut h = Harness::signed_in_with_item().await;
        let mut flow = h.enter().unwrap();
        fill_all(&mut flow);

        let outcome = flow.submit_cod(&mut h.cart).await;
        h.cart.settle().await;

        assert_eq!(outcome, CheckoutOutcome::Placed);
        assert_eq!(flow.state(), &CheckoutState::Completed);
        assert_eq!(h.cart.total_amount(), Price::ZERO);
        assert!(h.api.calls().contains(&ApiCall::Clear));
        assert_eq!(
            h.navigator.last(),
            Some(NavigationEvent::Route(Route::MyOrders))
        );
        assert_eq!(
            h.notifier.last().unwrap().message,
            "Order placed successfully with COD payment"
        );

        let orders = h.api.orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].payment_method, PaymentMethod::Cod);
        assert_eq!(orders[0].amount, Price::from_units(259));
        assert_eq!(orders[0].items[0].quantity, 2);
        assert_eq!(orders[0].address.city, "my city");
    }

    #[tokio::test]
    async fn test_cod_server_failure_keeps_cart() {
        let mut h = Harness::signed_in_with_item().await;
        h.api.respond_to_orders_with(PlaceOrderResponse {
            success: false,
            message: Some("Error".to_string()),
            session_url: None,
        });
        let mut flow = h.enter().unwrap();
        fill_all(&mut flow);

        let outcome = flow.submit_cod(&mut h.cart).await;

        assert_eq!(outcome, CheckoutOutcome::Failed("COD Error: Error".to_string()));
        assert_eq!(flow.state(), &CheckoutState::Editing);
        assert_eq!(flow.last_error(), Some("COD Error: Error"));
        assert_eq!(h.cart.quantity(&ItemId::new("A")), 2);
        assert!(!h.api.calls().contains(&ApiCall::Clear));
        assert!(h.navigator.events().is_empty());
    }

    #[tokio::test]
    async fn test_cod_transport_failure_keeps_draft() {
        let mut h = Harness::signed_in_with_item().await;
        h.api.fail_orders();
        let mut flow = h.enter().unwrap();
        fill_all(&mut flow);
        let draft_before = flow.draft().clone();

        let outcome = flow.submit_cod(&mut h.cart).await;

        assert_eq!(outcome, CheckoutOutcome::Failed("COD Order Failed".to_string()));
        assert_eq!(flow.draft(), &draft_before);
        assert_eq!(h.notifier.last().unwrap().level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_online_success_redirects_to_session_url() {
        let h = Harness::signed_in_with_item().await;
        let mut flow = h.enter().unwrap();

        // Online payment does not validate the draft
        let outcome = flow.submit_online(&h.cart).await;

        let url = "https://pay.example.com/session/cs_test".to_string();
        assert_eq!(
            outcome,
            CheckoutOutcome::Redirected {
                session_url: url.clone()
            }
        );
        assert_eq!(h.navigator.last(), Some(NavigationEvent::Redirect(url)));
        assert_eq!(h.api.orders()[0].payment_method, PaymentMethod::Stripe);
        assert_eq!(h.api.orders()[0].amount, Price::from_units(259));
        // Cart is left for the payment verification step
        assert_eq!(h.cart.quantity(&ItemId::new("A")), 2);
    }

    #[tokio::test]
    async fn test_online_server_failure_leaves_cart_and_returns_to_editing() {
        let h = Harness::signed_in_with_item().await;
        h.api.respond_to_orders_with(PlaceOrderResponse {
            success: false,
            message: Some("Payment provider unavailable".to_string()),
            session_url: None,
        });
        let mut flow = h.enter().unwrap();

        let outcome = flow.submit_online(&h.cart).await;

        assert_eq!(
            outcome,
            CheckoutOutcome::Failed("Stripe Error: Payment provider unavailable".to_string())
        );
        assert_eq!(flow.state(), &CheckoutState::Editing);
        assert_eq!(h.cart.quantity(&ItemId::new("A")), 2);
        assert_eq!(h.cart.total_amount(), Price::from_units(200));
        assert!(h.navigator.events().is_empty());
    }

    #[tokio::test]
    async fn test_online_transport_failure() {
        let h = Harness::signed_in_with_item().await;
        h.api.fail_orders();
        let mut flow = h.enter().unwrap();

        let outcome = flow.submit_online(&h.cart).await;

        assert_eq!(outcome, CheckoutOutcome::Failed("Stripe Order Failed".to_string()));
        assert!(flow.state().is_editable());
    }

    #[tokio::test]
    async fn test_completed_flow_ignores_further_submissions() {
        let mut h = Harness::signed_in_with_item().await;
        let mut flow = h.enter().unwrap();
        fill_all(&mut flow);
        assert_eq!(flow.submit_cod(&mut h.cart).await, CheckoutOutcome::Placed);

        assert_eq!(flow.submit_online(&h.cart).await, CheckoutOutcome::Busy);
        assert_eq!(h.order_calls(), 1);
    }
}
