//! In-memory store API for unit tests.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use food_store_core::{
    CartQuantities, CatalogItem, ItemId, OrderPayload, PaymentMethod, Price, SessionToken,
};

use crate::api::{ApiError, PlaceOrderResponse, StoreApi};

/// A call received by [`FakeStoreApi`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApiCall {
    ListFoods,
    Add(ItemId),
    Remove(ItemId),
    GetCart,
    Clear,
    PlaceOrder(String),
}

#[derive(Default)]
struct FakeState {
    catalog: Vec<CatalogItem>,
    remote_cart: CartQuantities,
    calls: Vec<ApiCall>,
    orders: Vec<OrderPayload>,
    order_response: Option<PlaceOrderResponse>,
    fail_catalog: bool,
    fail_get_cart: bool,
    fail_cart_mutations: bool,
    fail_orders: bool,
}

#[derive(Clone, Default)]
pub struct FakeStoreApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeStoreApi {
    pub fn with_catalog(catalog: Vec<CatalogItem>) -> Self {
        let api = Self::default();
        api.lock().catalog = catalog;
        api
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_remote_cart(&self, entries: &[(&str, u32)]) {
        self.lock().remote_cart = entries
            .iter()
            .map(|(id, qty)| (ItemId::new(*id), *qty))
            .collect();
    }

    pub fn respond_to_orders_with(&self, response: PlaceOrderResponse) {
        self.lock().order_response = Some(response);
    }

    pub fn fail_catalog(&self) {
        self.lock().fail_catalog = true;
    }

    pub fn fail_get_cart(&self) {
        self.lock().fail_get_cart = true;
    }

    pub fn fail_cart_mutations(&self) {
        self.lock().fail_cart_mutations = true;
    }

    pub fn fail_orders(&self) {
        self.lock().fail_orders = true;
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn orders(&self) -> Vec<OrderPayload> {
        self.lock().orders.clone()
    }

    fn record(&self, call: ApiCall) {
        self.lock().calls.push(call);
    }
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        body: "Service Unavailable".to_string(),
    }
}

#[async_trait]
impl StoreApi for FakeStoreApi {
    async fn list_foods(&self) -> Result<Vec<CatalogItem>, ApiError> {
        self.record(ApiCall::ListFoods);
        let state = self.lock();
        if state.fail_catalog {
            return Err(unavailable());
        }
        Ok(state.catalog.clone())
    }

    async fn add_to_cart(&self, _token: &SessionToken, item: &ItemId) -> Result<(), ApiError> {
        self.record(ApiCall::Add(item.clone()));
        let mut state = self.lock();
        if state.fail_cart_mutations {
            return Err(unavailable());
        }
        *state.remote_cart.entry(item.clone()).or_insert(0) += 1;
        Ok(())
    }

    async fn remove_from_cart(
        &self,
        _token: &SessionToken,
        item: &ItemId,
    ) -> Result<(), ApiError> {
        self.record(ApiCall::Remove(item.clone()));
        let mut state = self.lock();
        if state.fail_cart_mutations {
            return Err(unavailable());
        }
        let quantity = state.remote_cart.entry(item.clone()).or_insert(0);
        *quantity = quantity.saturating_sub(1);
        Ok(())
    }

    async fn get_cart(&self, _token: &SessionToken) -> Result<CartQuantities, ApiError> {
        self.record(ApiCall::GetCart);
        let state = self.lock();
        if state.fail_get_cart {
            return Err(unavailable());
        }
        Ok(state.remote_cart.clone())
    }

    async fn clear_cart(&self, _token: &SessionToken) -> Result<(), ApiError> {
        self.record(ApiCall::Clear);
        let mut state = self.lock();
        if state.fail_cart_mutations {
            return Err(unavailable());
        }
        state.remote_cart.clear();
        Ok(())
    }

    async fn place_order(
        &self,
        _token: &SessionToken,
        order: &OrderPayload,
    ) -> Result<PlaceOrderResponse, ApiError> {
        self.record(ApiCall::PlaceOrder(order.payment_method.to_string()));
        let mut state = self.lock();
        if state.fail_orders {
            return Err(unavailable());
        }
        state.orders.push(order.clone());
        Ok(state.order_response.clone().unwrap_or_else(|| {
            match order.payment_method {
                PaymentMethod::Stripe => PlaceOrderResponse {
                    success: true,
                    message: None,
                    session_url: Some("https://pay.example.com/session/cs_test".to_string()),
                },
                PaymentMethod::Cod => PlaceOrderResponse {
                    success: true,
                    message: Some("Order Placed".to_string()),
                    session_url: None,
                },
            }
        }))
    }
}

pub fn catalog_item(id: &str, price: u32) -> CatalogItem {
    CatalogItem {
        id: ItemId::new(id),
        name: format!("Dish {id}"),
        price: Price::from_units(price),
        description: "Freshly made".to_string(),
        image: format!("food_{id}.png"),
        extra: serde_json::Map::new(),
    }
}

pub fn token() -> SessionToken {
    SessionToken::parse("test-session-token").expect("non-empty token")
}
