//! Integration tests for the food store client.
//!
//! [`FakeStore`] is an in-process HTTP backend with the same endpoints as the
//! real store. It keeps one cart per session token, records every request it
//! receives, and can be told to fail or to answer a path with a fixed body.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p food-store-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `http_client` - wire format of each remote endpoint
//! - `cart_sync` - session start, optimistic mutations, background sync
//! - `checkout` - online and cash-on-delivery order placement

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// A request as seen by the fake backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    /// Value of the `token` header, if sent.
    pub token: Option<String>,
    /// JSON body, or `Value::Null` when absent or not JSON.
    pub body: Value,
}

#[derive(Default)]
struct StoreState {
    foods: Vec<Value>,
    carts: HashMap<String, BTreeMap<String, u32>>,
    requests: Vec<RecordedRequest>,
    orders: Vec<Value>,
    overrides: HashMap<String, Value>,
    failure: Option<StatusCode>,
}

type Shared = Arc<Mutex<StoreState>>;

fn lock(state: &Shared) -> MutexGuard<'_, StoreState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process fake of the store backend, bound to an ephemeral local port.
///
/// The server task is aborted when the value is dropped.
pub struct FakeStore {
    url: Url,
    state: Shared,
    server: JoinHandle<()>,
}

impl FakeStore {
    /// Start a backend serving `foods` from the food list endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if no local port can be bound.
    pub async fn start(foods: Vec<Value>) -> std::io::Result<Self> {
        let state: Shared = Arc::new(Mutex::new(StoreState {
            foods,
            ..StoreState::default()
        }));

        let app = Router::new()
            .route("/api/food/list", get(list_foods))
            .route("/api/cart/add", post(add_to_cart))
            .route("/api/cart/remove", post(remove_from_cart))
            .route("/api/cart/get", get(get_cart))
            .route("/api/cart/clear", post(clear_cart))
            .route("/api/order/place", post(place_order))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let url = Url::parse(&format!("http://{addr}")).map_err(std::io::Error::other)?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            url,
            state,
            server,
        })
    }

    /// Base URL of the backend.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Every request received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state).requests.clone()
    }

    /// Requests received for `path`.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Order bodies received, in arrival order.
    #[must_use]
    pub fn orders(&self) -> Vec<Value> {
        lock(&self.state).orders.clone()
    }

    /// The server-side cart for `token`.
    #[must_use]
    pub fn cart(&self, token: &str) -> BTreeMap<String, u32> {
        lock(&self.state)
            .carts
            .get(token)
            .cloned()
            .unwrap_or_default()
    }

    /// Seed the server-side cart for `token`.
    pub fn set_cart(&self, token: &str, entries: &[(&str, u32)]) {
        let cart = entries
            .iter()
            .map(|(id, qty)| ((*id).to_string(), *qty))
            .collect();
        lock(&self.state).carts.insert(token.to_string(), cart);
    }

    /// Answer `path` with `body` (status 200) instead of the normal handler.
    /// The request is still recorded.
    pub fn respond_with(&self, path: &str, body: Value) {
        lock(&self.state).overrides.insert(path.to_string(), body);
    }

    /// Answer every request with `status` until [`FakeStore::recover`].
    pub fn fail_with(&self, status: StatusCode) {
        lock(&self.state).failure = Some(status);
    }

    pub fn recover(&self) {
        lock(&self.state).failure = None;
    }
}

impl Drop for FakeStore {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A catalog entry in the backend's wire format.
#[must_use]
pub fn food(id: &str, name: &str, price: u32) -> Value {
    json!({
        "_id": id,
        "name": name,
        "description": format!("{name}, freshly made"),
        "price": price,
        "image": format!("{id}.png"),
        "category": "Rolls",
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Record the request, then short-circuit on a configured failure or override.
fn intercept(
    state: &Shared,
    method: Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<Option<String>, Response> {
    let token = headers
        .get("token")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let path = uri.path().to_string();

    let mut guard = lock(state);
    guard.requests.push(RecordedRequest {
        method,
        path: path.clone(),
        token: token.clone(),
        body: serde_json::from_slice(body).unwrap_or(Value::Null),
    });

    if let Some(status) = guard.failure {
        return Err((status, "fake store failure").into_response());
    }
    if let Some(body) = guard.overrides.get(&path) {
        return Err(Json(body.clone()).into_response());
    }
    Ok(token)
}

fn not_authorized() -> Response {
    Json(json!({ "success": false, "message": "Not Authorized Login Again" })).into_response()
}

fn item_id(body: &Bytes) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("itemId")?.as_str().map(str::to_string)
}

async fn list_foods(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(response) = intercept(&state, method, &uri, &headers, &body) {
        return response;
    }
    let foods = lock(&state).foods.clone();
    Json(json!({ "success": true, "data": foods })).into_response()
}

async fn add_to_cart(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let token = match intercept(&state, method, &uri, &headers, &body) {
        Ok(Some(token)) => token,
        Ok(None) => return not_authorized(),
        Err(response) => return response,
    };
    let Some(id) = item_id(&body) else {
        return (StatusCode::BAD_REQUEST, "missing itemId").into_response();
    };

    *lock(&state)
        .carts
        .entry(token)
        .or_default()
        .entry(id)
        .or_insert(0) += 1;
    Json(json!({ "success": true, "message": "Added To Cart" })).into_response()
}

async fn remove_from_cart(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let token = match intercept(&state, method, &uri, &headers, &body) {
        Ok(Some(token)) => token,
        Ok(None) => return not_authorized(),
        Err(response) => return response,
    };
    let Some(id) = item_id(&body) else {
        return (StatusCode::BAD_REQUEST, "missing itemId").into_response();
    };

    let mut guard = lock(&state);
    let quantity = guard
        .carts
        .entry(token)
        .or_default()
        .entry(id)
        .or_insert(0);
    *quantity = quantity.saturating_sub(1);
    Json(json!({ "success": true, "message": "Removed From Cart" })).into_response()
}

async fn get_cart(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let token = match intercept(&state, method, &uri, &headers, &body) {
        Ok(Some(token)) => token,
        Ok(None) => return not_authorized(),
        Err(response) => return response,
    };
    let cart = lock(&state).carts.get(&token).cloned().unwrap_or_default();
    Json(json!({ "success": true, "cartData": cart })).into_response()
}

async fn clear_cart(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let token = match intercept(&state, method, &uri, &headers, &body) {
        Ok(Some(token)) => token,
        Ok(None) => return not_authorized(),
        Err(response) => return response,
    };
    lock(&state).carts.remove(&token);
    Json(json!({ "success": true, "message": "Cart Cleared" })).into_response()
}

async fn place_order(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match intercept(&state, method, &uri, &headers, &body) {
        Ok(Some(_)) => {}
        Ok(None) => return not_authorized(),
        Err(response) => return response,
    }
    let order: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let payment_method = order
        .get("paymentMethod")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    lock(&state).orders.push(order);

    let reply = if payment_method == "stripe" {
        json!({ "success": true, "session_url": "https://checkout.example.com/c/pay/cs_test_123" })
    } else {
        json!({ "success": true, "message": "Order Placed" })
    };
    Json(reply).into_response()
}
