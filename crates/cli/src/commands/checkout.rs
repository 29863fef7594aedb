//! Checkout command.

use food_store_client::checkout::CheckoutOutcome;
use food_store_client::error::{AppError, Result};
use food_store_client::state::AppState;
use tracing::info;

use super::{AddressArgs, CheckoutMethod, render};

/// Enter checkout, fill the delivery form from `address`, and submit.
///
/// Online orders hand over to the payment page and leave the cart as it is;
/// cash-on-delivery orders empty the cart once the store accepts them.
pub async fn place_order(
    state: &mut AppState,
    method: CheckoutMethod,
    address: AddressArgs,
) -> Result<()> {
    let mut flow = state.checkout()?;
    for (field, value) in address.into_fields() {
        flow.on_field_change(field, value);
    }

    let (subtotal, delivery_fee, total) = flow.totals(state.cart());
    render::order_summary(subtotal, delivery_fee, total);

    let outcome = match method {
        CheckoutMethod::Online => flow.submit_online(state.cart()).await,
        CheckoutMethod::Cod => flow.submit_cod(state.cart_mut()).await,
    };
    info!(state = %flow.state(), "Checkout finished");

    match outcome {
        CheckoutOutcome::Redirected { .. } | CheckoutOutcome::Placed => Ok(()),
        CheckoutOutcome::Incomplete(field) => Err(AppError::BadRequest(format!(
            "delivery field \"{field}\" is required (--{})",
            flag_name(field.as_str())
        ))),
        CheckoutOutcome::Failed(message) => Err(AppError::OrderNotPlaced(message)),
        CheckoutOutcome::Busy => Err(AppError::BadRequest(
            "an order is already being placed".to_string(),
        )),
    }
}

/// `firstName` -> `first-name`
fn flag_name(wire: &str) -> String {
    let mut flag = String::with_capacity(wire.len() + 2);
    for c in wire.chars() {
        if c.is_ascii_uppercase() {
            flag.push('-');
            flag.push(c.to_ascii_lowercase());
        } else {
            flag.push(c);
        }
    }
    flag
}
