//! Sign in and sign out.

use food_store_client::error::{AppError, Result};
use food_store_client::state::AppState;
use food_store_core::SessionToken;

use super::render;

pub async fn login(state: &mut AppState, raw: &str) -> Result<()> {
    let token = SessionToken::parse(raw)
        .ok_or_else(|| AppError::BadRequest("token cannot be empty".to_string()))?;
    state.login(token).await?;
    render::cart(&state.cart_view());
    Ok(())
}

pub fn logout(state: &mut AppState) -> Result<()> {
    state.logout()
}
