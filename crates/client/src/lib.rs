//! Food Store client library.
//!
//! Everything a front end needs to run one shopping session against the
//! remote store: the remote API client, the cart state container, the checkout
//! flow, and the view models the front end renders.
//!
//! # Architecture
//!
//! - [`cart::CartStore`] owns cart quantities, the session token, and the
//!   catalog. Mutations apply locally first, then notify the remote store in a
//!   background task. Remote failures are logged, never rolled back.
//! - [`checkout::CheckoutFlow`] owns the delivery draft and places orders.
//! - [`api::StoreApi`], [`services::Notifier`], [`services::Navigator`], and
//!   [`services::TokenStore`] are the seams to the outside world.
//! - [`state::AppState`] wires one session together from [`config::ClientConfig`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;
