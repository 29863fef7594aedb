//! Core types for the food store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod catalog;
pub mod id;
pub mod order;
pub mod payment;
pub mod price;
pub mod token;

pub use address::{AddressError, AddressField, DeliveryAddress};
pub use catalog::{CartQuantities, CatalogItem};
pub use id::ItemId;
pub use order::{OrderItem, OrderPayload, cart_subtotal};
pub use payment::PaymentMethod;
pub use price::{Price, PriceError};
pub use token::SessionToken;
