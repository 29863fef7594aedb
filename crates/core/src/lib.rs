//! Food Store Core - Shared types library.
//!
//! This crate provides the domain types used across the food store workspace:
//! - `client` - Cart state container, checkout flow, and remote API client
//! - `cli` - Terminal front end driving a client session
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async runtime. Everything here can be computed synchronously
//! from values already in memory.
//!
//! # Modules
//!
//! - [`types`] - Item IDs, prices, tokens, catalog items, addresses, and order payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
