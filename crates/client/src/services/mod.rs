//! Ports to the world outside the session.
//!
//! - [`notify`] - Transient user notifications (toasts)
//! - [`navigate`] - In-app routing and external redirects
//! - [`token_store`] - Durable storage for the session token
//!
//! Each port has a logging implementation for the terminal front end and a
//! recording or in-memory implementation for tests.

pub mod navigate;
pub mod notify;
pub mod token_store;

pub use navigate::{NavigationEvent, Navigator, RecordingNavigator, Route, TracingNavigator};
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};
