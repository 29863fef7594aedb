//! Navigation between views and to external pages.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

/// Views inside the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Cart,
    MyOrders,
}

impl Route {
    /// Path of the view.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Cart => "/cart",
            Self::MyOrders => "/myorders",
        }
    }
}

/// Move the user between views, or out of the application entirely.
pub trait Navigator: Send + Sync {
    /// Show another view.
    fn navigate(&self, route: Route);

    /// Leave the application for an external page (e.g. hosted payment).
    fn redirect(&self, url: &str);
}

/// Navigator that logs where the user would be taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        info!(path = route.path(), "Navigating");
    }

    fn redirect(&self, url: &str) {
        info!(url = %url, "Redirecting to external page");
    }
}

/// A navigation recorded by [`RecordingNavigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Route(Route),
    Redirect(String),
}

/// Navigator that records every navigation in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    events: Arc<Mutex<Vec<NavigationEvent>>>,
}

impl RecordingNavigator {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent navigation.
    #[must_use]
    pub fn last(&self) -> Option<NavigationEvent> {
        self.events().pop()
    }

    fn push(&self, event: NavigationEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.push(NavigationEvent::Route(route));
    }

    fn redirect(&self, url: &str) {
        self.push(NavigationEvent::Redirect(url.to_string()));
    }
}
