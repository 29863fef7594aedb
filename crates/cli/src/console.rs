//! Terminal implementations of the notification and navigation ports.
//!
//! Notifications are the user-facing output of a command, so they go to
//! stdout. Diagnostics stay on the `tracing` log (stderr).

#![allow(clippy::print_stdout)]

use food_store_client::services::{
    NotificationLevel, Navigator, Notifier, Route, TracingNavigator, TracingNotifier,
};

/// Prints notifications as single lines. Each one is also logged under the
/// `notification` target (enable with `RUST_LOG=notification=info`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    log: TracingNotifier,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.log.notify(level, message);
        let marker = match level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Warning => "!!",
            NotificationLevel::Error => "error",
        };
        println!("[{marker}] {message}");
    }
}

/// A terminal has no views to switch between, so navigation is reported as a
/// hint naming the command that shows the destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator {
    log: TracingNavigator,
}

impl ConsoleNavigator {
    const fn hint(route: Route) -> &'static str {
        match route {
            Route::Home => "run `food-store menu` to keep browsing",
            Route::Cart => "run `food-store cart` to review your cart",
            Route::MyOrders => "your order is now listed under My Orders",
        }
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        self.log.navigate(route);
        println!("-> {}", Self::hint(route));
    }

    fn redirect(&self, url: &str) {
        self.log.redirect(url);
        println!("Complete your payment at: {url}");
    }
}
