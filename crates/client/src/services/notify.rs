//! User notifications.
//!
//! Notifications are non-blocking: raising one never waits for the user and
//! never changes session state.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{error, info, warn};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// A notification as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Surface short messages to the user.
pub trait Notifier: Send + Sync {
    /// Show a notification.
    fn notify(&self, level: NotificationLevel, message: &str);

    /// Show a success notification.
    fn success(&self, message: &str) {
        self.notify(NotificationLevel::Success, message);
    }

    /// Show a warning (used for validation problems).
    fn warn(&self, message: &str) {
        self.notify(NotificationLevel::Warning, message);
    }

    /// Show an error.
    fn error(&self, message: &str) {
        self.notify(NotificationLevel::Error, message);
    }
}

/// Notifier that writes notifications to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Success => info!(target: "notification", "{message}"),
            NotificationLevel::Warning => warn!(target: "notification", "{message}"),
            NotificationLevel::Error => error!(target: "notification", "{message}"),
        }
    }
}

/// Notifier that keeps every notification in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                level,
                message: message.to_string(),
            });
    }
}
