//! Short-lived user-facing status messages.
//!
//! Every recoverable condition in the engine — a not-found search, a transport
//! failure, a favorites change — surfaces as a notification here, never as an
//! error dialog. Notifications expire on their own after a configurable TTL;
//! the host simply projects [`NotificationBus::active`] each frame and calls
//! [`NotificationBus::purge`] whenever convenient.

use chrono::{DateTime, Duration, Utc};

/// Severity of a notification, for host styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Neutral status ("Location not found").
    Info,
    /// Positive confirmation ("Location added to favorites!").
    Success,
    /// Recoverable failure with a retry suggestion.
    Error,
}

/// A single auto-expiring message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Message text shown to the user.
    pub message: String,
    /// Severity, for styling.
    pub kind: NotificationKind,
    /// Instant after which the notification is no longer shown.
    expires_at: DateTime<Utc>,
}

/// Queue of live notifications.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    entries: Vec<Notification>,
    ttl: Duration,
}

impl NotificationBus {
    /// Creates a bus whose notifications live for `ttl_secs` seconds.
    #[must_use]
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            entries: Vec::new(),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Emits a notification, stamping its expiry from the current time.
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(kind = ?kind, message = %message, "notification");
        self.entries.push(Notification {
            message,
            kind,
            expires_at: Utc::now() + self.ttl,
        });
    }

    /// Unexpired notifications, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<&Notification> {
        self.active_at(Utc::now())
    }

    /// Unexpired notifications relative to an explicit instant.
    #[must_use]
    pub fn active_at(&self, now: DateTime<Utc>) -> Vec<&Notification> {
        self.entries
            .iter()
            .filter(|notification| notification.expires_at > now)
            .collect()
    }

    /// Drops expired notifications from the queue.
    pub fn purge(&mut self) {
        let now = Utc::now();
        self.entries.retain(|notification| notification.expires_at > now);
    }

    /// Total queued notifications, expired ones included until purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(3)
    }
}
