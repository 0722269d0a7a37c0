use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// How long a notification stays visible before auto-dismissing.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(6);

/// Maximum retained notifications; the oldest is dropped beyond this.
const MAX_NOTIFICATIONS: usize = 64;

/// Visual severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A timed, auto-dismissing UI notification. Decoupled from the state merge
/// that produced it: dismissal never rolls back an applied event.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub posted_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            posted_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

/// Bounded queue of transient notifications with time-based pruning.
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
    ttl: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, notification: Notification) {
        if self.entries.len() >= MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
        self.entries.push_back(notification);
    }

    /// Currently visible notifications, pruning expired ones first.
    pub fn visible(&mut self) -> Vec<Notification> {
        self.prune();
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn prune(&mut self) {
        let now = Instant::now();
        // Entries are in arrival order, so expiry is monotone from the front.
        while let Some(front) = self.entries.front() {
            if now.duration_since(front.posted_at) >= self.ttl {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }
}
