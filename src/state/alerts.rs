//! Transient alert messages
//!
//! Alerts stack in the order they were raised and disappear on their own
//! after [`ALERT_LIFETIME`], or earlier when dismissed.

use std::time::{Duration, Instant};

/// How long an alert stays on screen
pub const ALERT_LIFETIME: Duration = Duration::from_secs(5);

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub raised_at: Instant,
}

impl Alert {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= ALERT_LIFETIME
    }
}

#[derive(Debug, Default)]
pub struct Alerts {
    items: Vec<Alert>,
    next_id: u64,
}

impl Alerts {
    /// Raise an alert now. Returns its id.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.push_at(message, severity, Instant::now())
    }

    pub fn push_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Alert {
            id,
            message: message.into(),
            severity,
            raised_at: now,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, Severity::Success)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, Severity::Warning)
    }

    pub fn danger(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, Severity::Danger)
    }

    /// Remove one alert. Returns whether it was still showing.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|a| a.id != id);
        self.items.len() != before
    }

    pub fn dismiss_latest(&mut self) -> Option<Alert> {
        self.items.pop()
    }

    /// Drop alerts whose lifetime has run out
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|a| !a.is_expired(now));
    }

    /// Visible alerts, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.items.last()
    }
}
