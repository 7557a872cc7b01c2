// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `NotificationItem` struct, its `NotificationId`
//! and the closed `NotificationType` enumeration used throughout the
//! notification system.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

const ID_PREFIX: &str = "toast-";

/// Unique identifier for a notification.
///
/// Ids come from a process-wide counter, so two notifications never share
/// an id, even when created on different threads in the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates a new unique notification ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ID_PREFIX, self.0)
    }
}

impl FromStr for NotificationId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(ID_PREFIX)
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Self)
            .ok_or_else(|| Error::InvalidId(s.to_string()))
    }
}

/// Kind of notification. Determines visual treatment only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Operation completed successfully.
    Success,
    /// Something failed and the user should know about it.
    Error,
    /// Neutral informational message.
    Info,
    /// Non-blocking issue worth the user's attention.
    Warning,
}

impl NotificationType {
    /// All notification types, in declaration order.
    pub const ALL: [NotificationType; 4] = [
        NotificationType::Success,
        NotificationType::Error,
        NotificationType::Info,
        NotificationType::Warning,
    ];

    /// Returns the lowercase label used in logs, config and the CLI.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NotificationType::Success => "success",
            NotificationType::Error => "error",
            NotificationType::Info => "info",
            NotificationType::Warning => "warning",
        }
    }

    /// Returns the glyph shown next to the message by text renderers.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            NotificationType::Success => '✔',
            NotificationType::Error => '✖',
            NotificationType::Info => 'ℹ',
            NotificationType::Warning => '⚠',
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NotificationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(NotificationType::Success),
            "error" => Ok(NotificationType::Error),
            "info" => Ok(NotificationType::Info),
            "warning" | "warn" => Ok(NotificationType::Warning),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

/// A notification pending display.
///
/// Items are immutable once created; the store only ever appends or removes
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationItem {
    id: NotificationId,
    message: String,
    kind: NotificationType,
    created_at: Instant,
}

impl NotificationItem {
    /// Creates a new item with a fresh id.
    pub fn new(message: impl Into<String>, kind: NotificationType) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the notification type.
    #[must_use]
    pub fn kind(&self) -> NotificationType {
        self.kind
    }

    /// Returns when this notification was created.
    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Returns the age of this notification relative to `now`.
    ///
    /// Saturates to zero if `now` precedes creation.
    #[must_use]
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_ids_are_unique() {
        let n1 = NotificationItem::new("test", NotificationType::Success);
        let n2 = NotificationItem::new("test", NotificationType::Success);
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn ids_increase_monotonically() {
        let first = NotificationId::new();
        let second = NotificationId::new();
        assert!(second > first);
    }

    #[test]
    fn id_display_parses_back() {
        let id = NotificationId::new();
        let parsed: NotificationId = id.to_string().parse().expect("valid id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn malformed_id_is_rejected() {
        for raw in ["nonexistent-id", "toast-", "toast-abc", "42", ""] {
            let err = raw.parse::<NotificationId>().unwrap_err();
            assert_eq!(err, Error::InvalidId(raw.to_string()));
        }
    }

    #[test]
    fn kind_labels_round_trip() {
        for kind in NotificationType::ALL {
            assert_eq!(kind.label().parse::<NotificationType>(), Ok(kind));
        }
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!("ERROR".parse::<NotificationType>(), Ok(NotificationType::Error));
        assert_eq!(" Warn ".parse::<NotificationType>(), Ok(NotificationType::Warning));
        assert!("fatal".parse::<NotificationType>().is_err());
    }

    #[test]
    fn glyphs_are_distinct() {
        let glyphs: std::collections::HashSet<char> =
            NotificationType::ALL.iter().map(|k| k.glyph()).collect();
        assert_eq!(glyphs.len(), NotificationType::ALL.len());
    }

    #[test]
    fn empty_message_is_allowed() {
        let item = NotificationItem::new("", NotificationType::Info);
        assert_eq!(item.message(), "");
        assert_eq!(item.kind(), NotificationType::Info);
    }

    #[test]
    fn age_saturates_before_creation() {
        let before = Instant::now();
        let item = NotificationItem::new("late", NotificationType::Warning);
        assert_eq!(item.age_at(before), Duration::ZERO);
        assert!(item.age_at(item.created_at() + Duration::from_secs(2)) >= Duration::from_secs(2));
    }
}
