// SPDX-License-Identifier: MPL-2.0
//! Store lifecycle events recorded for diagnostics.

use chrono::{DateTime, Utc};

use crate::notifications::{NotificationId, NotificationType};

/// Why a notification left the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalReason {
    /// The user (or calling code) dismissed it explicitly.
    Dismissed,
    /// An expiry policy removed it after its deadline elapsed.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEventKind {
    Added {
        id: NotificationId,
        kind: NotificationType,
    },
    Removed {
        id: NotificationId,
        reason: RemovalReason,
    },
}

/// A timestamped store lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    /// Wall-clock time the mutation was applied.
    pub at: DateTime<Utc>,
    pub kind: StoreEventKind,
}

impl StoreEvent {
    #[must_use]
    pub fn new(kind: StoreEventKind) -> Self {
        Self { at: Utc::now(), kind }
    }

    #[must_use]
    pub fn added(id: NotificationId, kind: NotificationType) -> Self {
        Self::new(StoreEventKind::Added { id, kind })
    }

    #[must_use]
    pub fn removed(id: NotificationId, reason: RemovalReason) -> Self {
        Self::new(StoreEventKind::Removed { id, reason })
    }

    /// Returns the id of the notification this event concerns.
    #[must_use]
    pub fn notification_id(&self) -> NotificationId {
        match self.kind {
            StoreEventKind::Added { id, .. } | StoreEventKind::Removed { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind_and_id() {
        let id = NotificationId::new();

        let added = StoreEvent::added(id, NotificationType::Info);
        assert_eq!(added.notification_id(), id);
        assert!(matches!(
            added.kind,
            StoreEventKind::Added {
                kind: NotificationType::Info,
                ..
            }
        ));

        let removed = StoreEvent::removed(id, RemovalReason::Expired);
        assert_eq!(removed.notification_id(), id);
        assert!(matches!(
            removed.kind,
            StoreEventKind::Removed {
                reason: RemovalReason::Expired,
                ..
            }
        ));
    }

    #[test]
    fn timestamps_do_not_go_backwards() {
        let first = StoreEvent::added(NotificationId::new(), NotificationType::Success);
        let second = StoreEvent::added(NotificationId::new(), NotificationType::Success);
        assert!(second.at >= first.at);
    }
}
