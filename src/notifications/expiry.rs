// SPDX-License-Identifier: MPL-2.0
//! Opt-in auto-dismiss policy.
//!
//! The store never expires anything by itself. An [`ExpiryPolicy`] attached
//! to a [`Container`] decides which notifications are past their deadline, and
//! the container removes them on each tick. [`run`] drives those ticks from a
//! tokio runtime.

use super::container::Container;
use super::notification::{NotificationItem, NotificationType};
use crate::config::{ExpiryConfig, PRESET_LONG_EXPIRY_SECS, PRESET_SHORT_EXPIRY_SECS};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Per-type auto-dismiss durations. `None` means manual dismiss only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpiryPolicy {
    success: Option<Duration>,
    error: Option<Duration>,
    info: Option<Duration>,
    warning: Option<Duration>,
}

impl ExpiryPolicy {
    /// A policy that never expires anything.
    #[must_use]
    pub fn never() -> Self {
        Self::default()
    }

    /// Short durations for success/info, a longer one for warnings, and
    /// manual dismiss for errors.
    #[must_use]
    pub fn severity_defaults() -> Self {
        let short = Duration::from_secs(PRESET_SHORT_EXPIRY_SECS);
        Self {
            success: Some(short),
            error: None,
            info: Some(short),
            warning: Some(Duration::from_secs(PRESET_LONG_EXPIRY_SECS)),
        }
    }

    #[must_use]
    pub fn from_config(config: &ExpiryConfig) -> Self {
        NotificationType::ALL
            .into_iter()
            .fold(Self::never(), |policy, kind| match config.duration_for(kind) {
                Some(duration) => policy.with(kind, duration),
                None => policy,
            })
    }

    /// Sets the auto-dismiss duration for `kind`.
    #[must_use]
    pub fn with(mut self, kind: NotificationType, duration: Duration) -> Self {
        *self.slot_mut(kind) = Some(duration);
        self
    }

    /// Makes `kind` manual-dismiss only.
    #[must_use]
    pub fn without(mut self, kind: NotificationType) -> Self {
        *self.slot_mut(kind) = None;
        self
    }

    #[must_use]
    pub fn duration_for(&self, kind: NotificationType) -> Option<Duration> {
        match kind {
            NotificationType::Success => self.success,
            NotificationType::Error => self.error,
            NotificationType::Info => self.info,
            NotificationType::Warning => self.warning,
        }
    }

    /// Returns true if no type ever expires.
    #[must_use]
    pub fn is_never(&self) -> bool {
        NotificationType::ALL
            .iter()
            .all(|kind| self.duration_for(*kind).is_none())
    }

    /// Returns when `item` should be dismissed, if ever.
    #[must_use]
    pub fn deadline(&self, item: &NotificationItem) -> Option<Instant> {
        self.duration_for(item.kind())
            .and_then(|duration| item.created_at().checked_add(duration))
    }

    #[must_use]
    pub fn is_expired(&self, item: &NotificationItem, now: Instant) -> bool {
        self.deadline(item).is_some_and(|deadline| now >= deadline)
    }

    fn slot_mut(&mut self, kind: NotificationType) -> &mut Option<Duration> {
        match kind {
            NotificationType::Success => &mut self.success,
            NotificationType::Error => &mut self.error,
            NotificationType::Info => &mut self.info,
            NotificationType::Warning => &mut self.warning,
        }
    }
}

/// Ticks `container` every `period` until the task is aborted.
pub async fn run(container: Container, period: Duration) {
    let mut interval = tokio::time::interval(period.max(Duration::from_millis(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let expired = container.tick_at(tokio::time::Instant::now().into_std());
        if !expired.is_empty() {
            log::debug!("Expired {} notification(s)", expired.len());
        }
    }
}

/// Spawns [`run`] on the current tokio runtime.
pub fn spawn(container: Container, period: Duration) -> JoinHandle<()> {
    tokio::spawn(run(container, period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{RemovalReason, StoreEventKind};
    use crate::notifications::Store;

    #[test]
    fn default_policy_never_expires() {
        let policy = ExpiryPolicy::default();
        let item = NotificationItem::new("forever", NotificationType::Success);
        let far_future = item.created_at() + Duration::from_secs(60 * 60 * 24 * 365);

        assert!(policy.is_never());
        assert_eq!(policy.deadline(&item), None);
        assert!(!policy.is_expired(&item, far_future));
    }

    #[test]
    fn severity_defaults_keep_errors_manual() {
        let policy = ExpiryPolicy::severity_defaults();
        assert!(policy.duration_for(NotificationType::Error).is_none());
        assert_eq!(
            policy.duration_for(NotificationType::Success),
            policy.duration_for(NotificationType::Info)
        );
        assert!(
            policy.duration_for(NotificationType::Warning)
                > policy.duration_for(NotificationType::Success)
        );
    }

    #[test]
    fn expires_exactly_at_deadline() {
        let policy = ExpiryPolicy::never().with(NotificationType::Info, Duration::from_secs(3));
        let item = NotificationItem::new("hi", NotificationType::Info);
        let deadline = policy.deadline(&item).expect("info has a deadline");

        assert_eq!(deadline, item.created_at() + Duration::from_secs(3));
        assert!(!policy.is_expired(&item, deadline - Duration::from_millis(1)));
        assert!(policy.is_expired(&item, deadline));
    }

    #[test]
    fn without_removes_duration() {
        let policy = ExpiryPolicy::severity_defaults().without(NotificationType::Success);
        assert!(policy.duration_for(NotificationType::Success).is_none());
        assert!(policy.duration_for(NotificationType::Info).is_some());
    }

    #[test]
    fn from_config_maps_each_type() {
        let config = ExpiryConfig {
            success_secs: Some(2),
            warning_secs: Some(8),
            ..ExpiryConfig::default()
        };
        let policy = ExpiryPolicy::from_config(&config);

        assert_eq!(
            policy.duration_for(NotificationType::Success),
            Some(Duration::from_secs(2))
        );
        assert_eq!(
            policy.duration_for(NotificationType::Warning),
            Some(Duration::from_secs(8))
        );
        assert_eq!(policy.duration_for(NotificationType::Info), None);
        assert_eq!(policy.duration_for(NotificationType::Error), None);
    }

    #[tokio::test(start_paused = true)]
    async fn run_expires_items_as_time_passes() {
        let store = Store::new();
        let container =
            Container::new(store.clone()).with_expiry(ExpiryPolicy::severity_defaults());
        let task = spawn(container, Duration::from_millis(250));

        let success = store.add("saved", NotificationType::Success);
        let warning = store.add("slow disk", NotificationType::Warning);
        let error = store.add("failed", NotificationType::Error);

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(store.len(), 3);

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(!store.contains(success));
        assert!(store.contains(warning));

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(!store.contains(warning));
        assert!(store.contains(error));

        task.abort();

        let expired: Vec<_> = store
            .history()
            .into_iter()
            .filter_map(|event| match event.kind {
                StoreEventKind::Removed { id, reason } => Some((id, reason)),
                StoreEventKind::Added { .. } => None,
            })
            .collect();
        assert_eq!(
            expired,
            vec![
                (success, RemovalReason::Expired),
                (warning, RemovalReason::Expired)
            ]
        );
    }
}
