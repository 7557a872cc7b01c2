// SPDX-License-Identifier: MPL-2.0
//! Notification container.
//!
//! The container is the only rendering collaborator. It keeps no copy of the
//! notifications: every view reads the store, every dismissal goes back to
//! the store. Dropping a container and mounting a new one on the same store
//! therefore shows exactly the same notifications.

use super::expiry::ExpiryPolicy;
use super::notification::{NotificationId, NotificationItem};
use super::store::{Snapshot, Store};
use super::toast;
use crate::diagnostics::RemovalReason;
use std::convert::Infallible;
use std::fmt;
use std::time::Instant;

/// Messages for notification state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// Tick for checking auto-dismiss deadlines.
    Tick,
}

/// Turns one notification into something displayable.
pub trait Renderer {
    type Output;
    type Error: fmt::Display;

    fn render(&mut self, item: &NotificationItem) -> Result<Self::Output, Self::Error>;
}

/// Renders a store's notifications and routes dismissal back to it.
#[derive(Debug, Clone)]
pub struct Container {
    store: Store,
    expiry: ExpiryPolicy,
}

impl Container {
    /// Mounts a container on `store`. Nothing auto-expires.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            expiry: ExpiryPolicy::never(),
        }
    }

    /// Mounts a container on the process-wide store.
    #[must_use]
    pub fn global() -> Self {
        Self::new(toast::global().clone())
    }

    #[must_use]
    pub fn with_expiry(mut self, policy: ExpiryPolicy) -> Self {
        self.expiry = policy;
        self
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn expiry(&self) -> &ExpiryPolicy {
        &self.expiry
    }

    /// Returns the notifications to display, oldest first.
    #[must_use]
    pub fn visible(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Renders the current notifications in store order.
    ///
    /// An item the renderer fails on is logged and skipped; the others
    /// are still rendered.
    pub fn view<R: Renderer>(&self, renderer: &mut R) -> Vec<R::Output> {
        self.view_snapshot(&self.store.snapshot(), renderer)
    }

    /// Renders a snapshot received from an observer or watch channel.
    pub fn view_snapshot<R: Renderer>(
        &self,
        snapshot: &Snapshot,
        renderer: &mut R,
    ) -> Vec<R::Output> {
        snapshot
            .iter()
            .filter_map(|item| match renderer.render(item) {
                Ok(output) => Some(output),
                Err(err) => {
                    log::warn!("Failed to render notification {}: {err}", item.id());
                    None
                }
            })
            .collect()
    }

    /// Dismisses a notification by its ID.
    ///
    /// Returns `true` if the notification was found and removed.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        self.store.remove(id)
    }

    /// Removes every notification whose deadline has passed.
    pub fn tick(&self) -> Vec<NotificationId> {
        self.tick_at(Instant::now())
    }

    /// Removes every notification whose deadline is at or before `now`.
    ///
    /// Returns the ids this call removed. Items dismissed concurrently are
    /// not reported.
    pub fn tick_at(&self, now: Instant) -> Vec<NotificationId> {
        if self.expiry.is_never() {
            return Vec::new();
        }

        let due: Vec<NotificationId> = self
            .store
            .snapshot()
            .iter()
            .filter(|item| self.expiry.is_expired(item, now))
            .map(NotificationItem::id)
            .collect();

        due.into_iter()
            .filter(|id| self.store.remove_as(*id, RemovalReason::Expired))
            .collect()
    }

    /// Returns the earliest pending deadline, if any item can expire.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.store
            .snapshot()
            .iter()
            .filter_map(|item| self.expiry.deadline(item))
            .min()
    }

    /// Handles a notification message.
    pub fn handle_message(&self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Tick => {
                self.tick();
            }
        }
    }
}

/// Renders notifications as single terminal lines:
/// `<glyph> [<type>] <message>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    show_ids: bool,
}

impl TextRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the notification id, e.g. `(toast-3)`, to each line.
    #[must_use]
    pub fn with_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }
}

impl Renderer for TextRenderer {
    type Output = String;
    type Error = Infallible;

    fn render(&mut self, item: &NotificationItem) -> Result<String, Infallible> {
        let kind = item.kind();
        let mut line = format!("{} [{}] {}", kind.glyph(), kind.label(), item.message());
        if self.show_ids {
            line.push_str(&format!(" ({})", item.id()));
        }
        Ok(line)
    }
}
