// SPDX-License-Identifier: MPL-2.0
//! The notification store.
//!
//! `Store` owns the ordered collection of pending notifications. Every
//! mutation goes through [`Store::add`] or [`Store::remove`]; readers get an
//! immutable, versioned [`Snapshot`] either on demand, through a synchronous
//! observer callback, or through a `tokio::sync::watch` receiver.
//!
//! Mutations are applied and snapshotted under a single lock, so no reader
//! ever sees a half-applied change. Each committed snapshot is queued in an
//! outbox, and one thread at a time drains that outbox to the observers and
//! the watch channel. Observers therefore see versions in increasing order,
//! and they run with the lock released, which lets an observer call back
//! into the store (e.g. to dismiss an item).

use super::notification::{NotificationId, NotificationItem, NotificationType};
use crate::config::Config;
use crate::diagnostics::{CircularBuffer, HistoryCapacity, RemovalReason, StoreEvent};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::watch;

/// Immutable view of the collection at one version.
///
/// Items are in insertion order (oldest first).
///
/// Items are shared with the store, so taking a snapshot never copies
/// messages.
#[derive(Debug, Clone)]
pub struct Snapshot {
    version: u64,
    items: Arc<[Arc<NotificationItem>]>,
}

/// Iterator over the items of a [`Snapshot`].
pub type Iter<'a> = std::iter::Map<
    std::slice::Iter<'a, Arc<NotificationItem>>,
    fn(&Arc<NotificationItem>) -> &NotificationItem,
>;

fn item_ref(item: &Arc<NotificationItem>) -> &NotificationItem {
    item
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            version: 0,
            items: Arc::from(Vec::new()),
        }
    }

    /// Returns the store version this snapshot was taken at.
    ///
    /// Versions increase by one on every applied mutation, so of two
    /// snapshots from the same store the higher version is the newer one.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn items(&self) -> &[Arc<NotificationItem>] {
        &self.items
    }

    pub fn iter(&self) -> Iter<'_> {
        self.items
            .iter()
            .map(item_ref as fn(&Arc<NotificationItem>) -> &NotificationItem)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&NotificationItem> {
        self.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the ids in collection order.
    #[must_use]
    pub fn ids(&self) -> Vec<NotificationId> {
        self.iter().map(NotificationItem::id).collect()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a NotificationItem;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

type Observer = Arc<dyn Fn(&Snapshot) + Send + Sync>;

struct State {
    items: Vec<Arc<NotificationItem>>,
    version: u64,
    history: CircularBuffer<StoreEvent>,
    /// Committed snapshots not yet handed to observers, oldest first.
    outbox: VecDeque<Snapshot>,
    /// Set while some thread is draining `outbox`.
    delivering: bool,
}

impl State {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.version,
            items: Arc::from(self.items.as_slice()),
        }
    }

    /// Bumps the version and queues the new snapshot for delivery.
    ///
    /// Returns true if the caller must drain the outbox, false if another
    /// call is already draining it.
    fn commit(&mut self) -> bool {
        self.version += 1;
        let snapshot = self.snapshot();
        self.outbox.push_back(snapshot);
        !std::mem::replace(&mut self.delivering, true)
    }
}

struct Inner {
    state: Mutex<State>,
    observers: Mutex<Vec<(u64, Observer)>>,
    next_observer: AtomicU64,
    watch_tx: watch::Sender<Snapshot>,
}

/// Handle to a notification collection.
///
/// Cloning is cheap; all clones share the same collection.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

impl Store {
    /// Creates an empty store with the default history capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_capacity(HistoryCapacity::default())
    }

    /// Creates an empty store configured from `config`.
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self::with_history_capacity(config.diagnostics.history_capacity())
    }

    #[must_use]
    pub fn with_history_capacity(capacity: HistoryCapacity) -> Self {
        let (watch_tx, _) = watch::channel(Snapshot::empty());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    items: Vec::new(),
                    version: 0,
                    history: CircularBuffer::new(capacity),
                    outbox: VecDeque::new(),
                    delivering: false,
                }),
                observers: Mutex::new(Vec::new()),
                next_observer: AtomicU64::new(0),
                watch_tx,
            }),
        }
    }

    /// Appends a new notification and notifies observers.
    ///
    /// Returns the id of the new item so callers can remove it later.
    pub fn add(&self, message: impl Into<String>, kind: NotificationType) -> NotificationId {
        let message = message.into();
        let (id, drain) = {
            let mut state = lock(&self.inner.state);
            let item = NotificationItem::new(message, kind);
            let id = item.id();
            state.items.push(Arc::new(item));
            state.history.push(StoreEvent::added(id, kind));
            (id, state.commit())
        };

        log::debug!("Added {kind} notification {id}");
        if drain {
            self.drain_outbox();
        }
        id
    }

    /// Removes the notification with `id`, if present.
    ///
    /// Removing an unknown or already removed id is a no-op: the collection
    /// is left untouched and observers are not notified. Returns whether an
    /// item was removed.
    pub fn remove(&self, id: NotificationId) -> bool {
        self.remove_as(id, RemovalReason::Dismissed)
    }

    /// Same as [`Store::remove`], recording `reason` in the history.
    pub fn remove_as(&self, id: NotificationId, reason: RemovalReason) -> bool {
        let drain = {
            let mut state = lock(&self.inner.state);
            let Some(pos) = state.items.iter().position(|n| n.id() == id) else {
                log::trace!("Ignoring removal of unknown notification {id}");
                return false;
            };
            state.items.remove(pos);
            state.history.push(StoreEvent::removed(id, reason));
            state.commit()
        };

        log::debug!("Removed notification {id} ({reason:?})");
        if drain {
            self.drain_outbox();
        }
        true
    }

    /// Returns the current collection.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        lock(&self.inner.state).snapshot()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.inner.state).items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.inner.state).items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        lock(&self.inner.state).items.iter().any(|n| n.id() == id)
    }

    /// Returns the current version (number of applied mutations).
    #[must_use]
    pub fn version(&self) -> u64 {
        lock(&self.inner.state).version
    }

    /// Registers `observer` to be called after every applied mutation.
    ///
    /// The observer runs synchronously with each new snapshot, in version
    /// order. Usually that is on the mutating thread; if another thread is
    /// already delivering, that thread runs it before its own call returns.
    /// It stays registered until the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unregisters the observer"]
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = self.inner.next_observer.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.observers).push((id, Arc::new(observer)));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Returns a receiver that always holds the newest snapshot.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Snapshot> {
        self.inner.watch_tx.subscribe()
    }

    /// Returns the recorded store events, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<StoreEvent> {
        lock(&self.inner.state).history.iter().cloned().collect()
    }

    /// Hands queued snapshots to observers until the outbox is empty.
    ///
    /// Only one thread drains at a time. Mutations made meanwhile, including
    /// re-entrant ones from an observer, are queued and delivered by this
    /// loop in version order.
    fn drain_outbox(&self) {
        let _reset = DrainReset(&self.inner);
        loop {
            let next = {
                let mut state = lock(&self.inner.state);
                match state.outbox.pop_front() {
                    Some(snapshot) => snapshot,
                    None => {
                        state.delivering = false;
                        return;
                    }
                }
            };
            self.publish(&next);
        }
    }

    fn publish(&self, snapshot: &Snapshot) {
        self.inner.watch_tx.send_if_modified(|current| {
            if snapshot.version > current.version {
                *current = snapshot.clone();
                true
            } else {
                false
            }
        });

        let observers: Vec<Observer> = lock(&self.inner.observers)
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        log::trace!(
            "Notifying {} observer(s) of version {}",
            observers.len(),
            snapshot.version()
        );
        for observer in observers {
            observer(snapshot);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.inner.state);
        f.debug_struct("Store")
            .field("version", &state.version)
            .field("len", &state.items.len())
            .finish_non_exhaustive()
    }
}

/// Releases the drain flag if an observer panics mid-delivery.
struct DrainReset<'a>(&'a Inner);

impl Drop for DrainReset<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            lock(&self.0.state).delivering = false;
        }
    }
}

/// Keeps an observer registered; dropping it unregisters the observer.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    inner: Weak<Inner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner.observers).retain(|(id, _)| *id != self.id);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Mutations never panic halfway, so a poisoned state is still consistent.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
