// SPDX-License-Identifier: MPL-2.0
//! Toast dispatch facade.
//!
//! Lets any code (an error handler, a background task, a utility function)
//! enqueue a notification without holding a reference to the store or to the
//! container that renders it.
//!
//! There is exactly one process-wide store. Install a configured one at
//! startup with [`install`]; otherwise the first call creates a default one.
//!
//! ```
//! use toast_dispatch::notifications::toast;
//!
//! let id = toast::success("Invoice saved");
//! assert!(toast::global().contains(id));
//! ```

use super::notification::{NotificationId, NotificationType};
use super::store::Store;
use std::sync::OnceLock;

/// Process-wide store, set once.
static GLOBAL: OnceLock<Store> = OnceLock::new();

/// Installs `store` as the process-wide store.
///
/// Must run before the first dispatch. Returns the rejected store if a
/// global store already exists.
pub fn install(store: Store) -> Result<(), Store> {
    GLOBAL.set(store)
}

/// Returns the process-wide store, creating a default one on first use.
pub fn global() -> &'static Store {
    GLOBAL.get_or_init(|| {
        log::debug!("No store installed, creating the default global store");
        Store::default()
    })
}

pub fn success(message: impl Into<String>) -> NotificationId {
    global().add(message, NotificationType::Success)
}

pub fn error(message: impl Into<String>) -> NotificationId {
    global().add(message, NotificationType::Error)
}

pub fn info(message: impl Into<String>) -> NotificationId {
    global().add(message, NotificationType::Info)
}

pub fn warning(message: impl Into<String>) -> NotificationId {
    global().add(message, NotificationType::Warning)
}

/// Injectable form of the facade, for code wired at a composition root.
#[derive(Debug, Clone)]
pub struct Toaster {
    store: Store,
}

impl Toaster {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Returns a toaster backed by the process-wide store.
    #[must_use]
    pub fn global() -> Self {
        Self::new(global().clone())
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.store.add(message, NotificationType::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.store.add(message, NotificationType::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.store.add(message, NotificationType::Info)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.store.add(message, NotificationType::Warning)
    }
}
