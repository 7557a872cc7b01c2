// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications are short status messages (saved, failed, ...) raised from
//! anywhere in the application and shown by whatever UI is mounted.
//!
//! # Components
//!
//! - [`notification`] - `NotificationItem`, its id and the closed `NotificationType`
//! - [`store`] - `Store`, the single ordered collection with observers
//! - [`toast`] - process-wide dispatch facade (`toast::success(..)` etc.)
//! - [`container`] - stateless render collaborator with dismissal routing
//! - [`expiry`] - opt-in auto-dismiss policy and its tokio driver
//!
//! # Usage
//!
//! ```
//! use toast_dispatch::notifications::{Container, Store, TextRenderer, Toaster};
//!
//! let store = Store::new();
//! let toaster = Toaster::new(store.clone());
//! let container = Container::new(store);
//!
//! let id = toaster.error("Upload failed");
//! toaster.success("Draft saved");
//!
//! let lines = container.view(&mut TextRenderer::new());
//! assert_eq!(lines, vec!["✖ [error] Upload failed", "✔ [success] Draft saved"]);
//!
//! container.dismiss(id);
//! assert_eq!(container.visible().len(), 1);
//! ```
//!
//! # Design Considerations
//!
//! - Items never expire unless an [`ExpiryPolicy`] is attached to a container
//! - The container renders in store order and never reorders
//! - Removing an unknown id is a no-op, so a timer and a click racing to
//!   dismiss the same item is harmless

pub mod container;
pub mod expiry;
pub mod notification;
pub mod store;
pub mod toast;

pub use container::{Container, Message as NotificationMessage, Renderer, TextRenderer};
pub use expiry::ExpiryPolicy;
pub use notification::{NotificationId, NotificationItem, NotificationType};
pub use store::{Snapshot, Store, Subscription};
pub use toast::Toaster;
