// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the notification store.
//!
//! Every applied mutation is recorded as a [`StoreEvent`] in a
//! memory-bounded [`CircularBuffer`], so the recent lifecycle of
//! notifications (added, dismissed, expired) can be inspected after the fact.

mod buffer;
mod events;

pub use buffer::{CircularBuffer, HistoryCapacity};
pub use events::{RemovalReason, StoreEvent, StoreEventKind};
