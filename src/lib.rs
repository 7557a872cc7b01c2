// SPDX-License-Identifier: MPL-2.0
//! `toast_dispatch` is a process-wide toast notification store.
//!
//! Any code can raise a notification through the [`notifications::toast`]
//! facade; a [`notifications::Container`] mounted on the same store renders
//! the pending notifications in order and routes dismissals back. Settings
//! are read from a TOML file through [`config`], and store activity is kept
//! in a bounded [`diagnostics`] history.

#![doc(html_root_url = "https://docs.rs/toast_dispatch/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notifications;
pub mod paths;

pub use notifications::toast;
