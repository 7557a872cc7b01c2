// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Expiry**: Auto-dismiss duration bounds and tick interval
//! - **History**: Store event history capacity

// ==========================================================================
// Expiry Defaults
// ==========================================================================

/// Minimum auto-dismiss duration (in seconds).
pub const MIN_EXPIRY_SECS: u64 = 1;

/// Maximum auto-dismiss duration (in seconds).
pub const MAX_EXPIRY_SECS: u64 = 3600;

/// Auto-dismiss duration for success and info notifications in the
/// severity preset (in seconds).
pub const PRESET_SHORT_EXPIRY_SECS: u64 = 3;

/// Auto-dismiss duration for warnings in the severity preset (in seconds).
pub const PRESET_LONG_EXPIRY_SECS: u64 = 5;

/// Default interval between expiry ticks (in milliseconds).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 250;

/// Minimum interval between expiry ticks (in milliseconds).
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Maximum interval between expiry ticks (in milliseconds).
pub const MAX_TICK_INTERVAL_MS: u64 = 10_000;

// ==========================================================================
// History Defaults
// ==========================================================================

/// Default number of store events kept for diagnostics.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Minimum number of store events kept for diagnostics.
pub const MIN_HISTORY_CAPACITY: usize = 10;

/// Maximum number of store events kept for diagnostics.
pub const MAX_HISTORY_CAPACITY: usize = 10_000;
