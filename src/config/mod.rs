// SPDX-License-Identifier: MPL-2.0
//! This module handles the notification settings, including loading and saving
//! them to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[expiry]` - Opt-in auto-dismiss durations per notification type
//! - `[diagnostics]` - Store event history size
//!
//! Every expiry duration is optional. A missing duration means notifications
//! of that type stay visible until they are dismissed.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `TOAST_DISPATCH_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toast_dispatch::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.expiry.success_secs = Some(3);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::diagnostics::HistoryCapacity;
use crate::error::{Error, Result};
use crate::notifications::NotificationType;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Warning key returned by [`load`] when an existing file cannot be parsed.
pub const LOAD_WARNING_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// Auto-dismiss settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpiryConfig {
    /// Seconds before a success notification is dismissed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_secs: Option<u64>,

    /// Seconds before an info notification is dismissed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_secs: Option<u64>,

    /// Seconds before a warning notification is dismissed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_secs: Option<u64>,

    /// Seconds before an error notification is dismissed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_secs: Option<u64>,

    /// Interval between expiry checks, in milliseconds.
    #[serde(
        default = "default_tick_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub tick_interval_ms: Option<u64>,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            success_secs: None,
            info_secs: None,
            warning_secs: None,
            error_secs: None,
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl ExpiryConfig {
    /// Returns the clamped auto-dismiss duration for `kind`, if any.
    #[must_use]
    pub fn duration_for(&self, kind: NotificationType) -> Option<Duration> {
        let secs = match kind {
            NotificationType::Success => self.success_secs,
            NotificationType::Info => self.info_secs,
            NotificationType::Warning => self.warning_secs,
            NotificationType::Error => self.error_secs,
        }?;
        Some(Duration::from_secs(
            secs.clamp(MIN_EXPIRY_SECS, MAX_EXPIRY_SECS),
        ))
    }

    /// Returns the clamped tick interval.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        let ms = self
            .tick_interval_ms
            .unwrap_or(DEFAULT_TICK_INTERVAL_MS)
            .clamp(MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS);
        Duration::from_millis(ms)
    }
}

/// Diagnostics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsConfig {
    /// Number of store events kept in the history buffer.
    #[serde(
        default = "default_history_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub history_capacity: Option<usize>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
        }
    }
}

impl DiagnosticsConfig {
    /// Returns the validated history capacity.
    #[must_use]
    pub fn history_capacity(&self) -> HistoryCapacity {
        self.history_capacity
            .map(HistoryCapacity::new)
            .unwrap_or_default()
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub expiry: ExpiryConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_tick_interval_ms() -> Option<u64> {
    Some(DEFAULT_TICK_INTERVAL_MS)
}

fn default_history_capacity() -> Option<usize> {
    Some(DEFAULT_HISTORY_CAPACITY)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("Falling back to default settings: {err}");
                    return (Config::default(), Some(LOAD_WARNING_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    log::info!("Loading configuration from {path:?}");
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
