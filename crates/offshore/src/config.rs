// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Backing file name used when none is given
pub const DEFAULT_FILENAME: &str = ".offshore";

/// How long a load or save waits for the file lock
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors from building a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot resolve current directory: {0}")]
    CurrentDir(#[from] std::io::Error),
    #[error("invalid store config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration for a `Store`, fixed once the store is opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backing file; relative paths resolve against the working directory at open
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Persist the whole mapping after every mutation
    #[serde(default)]
    pub autosave: bool,
    /// Reload the whole mapping before every read
    #[serde(default)]
    pub autoload: bool,
    #[serde(default = "default_lock_timeout", with = "humantime_serde")]
    pub lock_timeout: Duration,
    /// Retry cadence while waiting on a contended lock
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            autosave: false,
            autoload: false,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Configuration for `filename` inside the current working directory
    pub fn in_current_dir(filename: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::new(std::env::current_dir()?.join(filename)))
    }

    /// Parse a configuration table, e.g. a section of a host application's TOML
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn with_autoload(mut self, autoload: bool) -> Self {
        self.autoload = autoload;
        self
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The configured path made absolute against the current directory
    pub(crate) fn resolved_path(&self) -> Result<PathBuf, ConfigError> {
        if self.path.is_absolute() {
            Ok(self.path.clone())
        } else {
            Ok(std::env::current_dir()?.join(&self.path))
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FILENAME)
    }
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_FILENAME)
}

fn default_lock_timeout() -> Duration {
    DEFAULT_LOCK_TIMEOUT
}

fn default_poll_interval() -> Duration {
    DEFAULT_POLL_INTERVAL
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
