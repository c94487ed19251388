// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error and warning types for store operations

use crate::codec::CodecError;
use crate::config::ConfigError;
use crate::lock::LockError;
use std::path::PathBuf;
use thiserror::Error;

/// Hard failures surfaced to the caller
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("lock error: {0}")]
    Lock(#[from] LockError),
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("key not found: {0}")]
    KeyMissing(String),
    #[error("state store not found in '{}'", .0.display())]
    FileAbsent(PathBuf),
}

impl StoreError {
    /// True when the error came from failing to acquire the file lock in time
    pub fn is_lock_timeout(&self) -> bool {
        matches!(self, StoreError::Lock(LockError::Timeout { .. }))
    }
}

/// Non-fatal conditions, logged and handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Explicit load found no backing file; memory was left untouched
    FileAbsent(PathBuf),
    /// The caller declared no exportable names
    ExportSetEmpty,
    /// An exportable name had no entry in the store during restore
    ExportKeyMissing(String),
    /// An exportable name had no current binding during snapshot
    ExportUnbound(String),
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::FileAbsent(path) => {
                write!(f, "state store not found in '{}'", path.display())
            }
            Warning::ExportSetEmpty => write!(f, "no exportable variables found"),
            Warning::ExportKeyMissing(key) => write!(
                f,
                "key '{}' was not found in the state store and has not been restored",
                key
            ),
            Warning::ExportUnbound(key) => write!(
                f,
                "exportable variable '{}' has no value and has not been stored",
                key
            ),
        }
    }
}

impl Warning {
    /// Emit this warning through tracing
    pub(crate) fn emit(&self) {
        tracing::warn!(warning = %self, "offshore warning");
    }
}
