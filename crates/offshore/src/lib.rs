// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! offshore: a small persistent key-value store backed by a single file
//!
//! This crate provides:
//! - A durable store that rewrites the whole mapping under an exclusive file lock
//! - Optional autosave (persist on every mutation) and autoload (reload before every read)
//! - Attribute-style typed handles over the same get/set/delete operations
//! - Snapshot/restore of a caller-supplied variable table

pub mod attr;
pub mod capture;
pub mod codec;
pub mod config;
pub mod error;
pub mod lock;
pub mod store;

pub use attr::Attr;
pub use capture::{Bindings, RestoreReport, SnapshotReport, VarTable};
pub use codec::{Codec, CodecError, JsonCodec, StoreMap};
pub use config::{ConfigError, StoreConfig, DEFAULT_FILENAME, DEFAULT_LOCK_TIMEOUT};
pub use error::{StoreError, Warning};
pub use lock::{FileLock, LockError};
pub use store::{LoadOutcome, Store};

pub use serde_json::Value;
