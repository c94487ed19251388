// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable key-value store backed by a single file
//!
//! The whole mapping lives in memory and is reconciled with disk only at
//! load and save. Every save rewrites the entire file under an exclusive
//! lock and fsyncs before the lock is released; every load reads the
//! entire file under the same lock, so cooperating processes see a total
//! order of whole-mapping writes and never a torn blob.
//!
//! With `autosave`, each mutation is followed by a save. With `autoload`,
//! each read is preceded by a load. Both flags are consulted on every call.

use crate::attr::Attr;
use crate::codec::{Codec, CodecError, JsonCodec, StoreMap};
use crate::config::StoreConfig;
use crate::error::{StoreError, Warning};
use crate::lock::FileLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of an explicit `load`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Memory now mirrors the file
    Loaded { entries: usize },
    /// No backing file; memory was left untouched
    FileAbsent { path: PathBuf },
}

impl LoadOutcome {
    /// The warning raised by this load, if any
    pub fn warning(&self) -> Option<Warning> {
        match self {
            LoadOutcome::Loaded { .. } => None,
            LoadOutcome::FileAbsent { path } => Some(Warning::FileAbsent(path.clone())),
        }
    }
}

/// A key-value store mirrored to one file
///
/// Not synchronized for concurrent use from several threads; wrap it in a
/// mutex if it must be shared.
#[derive(Debug)]
pub struct Store<C: Codec = JsonCodec> {
    config: StoreConfig,
    path: PathBuf,
    codec: C,
    map: StoreMap,
}

impl Store<JsonCodec> {
    /// Open a store with the JSON codec
    ///
    /// If the backing file does not exist it is created holding an empty
    /// mapping.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        Self::with_codec(config, JsonCodec::new())
    }
}

impl<C: Codec> Store<C> {
    /// Open a store with a custom codec
    pub fn with_codec(config: StoreConfig, codec: C) -> Result<Self, StoreError> {
        let path = config.resolved_path()?;
        let mut store = Self {
            config,
            path,
            codec,
            map: StoreMap::new(),
        };

        match store.read_map() {
            Ok(map) => store.map = map,
            Err(StoreError::FileAbsent(_)) => {
                tracing::debug!(path = %store.path.display(), "creating store file");
                store.save()?;
            }
            Err(e) => return Err(e),
        }

        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Absolute path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The in-memory mapping, without reloading
    pub fn as_map(&self) -> &StoreMap {
        &self.map
    }

    pub fn into_map(self) -> StoreMap {
        self.map
    }

    /// Look up a key, reloading first when autoload is on
    pub fn get(&mut self, key: &str) -> Result<&Value, StoreError> {
        self.autoload()?;
        self.map
            .get(key)
            .ok_or_else(|| StoreError::KeyMissing(key.to_string()))
    }

    /// Look up a key and convert it to `T`
    pub fn get_as<T: DeserializeOwned>(&mut self, key: &str) -> Result<T, StoreError> {
        let value = self.get(key)?.clone();
        serde_json::from_value(value).map_err(|e| CodecError::Decode(e.to_string()).into())
    }

    /// Insert or replace a key, saving afterwards when autosave is on
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), StoreError> {
        self.map.insert(key.into(), value.into());
        self.autosave()
    }

    /// Serialize `value` and store it under `key`
    pub fn set_as<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(|e| CodecError::Encode(e.to_string()))?;
        self.set(key, value)
    }

    /// Remove a key, saving afterwards when autosave is on
    pub fn delete(&mut self, key: &str) -> Result<Value, StoreError> {
        let value = self
            .map
            .remove(key)
            .ok_or_else(|| StoreError::KeyMissing(key.to_string()))?;
        self.autosave()?;
        Ok(value)
    }

    pub fn contains(&mut self, key: &str) -> Result<bool, StoreError> {
        self.autoload()?;
        Ok(self.map.contains_key(key))
    }

    pub fn len(&mut self) -> Result<usize, StoreError> {
        self.autoload()?;
        Ok(self.map.len())
    }

    pub fn is_empty(&mut self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    pub fn keys(&mut self) -> Result<Vec<String>, StoreError> {
        self.autoload()?;
        Ok(self.map.keys().cloned().collect())
    }

    /// Typed attribute-style handle for `name`
    pub fn attr<T>(&mut self, name: impl Into<String>) -> Attr<'_, T, C> {
        Attr::new(self, name.into())
    }

    /// Empty the mapping and save, regardless of autosave
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.map.clear();
        self.save()
    }

    /// Durably write the whole mapping
    ///
    /// The file is truncated and rewritten while the lock is held, then
    /// synced to stable storage before the lock is released.
    pub fn save(&self) -> Result<(), StoreError> {
        let span = tracing::debug_span!("store.save", path = %self.path.display());
        let _guard = span.enter();
        let start = Instant::now();

        let bytes = self.codec.encode(&self.map)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        let mut lock = FileLock::acquire(
            file,
            &self.path,
            self.config.lock_timeout,
            self.config.poll_interval,
        )?;

        let file = lock.file_mut();
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        {
            let mut writer = BufWriter::new(&mut *file);
            writer.write_all(&bytes)?;
            writer.flush()?;
        }
        file.sync_all()?;
        drop(lock);

        tracing::debug!(
            entries = self.map.len(),
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "saved"
        );
        Ok(())
    }

    /// Replace memory with the file's contents
    ///
    /// A missing file is not an error: a warning is logged and returned and
    /// memory is left as it was.
    pub fn load(&mut self) -> Result<LoadOutcome, StoreError> {
        match self.read_map() {
            Ok(map) => {
                self.map = map;
                Ok(LoadOutcome::Loaded {
                    entries: self.map.len(),
                })
            }
            Err(StoreError::FileAbsent(path)) => {
                let outcome = LoadOutcome::FileAbsent { path };
                if let Some(warning) = outcome.warning() {
                    warning.emit();
                }
                Ok(outcome)
            }
            Err(e) => Err(e),
        }
    }

    pub(crate) fn insert_raw(&mut self, key: String, value: Value) {
        self.map.insert(key, value);
    }

    /// Read and decode the file under the lock
    ///
    /// A zero-length file is a store whose first save has not landed yet
    /// and reads as absent.
    fn read_map(&self) -> Result<StoreMap, StoreError> {
        let span = tracing::debug_span!("store.load", path = %self.path.display());
        let _guard = span.enter();
        let start = Instant::now();

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::FileAbsent(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let mut lock = FileLock::acquire(
            file,
            &self.path,
            self.config.lock_timeout,
            self.config.poll_interval,
        )?;

        let mut bytes = Vec::new();
        lock.file_mut().read_to_end(&mut bytes)?;
        drop(lock);

        if bytes.is_empty() {
            return Err(StoreError::FileAbsent(self.path.clone()));
        }
        let map = self.codec.decode(&bytes)?;

        tracing::debug!(
            entries = map.len(),
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "loaded"
        );
        Ok(map)
    }

    fn autoload(&mut self) -> Result<(), StoreError> {
        if self.config.autoload {
            self.load()?;
        }
        Ok(())
    }

    fn autosave(&self) -> Result<(), StoreError> {
        if self.config.autosave {
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
