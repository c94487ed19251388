// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Attribute-style access to a single named entry
//!
//! `store.attr::<u32>("retries")` gives a typed handle whose `get`, `set`
//! and `delete` go through the store's own operations, so autoload and
//! autosave apply exactly as they do for keyed access.

use crate::codec::{Codec, JsonCodec};
use crate::error::StoreError;
use crate::store::Store;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Typed handle to one entry of a `Store`
pub struct Attr<'a, T, C: Codec = JsonCodec> {
    store: &'a mut Store<C>,
    name: String,
    _value: PhantomData<fn() -> T>,
}

impl<'a, T, C: Codec> Attr<'a, T, C> {
    pub(crate) fn new(store: &'a mut Store<C>, name: String) -> Self {
        Self {
            store,
            name,
            _value: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exists(&mut self) -> Result<bool, StoreError> {
        self.store.contains(&self.name)
    }

    /// Remove the entry; fails with `KeyMissing` if it is not set
    pub fn delete(&mut self) -> Result<(), StoreError> {
        self.store.delete(&self.name).map(|_| ())
    }
}

impl<T: DeserializeOwned, C: Codec> Attr<'_, T, C> {
    pub fn get(&mut self) -> Result<T, StoreError> {
        self.store.get_as(&self.name)
    }

    /// The stored value, or `None` when the entry is not set
    pub fn get_opt(&mut self) -> Result<Option<T>, StoreError> {
        match self.store.get_as(&self.name) {
            Ok(value) => Ok(Some(value)),
            Err(StoreError::KeyMissing(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<T: Serialize, C: Codec> Attr<'_, T, C> {
    pub fn set(&mut self, value: &T) -> Result<(), StoreError> {
        self.store.set_as(self.name.clone(), value)
    }
}

#[cfg(test)]
#[path = "attr_tests.rs"]
mod tests;
