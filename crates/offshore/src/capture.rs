// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot and restore of a caller's exportable variables
//!
//! The store never inspects caller scope. The caller hands over a
//! `Bindings` implementation that names the exportable variables and gives
//! read/write access to their values.

use crate::codec::Codec;
use crate::error::{StoreError, Warning};
use crate::store::Store;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// A caller-owned variable table that can be snapshotted into a store
pub trait Bindings {
    /// Names the caller has marked for snapshot/restore
    fn exportable_names(&self) -> Vec<String>;

    /// Current value of a variable, if bound
    fn get(&self, name: &str) -> Option<Value>;

    /// Bind a variable to a value
    fn set(&mut self, name: &str, value: Value);
}

/// In-memory variable table with an explicit exportable set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VarTable {
    vars: BTreeMap<String, Value>,
    exportable: BTreeSet<String>,
}

impl VarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable and mark it exportable
    pub fn declare(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let name = name.into();
        self.exportable.insert(name.clone());
        self.vars.insert(name, value.into());
        self
    }

    /// Mark a name exportable without binding it
    pub fn export(&mut self, name: impl Into<String>) -> &mut Self {
        self.exportable.insert(name.into());
        self
    }

    /// Bind a variable that is not exportable
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn is_exportable(&self, name: &str) -> bool {
        self.exportable.contains(name)
    }
}

impl Bindings for VarTable {
    fn exportable_names(&self) -> Vec<String> {
        self.exportable.iter().cloned().collect()
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }
}

/// What a snapshot stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotReport {
    pub stored: Vec<String>,
    pub warnings: Vec<Warning>,
}

/// What a restore wrote back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl RestoreReport {
    /// Exportable names that were not found in the store
    pub fn missing(&self) -> Vec<&str> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                Warning::ExportKeyMissing(key) => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

fn record(warnings: &mut Vec<Warning>, warning: Warning) {
    warning.emit();
    warnings.push(warning);
}

impl<C: Codec> Store<C> {
    /// Copy every exportable variable into the store, then save
    ///
    /// The save happens even when nothing was exportable.
    pub fn snapshot<B: Bindings + ?Sized>(
        &mut self,
        bindings: &B,
    ) -> Result<SnapshotReport, StoreError> {
        let names = bindings.exportable_names();
        let mut report = SnapshotReport::default();

        if names.is_empty() {
            record(&mut report.warnings, Warning::ExportSetEmpty);
        }

        for name in names {
            match bindings.get(&name) {
                Some(value) => {
                    self.insert_raw(name.clone(), value);
                    report.stored.push(name);
                }
                None => record(&mut report.warnings, Warning::ExportUnbound(name)),
            }
        }

        self.save()?;
        tracing::info!(stored = report.stored.len(), "snapshot saved");
        Ok(report)
    }

    /// Reload the store and write every exportable name it holds back into
    /// `bindings`
    ///
    /// Names absent from the store are skipped with a warning each.
    pub fn restore<B: Bindings + ?Sized>(
        &mut self,
        bindings: &mut B,
    ) -> Result<RestoreReport, StoreError> {
        let names = bindings.exportable_names();
        let mut report = RestoreReport::default();

        if names.is_empty() {
            record(&mut report.warnings, Warning::ExportSetEmpty);
        }

        // load() has already logged its own warning
        if let Some(warning) = self.load()?.warning() {
            report.warnings.push(warning);
        }

        for name in names {
            match self.as_map().get(&name) {
                Some(value) => {
                    bindings.set(&name, value.clone());
                    report.restored.push(name);
                }
                None => record(&mut report.warnings, Warning::ExportKeyMissing(name)),
            }
        }

        tracing::info!(
            restored = report.restored.len(),
            missing = report.missing().len(),
            "snapshot restored"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
