// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remembers which changes have already been surfaced.
//!
//! Committed and personal changes live in separate partitions, so a
//! personal change and a committed change with the same id and status are
//! distinct. A status transition produces a new key and is seen again.

use std::collections::HashSet;

use tcr_core::{Change, Summary};

#[derive(Debug, Clone, Default)]
pub struct ChangeStorage {
    committed: HashSet<String>,
    personal: HashSet<String>,
}

impl ChangeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every key in `changes`; storing twice is a no-op
    pub fn store_new_changes<'a>(&mut self, changes: impl IntoIterator<Item = &'a Change>) {
        for change in changes {
            self.partition_mut(change).insert(change.key());
        }
    }

    /// Changes in `summary` (both partitions) whose key is not stored yet
    pub fn extract_new_changes_from_summary(&self, summary: &Summary) -> Vec<Change> {
        summary.all_changes().filter(|c| !self.contains(c)).cloned().collect()
    }

    pub fn contains(&self, change: &Change) -> bool {
        self.partition(change).contains(&change.key())
    }

    pub fn len(&self) -> usize {
        self.committed.len() + self.personal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything, e.g. after switching accounts
    pub fn reset(&mut self) {
        self.committed.clear();
        self.personal.clear();
    }

    fn partition(&self, change: &Change) -> &HashSet<String> {
        if change.is_personal {
            &self.personal
        } else {
            &self.committed
        }
    }

    fn partition_mut(&mut self, change: &Change) -> &mut HashSet<String> {
        if change.is_personal {
            &mut self.personal
        } else {
            &mut self.committed
        }
    }
}

#[cfg(test)]
#[path = "change_storage_tests.rs"]
mod tests;
