// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Change, ChangeStatus, Summary};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::{Change, ChangeStatus};
    use proptest::prelude::*;

    pub fn arb_change_status() -> impl Strategy<Value = ChangeStatus> {
        prop_oneof![
            Just(ChangeStatus::Canceled),
            Just(ChangeStatus::Checked),
            Just(ChangeStatus::Failed),
            Just(ChangeStatus::Pending),
            Just(ChangeStatus::RunningFailed),
            Just(ChangeStatus::RunningSuccessfully),
            Just(ChangeStatus::Unknown),
        ]
    }

    pub fn arb_change() -> impl Strategy<Value = Change> {
        (0i64..50, any::<bool>(), arb_change_status()).prop_map(|(id, personal, status)| {
            Change::builder().id(id).is_personal(personal).status(status).build()
        })
    }
}

// ── Factory functions ───────────────────────────────────────────────────

pub fn change(id: i64, status: ChangeStatus) -> Change {
    Change::builder().id(id).status(status).build()
}

pub fn personal_change(id: i64, status: ChangeStatus) -> Change {
    Change::builder().id(id).is_personal(true).status(status).build()
}

/// Split a flat list into the committed and personal partitions
pub fn summary_of(changes: Vec<Change>) -> Summary {
    let (personal_changes, changes) = changes.into_iter().partition(|c| c.is_personal);
    Summary { changes, personal_changes, visible_projects: Vec::new() }
}
