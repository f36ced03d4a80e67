// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deserialized summary payloads.
//!
//! Every field is optional on the wire. Conversion applies the fallbacks:
//! missing status is `Unknown`, missing counts are 0, a missing VCS date is
//! the clock's current time, missing text fields are empty.

use crate::change::{Build, BuildStatus, Change, ChangeStatus, Summary};
use crate::clock::Clock;
use crate::id::BuildId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildPayload {
    pub id: Option<String>,
    pub build_type_id: Option<String>,
    pub number: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChangePayload {
    pub id: Option<i64>,
    pub is_personal: Option<bool>,
    pub status: Option<String>,
    pub builds: Vec<BuildPayload>,
    pub change_count: Option<u32>,
    pub description: Option<String>,
    pub vcs_name: Option<String>,
    pub vcs_date: Option<u64>,
    pub display_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryPayload {
    pub changes: Vec<ChangePayload>,
    pub personal_changes: Vec<ChangePayload>,
    pub visible_projects: Vec<String>,
}

impl BuildPayload {
    pub fn into_build(self) -> Build {
        let status = match self.status.as_deref() {
            Some("SUCCESS") => BuildStatus::Success,
            Some("FAILURE") => BuildStatus::Failure,
            Some("ERROR") => BuildStatus::Error,
            Some("RUNNING") => BuildStatus::Running,
            Some("QUEUED") => BuildStatus::Queued,
            _ => BuildStatus::Unknown,
        };
        Build {
            id: BuildId::new(self.id.unwrap_or_default()),
            build_type: self.build_type_id.unwrap_or_default(),
            number: self.number.unwrap_or_default(),
            status,
        }
    }
}

impl ChangePayload {
    /// Convert into a [`Change`]; `personal` is the partition the payload
    /// arrived in and is used when the payload has no flag of its own.
    pub fn into_change(self, personal: bool, clock: &impl Clock) -> Change {
        Change {
            id: self.id.unwrap_or_default(),
            is_personal: self.is_personal.unwrap_or(personal),
            status: self.status.as_deref().map(ChangeStatus::parse).unwrap_or_default(),
            builds: self.builds.into_iter().map(BuildPayload::into_build).collect(),
            change_count: self.change_count.unwrap_or(0),
            description: self.description.unwrap_or_default(),
            vcs_name: self.vcs_name.unwrap_or_default(),
            vcs_date_ms: self.vcs_date.unwrap_or_else(|| clock.epoch_ms()),
            display_version: self.display_version.unwrap_or_default(),
        }
    }
}

impl SummaryPayload {
    pub fn into_summary(self, clock: &impl Clock) -> Summary {
        Summary {
            changes: self.changes.into_iter().map(|c| c.into_change(false, clock)).collect(),
            personal_changes: self
                .personal_changes
                .into_iter()
                .map(|c| c.into_change(true, clock))
                .collect(),
            visible_projects: self.visible_projects,
        }
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
