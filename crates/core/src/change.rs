// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote changes and builds as reported by a build-server summary.

use crate::id::BuildId;
use serde::{Deserialize, Serialize};

/// Aggregated status of a change across the builds that include it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeStatus {
    Canceled,
    Checked,
    Failed,
    Pending,
    RunningFailed,
    RunningSuccessfully,
    #[default]
    #[serde(other)]
    Unknown,
}

crate::simple_display! {
    ChangeStatus {
        Canceled => "CANCELED",
        Checked => "CHECKED",
        Failed => "FAILED",
        Pending => "PENDING",
        RunningFailed => "RUNNING_FAILED",
        RunningSuccessfully => "RUNNING_SUCCESSFULLY",
        Unknown => "UNKNOWN",
    }
}

impl ChangeStatus {
    /// Parse a server status name; anything unrecognised is `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "CANCELED" => Self::Canceled,
            "CHECKED" => Self::Checked,
            "FAILED" => Self::Failed,
            "PENDING" => Self::Pending,
            "RUNNING_FAILED" => Self::RunningFailed,
            "RUNNING_SUCCESSFULLY" => Self::RunningSuccessfully,
            _ => Self::Unknown,
        }
    }

    /// Whether the change has reached a final state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Canceled | Self::Checked | Self::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    Success,
    Failure,
    Error,
    Running,
    Queued,
    #[default]
    #[serde(other)]
    Unknown,
}

crate::simple_display! {
    BuildStatus {
        Success => "SUCCESS",
        Failure => "FAILURE",
        Error => "ERROR",
        Running => "RUNNING",
        Queued => "QUEUED",
        Unknown => "UNKNOWN",
    }
}

/// A build associated with a change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: BuildId,
    pub build_type: String,
    pub number: String,
    pub status: BuildStatus,
}

/// A remote change (commit or personal change) with its builds.
///
/// Identity for de-duplication is `(id, is_personal)`; see [`Change::key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub id: i64,
    pub is_personal: bool,
    pub status: ChangeStatus,
    pub builds: Vec<Build>,
    pub change_count: u32,
    pub description: String,
    pub vcs_name: String,
    /// Epoch milliseconds
    pub vcs_date_ms: u64,
    pub display_version: String,
}

crate::builder! {
    pub struct ChangeBuilder => Change {
        into {
            description: String = "test change",
            vcs_name: String = "git",
            display_version: String = "abc123",
        }
        set {
            id: i64 = 1,
            is_personal: bool = false,
            status: ChangeStatus = ChangeStatus::Pending,
            builds: Vec<Build> = Vec::new(),
            change_count: u32 = 1,
            vcs_date_ms: u64 = 1_000_000,
        }
    }
}

impl Change {
    /// De-duplication key: `"<id>:<status>"`.
    ///
    /// Two distinct changes sharing id and status within one partition
    /// collide; the key is an approximation, not a hash.
    pub fn key(&self) -> String {
        format!("{}:{}", self.id, self.status)
    }
}

/// Everything the server reports for the current user in one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub changes: Vec<Change>,
    pub personal_changes: Vec<Change>,
    pub visible_projects: Vec<String>,
}

impl Summary {
    /// Both partitions, committed changes first
    pub fn all_changes(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter().chain(self.personal_changes.iter())
    }
}

#[cfg(test)]
#[path = "change_tests.rs"]
mod tests;
