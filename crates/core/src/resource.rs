// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::checkin::CvsFileStatus;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file effect produced by applying a patch.
///
/// Created and modified records both surface as [`CvsFileStatus::Added`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedResource {
    pub status: CvsFileStatus,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_path: Option<PathBuf>,
}

impl AppliedResource {
    pub fn added(path: impl Into<PathBuf>) -> Self {
        Self { status: CvsFileStatus::Added, path: path.into(), prev_path: None }
    }

    pub fn deleted(path: impl Into<PathBuf>) -> Self {
        Self { status: CvsFileStatus::Deleted, path: path.into(), prev_path: None }
    }

    pub fn renamed(path: impl Into<PathBuf>, prev_path: impl Into<PathBuf>) -> Self {
        Self {
            status: CvsFileStatus::Renamed,
            path: path.into(),
            prev_path: Some(prev_path.into()),
        }
    }
}
