// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checkin descriptors produced by CVS providers and consumed by the patch
//! builder, plus the local-root/remote-root path mapping.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Status of a changed file as reported by a CVS provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvsFileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Undefined,
}

crate::simple_display! {
    CvsFileStatus {
        Added => "added",
        Modified => "modified",
        Deleted => "deleted",
        Renamed => "renamed",
        Undefined => "undefined",
    }
}

/// One changed file in the local workspace.
///
/// Produced fresh for each remote run and consumed once by the patch builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub status: CvsFileStatus,
    /// Absolute local path
    pub path: PathBuf,
    /// Absolute previous path, only for [`CvsFileStatus::Renamed`]
    pub prev_path: Option<PathBuf>,
}

impl ChangedFile {
    pub fn new(status: CvsFileStatus, path: impl Into<PathBuf>) -> Self {
        Self { status, path: path.into(), prev_path: None }
    }

    pub fn renamed(path: impl Into<PathBuf>, prev_path: impl Into<PathBuf>) -> Self {
        Self {
            status: CvsFileStatus::Renamed,
            path: path.into(),
            prev_path: Some(prev_path.into()),
        }
    }
}

/// A pending commit: message, changed files and the server-side context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinInfo {
    pub message: String,
    pub files: Vec<ChangedFile>,
    /// Server item paths (TFS-style providers), empty for git
    #[serde(default)]
    pub server_items: Vec<String>,
    #[serde(default)]
    pub work_item_ids: Vec<u32>,
}

/// Maps a local workspace root onto the remote project-root token.
///
/// Patch file names are `remote_root + "/" + relative`, with forward slashes
/// regardless of host OS. The server matches files by this exact string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootMapping {
    pub local_root: PathBuf,
    pub remote_root: String,
}

impl RootMapping {
    pub fn new(local_root: impl Into<PathBuf>, remote_root: impl Into<String>) -> Self {
        Self { local_root: local_root.into(), remote_root: remote_root.into() }
    }

    /// Translate an absolute local path into a patch file name.
    ///
    /// Returns `None` when `local` is not under the local root or is not
    /// valid UTF-8; a lossy name could collide with another file's.
    pub fn remote_file_name(&self, local: &Path) -> Option<String> {
        let relative = local.strip_prefix(&self.local_root).ok()?;
        let relative = relative.to_str()?.replace('\\', "/");
        Some(format!("{}/{}", self.remote_root, relative))
    }

    /// Translate a patch file name back into a path under the local root.
    ///
    /// Returns `None` when the name does not start with the remote root or
    /// would escape the local root.
    pub fn local_path(&self, remote: &str) -> Option<PathBuf> {
        let relative = remote.strip_prefix(self.remote_root.as_str())?;
        let relative = match relative.strip_prefix('/') {
            Some(rest) => rest,
            None if relative.is_empty() => relative,
            None => return None,
        };
        let mut path = self.local_root.clone();
        for part in relative.split('/').filter(|p| !p.is_empty()) {
            let mut components = Path::new(part).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(c)), None) => path.push(c),
                _ => return None,
            }
        }
        Some(path)
    }
}

#[cfg(test)]
#[path = "checkin_tests.rs"]
mod tests;
