// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Git provider: shells out to `git` for the change list and staged blobs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tcr_core::{ChangedFile, CheckinInfo, CvsFileStatus};
use tcr_wire::ContentSource;
use tokio::process::Command;

use super::{CvsError, CvsSupportProvider};
use crate::subprocess::{run_with_timeout, GIT_TIMEOUT};

/// Which side of the index the change list is taken from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GitMode {
    /// Working tree against HEAD, untracked files included
    #[default]
    WorkingTree,
    /// Index against HEAD; content comes from the staged blobs
    Staged,
}

#[derive(Debug, Clone)]
pub struct GitProvider {
    root: PathBuf,
    mode: GitMode,
    remote_root: Option<String>,
    message: String,
}

impl GitProvider {
    /// Provider for the repository whose top level is `root`
    pub fn new(root: impl Into<PathBuf>, mode: GitMode) -> Self {
        Self { root: root.into(), mode, remote_root: None, message: String::new() }
    }

    /// Locate the repository containing `dir`
    pub async fn discover(dir: &Path, mode: GitMode) -> Result<Self, CvsError> {
        let stdout = git(dir, &["rev-parse", "--show-toplevel"], "git rev-parse").await?;
        let root = String::from_utf8_lossy(&stdout).trim().to_string();
        Ok(Self::new(root, mode))
    }

    /// Use `token` instead of deriving the remote root from `remote.origin.url`
    pub fn with_remote_root(mut self, token: impl Into<String>) -> Self {
        self.remote_root = Some(token.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    fn relative<'a>(&self, path: &'a Path) -> Result<&'a Path, CvsError> {
        path.strip_prefix(&self.root).map_err(|_| CvsError::OutsideRoot(path.to_path_buf()))
    }
}

#[async_trait]
impl CvsSupportProvider for GitProvider {
    fn name(&self) -> &'static str {
        "git"
    }

    fn local_root(&self) -> &Path {
        &self.root
    }

    async fn remote_root(&self) -> Result<String, CvsError> {
        if let Some(token) = &self.remote_root {
            return Ok(token.clone());
        }
        let stdout = git(&self.root, &["config", "--get", "remote.origin.url"], "git config")
            .await
            .map_err(|_| CvsError::NoRemote(self.root.clone()))?;
        let url = String::from_utf8_lossy(&stdout).trim().to_string();
        if url.is_empty() {
            return Err(CvsError::NoRemote(self.root.clone()));
        }
        Ok(format!("jetbrains.git://|{url}|"))
    }

    async fn checkin_info(&self) -> Result<CheckinInfo, CvsError> {
        let mut args = vec!["diff", "--name-status", "-M", "-z"];
        if self.mode == GitMode::Staged {
            args.push("--cached");
        }
        args.push("HEAD");
        let stdout = git(&self.root, &args, "git diff").await?;
        let mut files = parse_name_status(&self.root, &utf8(stdout, "git diff")?);

        if self.mode == GitMode::WorkingTree {
            let untracked = git(
                &self.root,
                &["ls-files", "--others", "--exclude-standard", "-z"],
                "git ls-files",
            )
            .await?;
            files.extend(
                utf8(untracked, "git ls-files")?
                    .split('\0')
                    .filter(|p| !p.is_empty())
                    .map(|p| ChangedFile::new(CvsFileStatus::Added, self.root.join(p))),
            );
        }

        tracing::info!(
            provider = "git",
            mode = ?self.mode,
            files = files.len(),
            "collected changes"
        );
        Ok(CheckinInfo { message: self.message.clone(), files, ..Default::default() })
    }

    async fn content(&self, file: &ChangedFile) -> Result<Option<ContentSource>, CvsError> {
        if self.mode != GitMode::Staged || file.status == CvsFileStatus::Deleted {
            return Ok(None);
        }
        let relative = self
            .relative(&file.path)?
            .to_str()
            .ok_or_else(|| CvsError::NonUtf8Path(file.path.clone()))?
            .replace('\\', "/");
        let spec = format!(":{relative}");
        let blob = git(&self.root, &["show", &spec], "git show").await?;
        Ok(Some(ContentSource::Bytes(blob)))
    }
}

/// Parse `git diff --name-status -z` output into changed-file descriptors.
///
/// Rename and copy entries carry two paths (source, destination); copies
/// become additions of the destination.
pub fn parse_name_status(root: &Path, output: &str) -> Vec<ChangedFile> {
    let mut fields = output.split('\0').filter(|f| !f.is_empty());
    let mut files = Vec::new();
    while let Some(code) = fields.next() {
        let Some(first) = fields.next() else { break };
        let file = match code.chars().next() {
            Some('A') => ChangedFile::new(CvsFileStatus::Added, root.join(first)),
            Some('M') | Some('T') => ChangedFile::new(CvsFileStatus::Modified, root.join(first)),
            Some('D') => ChangedFile::new(CvsFileStatus::Deleted, root.join(first)),
            Some('R') => {
                let Some(second) = fields.next() else { break };
                ChangedFile::renamed(root.join(second), root.join(first))
            }
            Some('C') => {
                let Some(second) = fields.next() else { break };
                ChangedFile::new(CvsFileStatus::Added, root.join(second))
            }
            _ => ChangedFile::new(CvsFileStatus::Undefined, root.join(first)),
        };
        files.push(file);
    }
    files
}

/// File names go into patches verbatim, so output that is not UTF-8 is an
/// error rather than a lossy conversion.
fn utf8(stdout: Vec<u8>, description: &str) -> Result<String, CvsError> {
    String::from_utf8(stdout)
        .map_err(|_| CvsError::NonUtf8Output { command: description.to_string() })
}

async fn git(dir: &Path, args: &[&str], description: &str) -> Result<Vec<u8>, CvsError> {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(dir).args(args).env_remove("GIT_DIR").env_remove("GIT_WORK_TREE");
    let output = run_with_timeout(cmd, GIT_TIMEOUT, description).await.map_err(CvsError::Spawn)?;
    if !output.status.success() {
        return Err(CvsError::CommandFailed {
            command: description.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output.stdout)
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
