// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Source-control providers.
//!
//! A provider reports which files changed and, optionally, the exact
//! content to send for them (e.g. the staged blob rather than the working
//! copy). How it finds out is its own business; the patch builder only sees
//! the resulting [`CheckinInfo`].

mod git;

pub use git::{parse_name_status, GitMode, GitProvider};

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tcr_core::{ChangedFile, CheckinInfo, RootMapping};
use tcr_wire::ContentSource;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CvsError {
    #[error("{command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("{0}")]
    Spawn(String),

    #[error("no remote configured for {0}")]
    NoRemote(PathBuf),

    #[error("{0} is not under the workspace root")]
    OutsideRoot(PathBuf),

    #[error("path is not valid UTF-8: {0:?}")]
    NonUtf8Path(PathBuf),

    #[error("{command} printed a file name that is not valid UTF-8")]
    NonUtf8Output { command: String },
}

#[async_trait]
pub trait CvsSupportProvider: Send + Sync {
    /// Short provider name for logs ("git", "tfs")
    fn name(&self) -> &'static str;

    /// Absolute local workspace root
    fn local_root(&self) -> &Path;

    /// Remote project-root token substituted for the local root in patches
    async fn remote_root(&self) -> Result<String, CvsError>;

    /// Changed files with their statuses
    async fn checkin_info(&self) -> Result<CheckinInfo, CvsError>;

    /// Content override for `file`; `None` means read the live file
    async fn content(&self, file: &ChangedFile) -> Result<Option<ContentSource>, CvsError>;

    async fn root_mapping(&self) -> Result<RootMapping, CvsError> {
        Ok(RootMapping::new(self.local_root(), self.remote_root().await?))
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{CvsError, CvsSupportProvider};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::{HashMap, HashSet};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use tcr_core::{ChangedFile, CheckinInfo};
    use tcr_wire::ContentSource;

    #[derive(Default)]
    struct FakeCvsState {
        checkin: CheckinInfo,
        overrides: HashMap<PathBuf, Vec<u8>>,
        unreadable: HashSet<PathBuf>,
    }

    /// Provider with a scripted checkin and optional content overrides
    #[derive(Clone)]
    pub struct FakeCvsProvider {
        root: PathBuf,
        remote_root: String,
        inner: Arc<Mutex<FakeCvsState>>,
    }

    impl FakeCvsProvider {
        pub fn new(root: impl Into<PathBuf>, remote_root: impl Into<String>) -> Self {
            Self {
                root: root.into(),
                remote_root: remote_root.into(),
                inner: Arc::new(Mutex::new(FakeCvsState::default())),
            }
        }

        pub fn set_checkin(&self, checkin: CheckinInfo) {
            self.inner.lock().checkin = checkin;
        }

        /// Serve `content` instead of the file on disk at `path`
        pub fn set_override(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
            self.inner.lock().overrides.insert(path.into(), content.into());
        }

        /// Fail every content request for `path`
        pub fn set_unreadable(&self, path: impl Into<PathBuf>) {
            self.inner.lock().unreadable.insert(path.into());
        }
    }

    #[async_trait]
    impl CvsSupportProvider for FakeCvsProvider {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn local_root(&self) -> &Path {
            &self.root
        }

        async fn remote_root(&self) -> Result<String, CvsError> {
            Ok(self.remote_root.clone())
        }

        async fn checkin_info(&self) -> Result<CheckinInfo, CvsError> {
            Ok(self.inner.lock().checkin.clone())
        }

        async fn content(&self, file: &ChangedFile) -> Result<Option<ContentSource>, CvsError> {
            let inner = self.inner.lock();
            if inner.unreadable.contains(&file.path) {
                return Err(CvsError::CommandFailed {
                    command: "fake content".to_string(),
                    stderr: format!("cannot read {}", file.path.display()),
                });
            }
            Ok(inner.overrides.get(&file.path).cloned().map(ContentSource::Bytes))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeCvsProvider;
