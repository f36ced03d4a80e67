// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build-server boundary: event counter, summary and patch upload.
//!
//! Transport (XML-RPC, REST) lives behind this trait; callers only see
//! deserialized summaries and typed failures.

use std::path::Path;

use async_trait::async_trait;
use tcr_core::{ChangeListId, Summary};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Credentials were rejected; the caller has to re-authenticate
    #[error("authentication required")]
    Unauthorized,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("protocol error: {0}")]
    Protocol(String),
}

#[async_trait]
pub trait RemoteBuildServer: Send + Sync + 'static {
    /// Total events matching a serialized subscription
    async fn total_events(&self, subscription: &str) -> Result<i64, ServerError>;

    /// Current change/build summary for the authenticated user
    async fn summary(&self) -> Result<Summary, ServerError>;

    /// Upload a finished patch file; returns the server's change-list id
    async fn upload_changes(
        &self,
        patch: &Path,
        description: &str,
    ) -> Result<ChangeListId, ServerError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{RemoteBuildServer, ServerError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::path::Path;
    use std::sync::Arc;
    use tcr_core::{ChangeListId, Summary};

    /// Recorded upload: the patch bytes as they were at upload time
    #[derive(Debug, Clone)]
    pub struct UploadCall {
        pub patch: Vec<u8>,
        pub description: String,
    }

    #[derive(Default)]
    struct FakeServerState {
        counter: i64,
        counter_script: VecDeque<Result<i64, ServerError>>,
        summary: Summary,
        summary_failures: VecDeque<ServerError>,
        counter_calls: Vec<String>,
        summary_calls: usize,
        uploads: Vec<UploadCall>,
        unauthorized: bool,
    }

    /// Scriptable in-memory build server
    #[derive(Clone, Default)]
    pub struct FakeRemoteBuildServer {
        inner: Arc<Mutex<FakeServerState>>,
    }

    impl FakeRemoteBuildServer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Value returned by `total_events` once the script is exhausted
        pub fn set_counter(&self, value: i64) {
            self.inner.lock().counter = value;
        }

        /// Queue one-shot results for upcoming `total_events` calls
        pub fn push_counter_result(&self, result: Result<i64, ServerError>) {
            self.inner.lock().counter_script.push_back(result);
        }

        pub fn set_summary(&self, summary: Summary) {
            self.inner.lock().summary = summary;
        }

        pub fn fail_next_summary(&self, error: ServerError) {
            self.inner.lock().summary_failures.push_back(error);
        }

        /// Reject every call with `Unauthorized` until cleared
        pub fn set_unauthorized(&self, unauthorized: bool) {
            self.inner.lock().unauthorized = unauthorized;
        }

        pub fn counter_calls(&self) -> Vec<String> {
            self.inner.lock().counter_calls.clone()
        }

        pub fn summary_calls(&self) -> usize {
            self.inner.lock().summary_calls
        }

        pub fn uploads(&self) -> Vec<UploadCall> {
            self.inner.lock().uploads.clone()
        }
    }

    #[async_trait]
    impl RemoteBuildServer for FakeRemoteBuildServer {
        async fn total_events(&self, subscription: &str) -> Result<i64, ServerError> {
            let mut inner = self.inner.lock();
            inner.counter_calls.push(subscription.to_string());
            if inner.unauthorized {
                return Err(ServerError::Unauthorized);
            }
            match inner.counter_script.pop_front() {
                Some(result) => result,
                None => Ok(inner.counter),
            }
        }

        async fn summary(&self) -> Result<Summary, ServerError> {
            let mut inner = self.inner.lock();
            inner.summary_calls += 1;
            if inner.unauthorized {
                return Err(ServerError::Unauthorized);
            }
            if let Some(error) = inner.summary_failures.pop_front() {
                return Err(error);
            }
            Ok(inner.summary.clone())
        }

        async fn upload_changes(
            &self,
            patch: &Path,
            description: &str,
        ) -> Result<ChangeListId, ServerError> {
            let unauthorized = self.inner.lock().unauthorized;
            if unauthorized {
                return Err(ServerError::Unauthorized);
            }
            let bytes = tokio::fs::read(patch)
                .await
                .map_err(|e| ServerError::Transport(e.to_string()))?;
            let mut inner = self.inner.lock();
            inner.uploads.push(UploadCall { patch: bytes, description: description.to_string() });
            Ok(ChangeListId::new(format!("cl-{}", inner.uploads.len())))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRemoteBuildServer, UploadCall};

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
