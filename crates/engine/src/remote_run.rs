// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote run: collect local changes, pack them into a patch and hand the
//! patch to the build server as a personal change list.

use tcr_adapters::{CvsSupportProvider, RemoteBuildServer};
use tcr_core::ChangeListId;

use crate::error::EngineError;
use crate::patch_manager::{PatchManager, PreparedPatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRunResult {
    pub change_list: ChangeListId,
    pub records: usize,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RemoteRun {
    manager: PatchManager,
}

impl RemoteRun {
    pub fn new(manager: PatchManager) -> Self {
        Self { manager }
    }

    /// Build a patch from `provider`'s pending changes and upload it.
    ///
    /// An empty `description` falls back to the checkin message. The patch
    /// lives in a temporary file that is removed once the upload returns.
    pub async fn execute<P, S>(
        &self,
        provider: &P,
        server: &S,
        description: &str,
    ) -> Result<RemoteRunResult, EngineError>
    where
        P: CvsSupportProvider + ?Sized,
        S: RemoteBuildServer + ?Sized,
    {
        let checkin = provider.checkin_info().await?;
        if checkin.files.is_empty() {
            return Err(EngineError::NothingToRun);
        }
        let mapping = provider.root_mapping().await?;

        let patch_file = tempfile::Builder::new().prefix("tcr-").suffix(".patch").tempfile()?;
        let PreparedPatch { path, records, skipped, bytes } =
            self.manager.prepare_patch(&checkin, &mapping, provider, patch_file.path()).await?;

        let description =
            if description.is_empty() { checkin.message.as_str() } else { description };
        let change_list = server.upload_changes(&path, description).await?;
        tracing::info!(
            provider = provider.name(),
            change_list = %change_list,
            records,
            bytes,
            "remote run submitted"
        );
        Ok(RemoteRunResult { change_list, records, skipped })
    }
}

#[cfg(test)]
#[path = "remote_run_tests.rs"]
mod tests;
