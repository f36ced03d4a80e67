// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns a checkin into a patch file and applies patch files to a local root.
//!
//! Preparation walks the checkin's files in order and maps each local path
//! onto the remote root token. Application reads records sequentially and
//! translates each name back under the local root; a corrupt record aborts
//! the remaining records but leaves earlier effects in place.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use tcr_adapters::CvsSupportProvider;
use tcr_core::{AppliedResource, ChangedFile, CheckinInfo, CvsFileStatus, RootMapping};
use tcr_wire::{ContentSource, PatchBuilder, PatchEntry, PatchReader, WritePolicy};
use tokio::fs::File;
use tokio::io::BufWriter;

use crate::error::EngineError;

/// How a renamed file is written into a patch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenameMode {
    /// Delete of the old name followed by a create of the new one
    #[default]
    DeleteCreate,
    /// Rename record followed by the new file's content
    Record,
}

impl FromStr for RenameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "delete-create" | "delete_create" => Ok(RenameMode::DeleteCreate),
            "record" => Ok(RenameMode::Record),
            other => Err(format!("unknown rename mode: {other}")),
        }
    }
}

tcr_core::simple_display! {
    RenameMode {
        DeleteCreate => "delete-create",
        Record => "record",
    }
}

/// Asks whether a file named by a delete or rename record may be touched
pub trait DeleteHook: Send + Sync {
    fn confirm(&self, path: &Path) -> bool;
}

/// Whether delete and rename records change the local disk on apply
#[derive(Clone, Default)]
pub enum DeletePolicy {
    /// Report the resource, leave the file alone
    #[default]
    RecordOnly,
    Delete,
    /// Ask the hook per file
    Confirm(Arc<dyn DeleteHook>),
}

impl fmt::Debug for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletePolicy::RecordOnly => f.write_str("RecordOnly"),
            DeletePolicy::Delete => f.write_str("Delete"),
            DeletePolicy::Confirm(_) => f.write_str("Confirm(..)"),
        }
    }
}

impl DeletePolicy {
    pub fn allows(&self, path: &Path) -> bool {
        match self {
            DeletePolicy::RecordOnly => false,
            DeletePolicy::Delete => true,
            DeletePolicy::Confirm(hook) => hook.confirm(path),
        }
    }
}

/// A finished patch file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPatch {
    pub path: PathBuf,
    /// Records written, terminator excluded
    pub records: usize,
    /// Names left out under [`WritePolicy::Lenient`]
    pub skipped: Vec<String>,
    pub bytes: u64,
}

#[derive(Debug, Clone, Default)]
pub struct PatchManager {
    write_policy: WritePolicy,
    rename_mode: RenameMode,
    delete_policy: DeletePolicy,
}

impl PatchManager {
    pub fn new(write_policy: WritePolicy, rename_mode: RenameMode) -> Self {
        Self { write_policy, rename_mode, delete_policy: DeletePolicy::default() }
    }

    /// Policies from `TCR_WRITE_POLICY` / `TCR_RENAME_MODE`, defaults otherwise
    pub fn from_env() -> Self {
        Self::new(
            crate::env::write_policy().unwrap_or_default(),
            crate::env::rename_mode().unwrap_or_default(),
        )
    }

    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    pub fn rename_mode(&self) -> RenameMode {
        self.rename_mode
    }

    /// Write the patch for `checkin` to `out`.
    ///
    /// Files that vanished since the checkin was collected are omitted
    /// rather than failing the patch.
    pub async fn prepare_patch<P>(
        &self,
        checkin: &CheckinInfo,
        mapping: &RootMapping,
        provider: &P,
        out: &Path,
    ) -> Result<PreparedPatch, EngineError>
    where
        P: CvsSupportProvider + ?Sized,
    {
        let mut builder = PatchBuilder::create(out, self.write_policy).await?;
        let mut skipped = Vec::new();

        for file in &checkin.files {
            let name = remote_name(mapping, &file.path)?;
            let exists = is_file(&file.path).await;
            let content = match file.status {
                CvsFileStatus::Added => Some(Kind::Created),
                CvsFileStatus::Modified => Some(Kind::Replaced),
                CvsFileStatus::Undefined if exists => Some(Kind::Replaced),
                CvsFileStatus::Deleted | CvsFileStatus::Undefined => {
                    builder.add_deleted_file(&name).await?;
                    None
                }
                CvsFileStatus::Renamed => {
                    Some(self.add_rename(&mut builder, mapping, file, &name).await?)
                }
            };
            match content {
                Some(kind) if exists => {
                    self.add_content(&mut builder, kind, &name, provider, file, &mut skipped)
                        .await?;
                }
                Some(_) => {
                    tracing::debug!(
                        path = %file.path.display(),
                        status = %file.status,
                        "file gone, no content"
                    );
                }
                None => {}
            }
        }

        let output = builder.finish().await?;
        skipped.extend(output.skipped);
        tracing::info!(
            path = %out.display(),
            provider = provider.name(),
            records = output.records,
            skipped = skipped.len(),
            "patch prepared"
        );
        Ok(PreparedPatch {
            path: out.to_path_buf(),
            records: output.records,
            skipped,
            bytes: output.bytes_written,
        })
    }

    /// Apply the patch at `patch` under `mapping.local_root`.
    ///
    /// Created and modified records overwrite the destination and surface as
    /// added resources. Delete and rename records are always reported; they
    /// only change the disk when the delete policy allows it.
    pub async fn apply_patch(
        &self,
        patch: &Path,
        mapping: &RootMapping,
    ) -> Result<Vec<AppliedResource>, EngineError> {
        let mut reader = PatchReader::open(patch).await?;
        let mut applied = Vec::new();

        loop {
            match self.apply_next(&mut reader, mapping).await {
                Ok(Some(resource)) => applied.push(resource),
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(
                        patch = %patch.display(),
                        offset = reader.offset(),
                        applied = applied.len(),
                        error = %e,
                        "patch apply aborted"
                    );
                    return Err(EngineError::ApplyAborted { applied, source: Box::new(e) });
                }
            }
        }

        tracing::info!(patch = %patch.display(), resources = applied.len(), "patch applied");
        Ok(applied)
    }

    /// Decode every record header without touching the disk
    pub async fn list_patch(patch: &Path) -> Result<Vec<PatchEntry>, EngineError> {
        let mut reader = PatchReader::open(patch).await?;
        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            entries.push(entry);
        }
        Ok(entries)
    }

    async fn apply_next(
        &self,
        reader: &mut PatchReader<File>,
        mapping: &RootMapping,
    ) -> Result<Option<AppliedResource>, EngineError> {
        let Some(entry) = reader.next_entry().await? else {
            return Ok(None);
        };
        let resource = match entry {
            PatchEntry::Created { name, .. } | PatchEntry::Modified { name, .. } => {
                let dest = local_name(mapping, &name)?;
                create_parent(&dest).await?;
                let mut file = File::create(&dest).await?;
                let len = reader.copy_content(&mut file).await?;
                tracing::debug!(path = %dest.display(), len, "applied content");
                AppliedResource::added(dest)
            }
            PatchEntry::Deleted { name } => {
                let dest = local_name(mapping, &name)?;
                if self.delete_policy.allows(&dest) {
                    match tokio::fs::remove_file(&dest).await {
                        Ok(()) => tracing::debug!(path = %dest.display(), "deleted"),
                        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                        Err(e) => return Err(e.into()),
                    }
                } else {
                    tracing::debug!(path = %dest.display(), "delete recorded, not applied");
                }
                AppliedResource::deleted(dest)
            }
            PatchEntry::Renamed { prev, new } => {
                let prev_dest = local_name(mapping, &prev)?;
                let new_dest = local_name(mapping, &new)?;
                if self.delete_policy.allows(&prev_dest) && is_file(&prev_dest).await {
                    create_parent(&new_dest).await?;
                    tokio::fs::rename(&prev_dest, &new_dest).await?;
                    tracing::debug!(
                        from = %prev_dest.display(),
                        to = %new_dest.display(),
                        "renamed"
                    );
                }
                AppliedResource::renamed(new_dest, prev_dest)
            }
        };
        Ok(Some(resource))
    }

    /// Header records for a rename; returns the shape of the content
    /// record that follows
    async fn add_rename(
        &self,
        builder: &mut PatchBuilder<BufWriter<File>>,
        mapping: &RootMapping,
        file: &ChangedFile,
        name: &str,
    ) -> Result<Kind, EngineError> {
        let Some(prev_path) = &file.prev_path else {
            tracing::warn!(path = %file.path.display(), "rename without previous path");
            return Ok(Kind::Created);
        };
        let prev_name = remote_name(mapping, prev_path)?;
        match self.rename_mode {
            RenameMode::DeleteCreate => {
                builder.add_deleted_file(&prev_name).await?;
                Ok(Kind::Created)
            }
            RenameMode::Record => {
                builder.add_renamed_file(name, &prev_name).await?;
                Ok(Kind::Replaced)
            }
        }
    }

    /// Content from the provider override if any, else the live file. A
    /// provider failure skips the file under the lenient policy.
    async fn add_content<P>(
        &self,
        builder: &mut PatchBuilder<BufWriter<File>>,
        kind: Kind,
        name: &str,
        provider: &P,
        file: &ChangedFile,
        skipped: &mut Vec<String>,
    ) -> Result<(), EngineError>
    where
        P: CvsSupportProvider + ?Sized,
    {
        let source = match provider.content(file).await {
            Ok(Some(source)) => source,
            Ok(None) => ContentSource::File(file.path.clone()),
            Err(e) if self.write_policy == WritePolicy::Lenient => {
                tracing::warn!(path = %file.path.display(), error = %e, "skipping file");
                skipped.push(name.to_string());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        match kind {
            Kind::Created => builder.add_created_file(name, source).await?,
            Kind::Replaced => builder.add_replaced_file(name, source).await?,
        }
        Ok(())
    }
}

/// Record shape for file content
#[derive(Debug, Clone, Copy)]
enum Kind {
    Created,
    Replaced,
}

fn remote_name(mapping: &RootMapping, path: &Path) -> Result<String, EngineError> {
    if path.to_str().is_none() {
        return Err(EngineError::NonUtf8Path(path.to_path_buf()));
    }
    mapping.remote_file_name(path).ok_or_else(|| EngineError::OutsideRoot(path.to_path_buf()))
}

fn local_name(mapping: &RootMapping, name: &str) -> Result<PathBuf, EngineError> {
    mapping.local_path(name).ok_or_else(|| EngineError::UnmappedName(name.to_string()))
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
}

async fn create_parent(path: &Path) -> Result<(), EngineError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "patch_manager_tests.rs"]
mod tests;
