// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tcr patch`: create, apply and inspect patch files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use tcr_adapters::{CvsSupportProvider, GitMode, GitProvider};
use tcr_core::RootMapping;
use tcr_engine::{DeletePolicy, EngineError, PatchManager, RenameMode};
use tcr_wire::WritePolicy;

use crate::config::Settings;
use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct PatchArgs {
    #[command(subcommand)]
    pub command: PatchCommand,
}

#[derive(Subcommand)]
pub enum PatchCommand {
    /// Write a patch of the uncommitted changes in a git repository
    Create {
        /// Any directory inside the repository
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Remote project-root token (default: derived from remote.origin.url)
        #[arg(long)]
        remote_root: Option<String>,
        /// Take changes and content from the index instead of the working tree
        #[arg(long)]
        staged: bool,
        #[arg(long, value_parser = parse_rename_mode)]
        rename_mode: Option<RenameMode>,
        /// Fail on the first unreadable file instead of skipping it
        #[arg(long)]
        strict: bool,
        /// Patch file to write
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Apply a patch file under a local root
    Apply {
        patch: PathBuf,
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Remote project-root token the patch names start with
        #[arg(long)]
        remote_root: Option<String>,
        /// Actually delete and move files for delete/rename records
        #[arg(long)]
        delete: bool,
    },
    /// Print the records of a patch file
    List { patch: PathBuf },
}

fn parse_rename_mode(s: &str) -> Result<RenameMode, String> {
    s.parse()
}

pub async fn handle(
    command: PatchCommand,
    settings: &Settings,
    format: OutputFormat,
) -> Result<()> {
    match command {
        PatchCommand::Create { root, remote_root, staged, rename_mode, strict, output } => {
            let write_policy = if strict {
                WritePolicy::Strict
            } else {
                settings
                    .write_policy()?
                    .or_else(tcr_engine::env::write_policy)
                    .unwrap_or_default()
            };
            let rename_mode = match rename_mode {
                Some(mode) => mode,
                None => settings
                    .rename_mode()?
                    .or_else(tcr_engine::env::rename_mode)
                    .unwrap_or_default(),
            };
            let mode = if staged { GitMode::Staged } else { GitMode::WorkingTree };

            let mut provider = GitProvider::discover(&root, mode).await?;
            if let Some(token) = remote_root.or_else(|| settings.remote_root.clone()) {
                provider = provider.with_remote_root(token);
            }
            let checkin = provider.checkin_info().await?;
            if checkin.files.is_empty() {
                tracing::info!(root = %root.display(), "no local changes");
            }
            let mapping = provider.root_mapping().await?;

            let manager = PatchManager::new(write_policy, rename_mode);
            let prepared = manager.prepare_patch(&checkin, &mapping, &provider, &output).await?;
            output::print_prepared(&prepared, format)
        }
        PatchCommand::Apply { patch, root, remote_root, delete } => {
            let Some(remote_root) = remote_root.or_else(|| settings.remote_root.clone()) else {
                return Err(ExitError::usage(
                    "no remote root: pass --remote-root or set remote_root in config.toml",
                )
                .into());
            };
            let deletes_applied = delete || settings.apply_deletes;
            let policy =
                if deletes_applied { DeletePolicy::Delete } else { DeletePolicy::RecordOnly };
            let manager = PatchManager::default().with_delete_policy(policy);
            let mapping = RootMapping::new(root, remote_root);

            match manager.apply_patch(&patch, &mapping).await {
                Ok(applied) => output::print_applied(&applied, deletes_applied, format),
                Err(EngineError::ApplyAborted { applied, source }) => {
                    if !applied.is_empty() {
                        output::print_applied(&applied, deletes_applied, format)?;
                    }
                    Err(ExitError::aborted(&patch, applied.len(), source).into())
                }
                Err(e) => Err(e.into()),
            }
        }
        PatchCommand::List { patch } => {
            let entries = PatchManager::list_patch(&patch).await?;
            output::print_entries(&entries, format)
        }
    }
}
