// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use tcr_adapters::{CvsError, ServerError};
use tcr_core::AppliedResource;
use tcr_wire::PatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error(transparent)]
    Cvs(#[from] CvsError),

    /// Credentials rejected; not retried here
    #[error("authentication required")]
    AuthenticationRequired,

    #[error(transparent)]
    Server(ServerError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} is not under the workspace root")]
    OutsideRoot(PathBuf),

    #[error("path is not valid UTF-8: {0:?}")]
    NonUtf8Path(PathBuf),

    #[error("patch entry {0:?} does not map into the local root")]
    UnmappedName(String),

    #[error("no changed files to send")]
    NothingToRun,

    /// Resources in `applied` were written before the failure and stay on disk
    #[error("patch apply aborted after {count} resources: {source}", count = .applied.len())]
    ApplyAborted { applied: Vec<AppliedResource>, source: Box<EngineError> },
}

impl From<ServerError> for EngineError {
    fn from(e: ServerError) -> Self {
        match e {
            ServerError::Unauthorized => EngineError::AuthenticationRequired,
            other => EngineError::Server(other),
        }
    }
}

impl EngineError {
    pub fn is_auth(&self) -> bool {
        matches!(self, EngineError::AuthenticationRequired)
    }
}
