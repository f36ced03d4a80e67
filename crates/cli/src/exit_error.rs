// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`,
//! so `main()` is the only place the process terminates.

use std::fmt;
use std::path::Path;

/// Patch could not be applied in full
pub const ABORTED: i32 = 1;
/// Bad invocation: missing or conflicting settings
pub const USAGE: i32 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(USAGE, message)
    }

    /// Apply stopped at a corrupt record after `applied` resources
    pub fn aborted(patch: &Path, applied: usize, cause: impl fmt::Display) -> Self {
        Self::new(
            ABORTED,
            format!("{}: aborted after {applied} resource(s): {cause}", patch.display()),
        )
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
