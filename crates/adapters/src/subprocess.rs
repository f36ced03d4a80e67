// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution with a hard timeout.

use std::process::Output;
use std::time::Duration;

use tokio::process::Command;

/// Timeout for git plumbing commands (status, diff, show, config)
pub const GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Run `cmd` to completion, killing it if it exceeds `timeout`.
///
/// `description` names the command in errors and logs.
pub async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    cmd.kill_on_drop(true);
    tracing::debug!(command = description, "spawning subprocess");
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(format!("{description} failed to run: {e}")),
        Err(_) => {
            tracing::warn!(command = description, ?timeout, "subprocess timed out");
            Err(format!("{description} timed out after {}s", timeout.as_secs()))
        }
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
