// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::time::Duration;

use tcr_wire::WritePolicy;

use crate::patch_manager::RenameMode;

fn duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

/// Delay before the watcher's first poll (`TCR_POLL_INITIAL_DELAY_MS`, default 5s)
pub fn poll_initial_delay() -> Duration {
    duration_ms("TCR_POLL_INITIAL_DELAY_MS").unwrap_or(Duration::from_secs(5))
}

/// Pause between watcher polls (`TCR_POLL_INTERVAL_MS`, default 60s)
pub fn poll_interval() -> Duration {
    duration_ms("TCR_POLL_INTERVAL_MS").unwrap_or(Duration::from_secs(60))
}

/// `TCR_WRITE_POLICY=strict` aborts a patch on the first unreadable file
pub fn write_policy() -> Option<WritePolicy> {
    let value = std::env::var("TCR_WRITE_POLICY").ok()?;
    let policy = value.parse().ok();
    if policy.is_none() {
        tracing::warn!(value = %value, "ignoring unknown TCR_WRITE_POLICY");
    }
    policy
}

/// `TCR_RENAME_MODE=record|delete-create`
pub fn rename_mode() -> Option<RenameMode> {
    let value = std::env::var("TCR_RENAME_MODE").ok()?;
    let mode = value.parse().ok();
    if mode.is_none() {
        tracing::warn!(value = %value, "ignoring unknown TCR_RENAME_MODE");
    }
    mode
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
