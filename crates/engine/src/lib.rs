// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tcr-engine: patch preparation/application, change de-duplication and the
//! build-server notification watcher.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod change_storage;
pub mod env;
mod error;
pub mod patch_manager;
pub mod remote_run;
pub mod watcher;

pub use change_storage::ChangeStorage;
pub use error::EngineError;
pub use patch_manager::{DeleteHook, DeletePolicy, PatchManager, PreparedPatch, RenameMode};
pub use remote_run::{RemoteRun, RemoteRunResult};
pub use watcher::{NotificationWatcher, PollOutcome, WatcherConfig, WatcherState};
