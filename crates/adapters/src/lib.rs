// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapters for the collaborators around the patch codec: source-control
//! providers, the remote build server and desktop notifications.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod cvs;
pub mod notify;
pub mod server;
pub mod subprocess;

pub use cvs::{CvsError, CvsSupportProvider, GitMode, GitProvider};
pub use notify::{DesktopNotifyAdapter, Notification, NotifyAdapter, NotifyError};
pub use server::{RemoteBuildServer, ServerError};

#[cfg(any(test, feature = "test-support"))]
pub use cvs::FakeCvsProvider;
#[cfg(any(test, feature = "test-support"))]
pub use notify::FakeNotifyAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use server::{FakeRemoteBuildServer, UploadCall};
