// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tcr-core: domain types shared by the patch codec, the CVS adapters and
//! the build-server watcher.

pub mod macros;

pub mod change;
pub mod checkin;
pub mod clock;
pub mod id;
pub mod payload;
pub mod resource;
pub mod subscription;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(any(test, feature = "test-support"))]
pub use change::ChangeBuilder;
pub use change::{Build, BuildStatus, Change, ChangeStatus, Summary};
pub use checkin::{CheckinInfo, ChangedFile, CvsFileStatus, RootMapping};
pub use clock::{Clock, FakeClock, SystemClock};
pub use id::{BuildId, ChangeListId};
pub use payload::{BuildPayload, ChangePayload, SummaryPayload};
pub use resource::AppliedResource;
pub use subscription::{EventScope, EventType, Subscription, SubscriptionEvent};
