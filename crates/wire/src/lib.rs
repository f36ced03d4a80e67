// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binary patch format.
//!
//! A patch is a flat sequence of records, each a one-byte prefix followed by
//! a payload whose field lengths are fixed or explicitly prefixed:
//!
//! ```text
//! Created|Modified := nameLen:u16be name contentLen:u64be content
//! Deleted          := nameLen:u16be name
//! Renamed          := prevLen:u16be prev newLen:u16be new
//! EndOfPatch       := 0x0000
//! ```
//!
//! Names are modified UTF-8 (see [`utf`]).

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod builder;
mod error;
mod frame;
mod reader;
mod record;
pub mod utf;

pub use builder::{ContentSource, PatchBuilder, PatchOutput, WritePolicy};
pub use error::PatchError;
pub use frame::{put_u64, put_u8, put_utf};
pub use reader::PatchReader;
pub use record::{PatchEntry, RecordKind};
