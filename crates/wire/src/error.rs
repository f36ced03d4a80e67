// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from building or reading a patch
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("string too long for UTF frame: {len} encoded bytes (max 65535)")]
    StringTooLong { len: usize },

    #[error("malformed modified UTF-8 at byte {at}")]
    MalformedUtf { at: usize },

    #[error("unknown record prefix {prefix} at offset {offset}")]
    UnknownPrefix { prefix: u8, offset: u64 },

    #[error("content of {name} is {actual} bytes, declared {declared}")]
    ContentLengthMismatch { name: String, declared: u64, actual: u64 },

    #[error("end-of-patch record at offset {offset} carries a {len}-byte name")]
    MalformedTerminator { len: u16, offset: u64 },

    #[error("unexpected end of patch at offset {offset}")]
    UnexpectedEof { offset: u64 },

    #[error("record for {name} failed after it was partially written: {source}")]
    TornRecord {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
