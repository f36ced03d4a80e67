// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Byte primitives for assembling record headers in memory.

use crate::error::PatchError;
use crate::utf;

pub fn put_u8(buf: &mut Vec<u8>, value: u8) {
    buf.push(value);
}

/// Append an 8-byte big-endian length
pub fn put_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Append a length-prefixed modified UTF-8 string
pub fn put_utf(buf: &mut Vec<u8>, s: &str) -> Result<(), PatchError> {
    buf.extend_from_slice(&utf::encode(s)?);
    Ok(())
}
