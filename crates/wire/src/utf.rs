// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Modified UTF-8, as used for every name in a patch.
//!
//! Works on UTF-16 code units: 0x0001..=0x007F take one byte, 0x0800 and
//! above (surrogate halves included) take three, everything else (including
//! U+0000) takes two. The frame is a u16 big-endian count of encoded bytes.

use crate::error::PatchError;

/// Largest encoded length a frame can declare
pub const MAX_UTF_LEN: usize = u16::MAX as usize;

/// Number of bytes `s` occupies once encoded, excluding the length prefix
pub fn encoded_len(s: &str) -> usize {
    s.encode_utf16()
        .map(|unit| match unit {
            0x0001..=0x007F => 1,
            0x0800.. => 3,
            _ => 2,
        })
        .sum()
}

/// Encode `s` as a length-prefixed modified UTF-8 frame.
///
/// Fails with [`PatchError::StringTooLong`] rather than truncating.
pub fn encode(s: &str) -> Result<Vec<u8>, PatchError> {
    let len = encoded_len(s);
    if len > MAX_UTF_LEN {
        return Err(PatchError::StringTooLong { len });
    }

    let mut out = Vec::with_capacity(2 + len);
    out.extend_from_slice(&(len as u16).to_be_bytes());
    for unit in s.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0800.. => {
                out.push(0xE0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xC0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    Ok(out)
}

/// Decode the body of a frame (the bytes after the length prefix).
pub fn decode(bytes: &[u8]) -> Result<String, PatchError> {
    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b & 0x80 == 0 {
            units.push(u16::from(b));
            i += 1;
        } else if b & 0xE0 == 0xC0 {
            let b2 = continuation(bytes, i + 1)?;
            units.push((u16::from(b & 0x1F) << 6) | b2);
            i += 2;
        } else if b & 0xF0 == 0xE0 {
            let b2 = continuation(bytes, i + 1)?;
            let b3 = continuation(bytes, i + 2)?;
            units.push((u16::from(b & 0x0F) << 12) | (b2 << 6) | b3);
            i += 3;
        } else {
            return Err(PatchError::MalformedUtf { at: i });
        }
    }
    String::from_utf16(&units).map_err(|_| PatchError::MalformedUtf { at: bytes.len() })
}

fn continuation(bytes: &[u8], at: usize) -> Result<u16, PatchError> {
    match bytes.get(at) {
        Some(b) if b & 0xC0 == 0x80 => Ok(u16::from(b & 0x3F)),
        _ => Err(PatchError::MalformedUtf { at }),
    }
}

#[cfg(test)]
#[path = "utf_tests.rs"]
mod tests;
