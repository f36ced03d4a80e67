// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// One-byte record prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordKind {
    Deleted = 3,
    EndOfPatch = 10,
    Renamed = 19,
    Modified = 25,
    Created = 26,
}

impl RecordKind {
    pub fn prefix(self) -> u8 {
        self as u8
    }

    pub fn from_prefix(prefix: u8) -> Option<Self> {
        match prefix {
            3 => Some(Self::Deleted),
            10 => Some(Self::EndOfPatch),
            19 => Some(Self::Renamed),
            25 => Some(Self::Modified),
            26 => Some(Self::Created),
            _ => None,
        }
    }
}

/// A decoded record header.
///
/// Content of `Created`/`Modified` records is not held here; it stays in the
/// patch until the reader copies or skips it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchEntry {
    Created { name: String, len: u64 },
    Modified { name: String, len: u64 },
    Deleted { name: String },
    Renamed { prev: String, new: String },
}

impl PatchEntry {
    pub fn kind(&self) -> RecordKind {
        match self {
            PatchEntry::Created { .. } => RecordKind::Created,
            PatchEntry::Modified { .. } => RecordKind::Modified,
            PatchEntry::Deleted { .. } => RecordKind::Deleted,
            PatchEntry::Renamed { .. } => RecordKind::Renamed,
        }
    }

    /// Declared content length, for records that carry content
    pub fn content_len(&self) -> Option<u64> {
        match self {
            PatchEntry::Created { len, .. } | PatchEntry::Modified { len, .. } => Some(*len),
            _ => None,
        }
    }
}
