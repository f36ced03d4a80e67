// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Patch reader.
//!
//! The reader owns an explicit byte offset and seeks to it before every
//! read, so its position never depends on what a caller did with the
//! underlying handle in between. Decoding is strictly sequential: a
//! record's layout is only known once the previous record is consumed.

use std::io::SeekFrom;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, AsyncWrite, AsyncWriteExt};

use crate::error::PatchError;
use crate::record::{PatchEntry, RecordKind};
use crate::utf;

pub struct PatchReader<R> {
    inner: R,
    offset: u64,
    /// Content length of the last Created/Modified record not yet consumed
    pending_content: Option<u64>,
    finished: bool,
}

impl PatchReader<File> {
    pub async fn open(path: &Path) -> Result<Self, PatchError> {
        let file = File::open(path).await?;
        Ok(Self::new(file))
    }
}

impl<R: AsyncRead + AsyncSeek + Unpin> PatchReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0, pending_content: None, finished: false }
    }

    /// Byte offset of the next unread byte
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Decode the next record header.
    ///
    /// Returns `None` once the end-of-patch record has been read. Content of
    /// a previous Created/Modified record that was not copied is skipped.
    /// An unrecognised prefix fails immediately without reading further.
    pub async fn next_entry(&mut self) -> Result<Option<PatchEntry>, PatchError> {
        if self.finished {
            return Ok(None);
        }
        if let Some(len) = self.pending_content.take() {
            self.offset = self.content_end(len)?;
        }

        let record_offset = self.offset;
        let prefix = self.read_u8().await?;
        let kind = RecordKind::from_prefix(prefix)
            .ok_or(PatchError::UnknownPrefix { prefix, offset: record_offset })?;

        let entry = match kind {
            RecordKind::Created | RecordKind::Modified => {
                let name = self.read_utf().await?;
                let len = self.read_u64().await?;
                self.pending_content = Some(len);
                if kind == RecordKind::Created {
                    PatchEntry::Created { name, len }
                } else {
                    PatchEntry::Modified { name, len }
                }
            }
            RecordKind::Deleted => PatchEntry::Deleted { name: self.read_utf().await? },
            RecordKind::Renamed => {
                let prev = self.read_utf().await?;
                let new = self.read_utf().await?;
                PatchEntry::Renamed { prev, new }
            }
            RecordKind::EndOfPatch => {
                let len = self.read_u16().await?;
                if len != 0 {
                    return Err(PatchError::MalformedTerminator { len, offset: record_offset });
                }
                self.finished = true;
                tracing::debug!(offset = self.offset, "end of patch");
                return Ok(None);
            }
        };
        Ok(Some(entry))
    }

    /// Stream the pending record content into `dest`.
    ///
    /// Copies exactly the declared length from the patch; running out of
    /// patch bytes first is an error. Returns the number of bytes copied.
    pub async fn copy_content<W>(&mut self, dest: &mut W) -> Result<u64, PatchError>
    where
        W: AsyncWrite + Unpin,
    {
        let Some(len) = self.pending_content.take() else {
            return Ok(0);
        };
        let end = self.content_end(len)?;
        self.inner.seek(SeekFrom::Start(self.offset)).await?;
        let copied = tokio::io::copy(&mut (&mut self.inner).take(len), dest).await?;
        dest.flush().await?;
        if copied != len {
            return Err(PatchError::UnexpectedEof { offset: self.offset + copied });
        }
        self.offset = end;
        Ok(copied)
    }

    /// Read the pending content into memory
    pub async fn read_content(&mut self) -> Result<Vec<u8>, PatchError> {
        let mut buf = Vec::new();
        self.copy_content(&mut buf).await?;
        Ok(buf)
    }

    /// Offset just past `len` content bytes. A length that runs beyond any
    /// seekable offset cannot be backed by the patch.
    fn content_end(&self, len: u64) -> Result<u64, PatchError> {
        self.offset
            .checked_add(len)
            .filter(|end| i64::try_from(*end).is_ok())
            .ok_or(PatchError::UnexpectedEof { offset: self.offset })
    }

    async fn read_exact_at(&mut self, buf: &mut [u8]) -> Result<(), PatchError> {
        self.inner.seek(SeekFrom::Start(self.offset)).await?;
        match self.inner.read_exact(buf).await {
            Ok(_) => {
                self.offset += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                Err(PatchError::UnexpectedEof { offset: self.offset })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn read_u8(&mut self) -> Result<u8, PatchError> {
        let mut buf = [0u8; 1];
        self.read_exact_at(&mut buf).await?;
        Ok(buf[0])
    }

    async fn read_u16(&mut self) -> Result<u16, PatchError> {
        let mut buf = [0u8; 2];
        self.read_exact_at(&mut buf).await?;
        Ok(u16::from_be_bytes(buf))
    }

    async fn read_u64(&mut self) -> Result<u64, PatchError> {
        let mut buf = [0u8; 8];
        self.read_exact_at(&mut buf).await?;
        Ok(u64::from_be_bytes(buf))
    }

    async fn read_utf(&mut self) -> Result<String, PatchError> {
        let len = self.read_u16().await?;
        let mut body = vec![0u8; len as usize];
        self.read_exact_at(&mut body).await?;
        utf::decode(&body)
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
