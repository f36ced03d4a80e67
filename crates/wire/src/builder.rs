// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Patch writer.
//!
//! Records are appended in call order. Each record header is assembled in
//! memory first, so a name that cannot be framed fails before any byte of
//! the record reaches the sink.

use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};

use crate::error::PatchError;
use crate::frame::{put_u64, put_u8, put_utf};
use crate::record::RecordKind;

/// What to do when a record's source cannot be read.
///
/// Only failures that happen before the record's first byte is written can
/// be skipped. Once a record is partially written the stream is unparseable
/// and the build fails under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// Log, skip the record, keep building
    #[default]
    Lenient,
    /// Abort the patch
    Strict,
}

impl FromStr for WritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(WritePolicy::Lenient),
            "strict" => Ok(WritePolicy::Strict),
            other => Err(format!("unknown write policy: {other}")),
        }
    }
}

/// Content for a created or replaced file. The length is always known
/// before any content byte is written.
pub enum ContentSource {
    Bytes(Vec<u8>),
    /// Read from disk; length comes from file metadata
    File(PathBuf),
    /// Any reader with a declared length
    Reader { len: u64, reader: Box<dyn AsyncRead + Send + Unpin> },
}

impl std::fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            ContentSource::File(path) => write!(f, "File({})", path.display()),
            ContentSource::Reader { len, .. } => write!(f, "Reader({len} bytes)"),
        }
    }
}

impl ContentSource {
    async fn open(self) -> io::Result<(u64, Box<dyn AsyncRead + Send + Unpin>)> {
        match self {
            ContentSource::Bytes(bytes) => {
                Ok((bytes.len() as u64, Box::new(io::Cursor::new(bytes))))
            }
            ContentSource::File(path) => {
                let file = File::open(&path).await?;
                let metadata = file.metadata().await?;
                if !metadata.is_file() {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("{} is not a regular file", path.display()),
                    ));
                }
                Ok((metadata.len(), Box::new(file)))
            }
            ContentSource::Reader { len, reader } => Ok((len, reader)),
        }
    }
}

/// Result of [`PatchBuilder::finish`]
#[derive(Debug)]
pub struct PatchOutput<W> {
    pub sink: W,
    /// Records written, terminator excluded
    pub records: usize,
    /// Names whose records were skipped under [`WritePolicy::Lenient`]
    pub skipped: Vec<String>,
    pub bytes_written: u64,
}

pub struct PatchBuilder<W> {
    sink: W,
    policy: WritePolicy,
    records: usize,
    skipped: Vec<String>,
    bytes_written: u64,
}

impl PatchBuilder<BufWriter<File>> {
    /// Create (or truncate) a patch file on disk
    pub async fn create(path: &std::path::Path, policy: WritePolicy) -> Result<Self, PatchError> {
        let file = File::create(path).await?;
        tracing::debug!(path = %path.display(), ?policy, "creating patch");
        Ok(Self::new(BufWriter::new(file), policy))
    }
}

impl<W: AsyncWrite + Unpin> PatchBuilder<W> {
    pub fn new(sink: W, policy: WritePolicy) -> Self {
        Self { sink, policy, records: 0, skipped: Vec::new(), bytes_written: 0 }
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    pub async fn add_created_file(
        &mut self,
        name: &str,
        source: ContentSource,
    ) -> Result<(), PatchError> {
        self.write_content_record(RecordKind::Created, name, source).await
    }

    /// Same wire shape as a created file, tagged as a replacement
    pub async fn add_replaced_file(
        &mut self,
        name: &str,
        source: ContentSource,
    ) -> Result<(), PatchError> {
        self.write_content_record(RecordKind::Modified, name, source).await
    }

    pub async fn add_deleted_file(&mut self, name: &str) -> Result<(), PatchError> {
        let mut header = Vec::new();
        put_u8(&mut header, RecordKind::Deleted.prefix());
        put_utf(&mut header, name)?;
        self.write_header(name, &header).await?;
        self.records += 1;
        tracing::debug!(name, "patch: deleted");
        Ok(())
    }

    /// Arguments are new-then-prev; the wire order is prev-then-new.
    pub async fn add_renamed_file(
        &mut self,
        new_name: &str,
        prev_name: &str,
    ) -> Result<(), PatchError> {
        let mut header = Vec::new();
        put_u8(&mut header, RecordKind::Renamed.prefix());
        put_utf(&mut header, prev_name)?;
        put_utf(&mut header, new_name)?;
        self.write_header(new_name, &header).await?;
        self.records += 1;
        tracing::debug!(prev = prev_name, new = new_name, "patch: renamed");
        Ok(())
    }

    /// Write the terminator, flush and close the sink.
    pub async fn finish(mut self) -> Result<PatchOutput<W>, PatchError> {
        let mut header = Vec::new();
        put_u8(&mut header, RecordKind::EndOfPatch.prefix());
        put_utf(&mut header, "")?;
        self.sink.write_all(&header).await?;
        self.bytes_written += header.len() as u64;
        self.sink.flush().await?;
        self.sink.shutdown().await?;

        tracing::info!(
            records = self.records,
            skipped = self.skipped.len(),
            bytes = self.bytes_written,
            "patch finished"
        );
        Ok(PatchOutput {
            sink: self.sink,
            records: self.records,
            skipped: self.skipped,
            bytes_written: self.bytes_written,
        })
    }

    async fn write_content_record(
        &mut self,
        kind: RecordKind,
        name: &str,
        source: ContentSource,
    ) -> Result<(), PatchError> {
        // Frame the name before touching the source so encoding errors are
        // always fatal, independent of the policy.
        let mut header = Vec::new();
        put_u8(&mut header, kind.prefix());
        put_utf(&mut header, name)?;

        let (len, mut reader) = match source.open().await {
            Ok(opened) => opened,
            Err(e) => return self.skip_or_fail(name, e),
        };
        put_u64(&mut header, len);

        self.write_header(name, &header).await?;
        let copied = tokio::io::copy(&mut (&mut reader).take(len), &mut self.sink)
            .await
            .map_err(|source| PatchError::TornRecord { name: name.to_string(), source })?;
        self.bytes_written += copied;
        if copied != len {
            return Err(PatchError::ContentLengthMismatch {
                name: name.to_string(),
                declared: len,
                actual: copied,
            });
        }

        self.records += 1;
        tracing::debug!(name, ?kind, len, "patch: content record");
        Ok(())
    }

    async fn write_header(&mut self, name: &str, header: &[u8]) -> Result<(), PatchError> {
        self.sink
            .write_all(header)
            .await
            .map_err(|source| PatchError::TornRecord { name: name.to_string(), source })?;
        self.bytes_written += header.len() as u64;
        Ok(())
    }

    fn skip_or_fail(&mut self, name: &str, error: io::Error) -> Result<(), PatchError> {
        match self.policy {
            WritePolicy::Lenient => {
                tracing::warn!(name, error = %error, "skipping unreadable file in patch");
                self.skipped.push(name.to_string());
                Ok(())
            }
            WritePolicy::Strict => Err(PatchError::Io(error)),
        }
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
