//! Length-prefixed binary record tables.
//!
//! ## Format
//!
//! All integers are big-endian.
//!
//! ```text
//! Table {
//!     magic: [0x44, 0x53, 0x59, 0x4D]   // "DSYM"
//!     version: u8
//!     record_count: u32
//!     records: [Record; record_count]
//!     digest: [u8; 32]                  // SHA-256 of every preceding byte
//! }
//!
//! Record {
//!     name: u32 len + UTF-8
//!     label: u32 len + UTF-8
//!     target_count: u32
//!     targets: [url: u32 len + UTF-8, has_qualifier: u8, qualifier?: u32 len + UTF-8]
//! }
//! ```
//!
//! A table is written from validated entries, so every field is present. A
//! damaged table is rejected as a whole; there is no partial recovery.

use crate::batch::RecordBatch;
use crate::error::{ArtifactError, ArtifactResult};
use docsearch_core::{Entry, Record, RecordTarget};
use sha2::{Digest, Sha256};

/// Magic bytes for record tables: "DSYM"
pub const TABLE_MAGIC: [u8; 4] = [0x44, 0x53, 0x59, 0x4D];

/// Current table format version.
pub const TABLE_VERSION: u8 = 1;

const DIGEST_LEN: usize = 32;

/// Smallest possible table: header plus digest.
const MIN_TABLE_LEN: usize = TABLE_MAGIC.len() + 1 + 4 + DIGEST_LEN;

/// Encodes entries as a binary table.
///
/// # Errors
///
/// Returns an error if a string or count does not fit its `u32` length
/// prefix.
pub fn encode_table<'a, I>(entries: I) -> ArtifactResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let entries: Vec<&Entry> = entries.into_iter().collect();
    let mut buf = Vec::new();

    buf.extend_from_slice(&TABLE_MAGIC);
    buf.push(TABLE_VERSION);
    write_len(&mut buf, entries.len(), "record count")?;

    for entry in entries {
        write_str(&mut buf, &entry.name, "name")?;
        write_str(&mut buf, &entry.label, "label")?;
        write_len(&mut buf, entry.targets.len(), "target count")?;
        for target in &entry.targets {
            write_str(&mut buf, &target.url, "url")?;
            match &target.qualifier {
                Some(qualifier) => {
                    buf.push(1);
                    write_str(&mut buf, qualifier, "qualifier")?;
                }
                None => buf.push(0),
            }
        }
    }

    let digest = Sha256::digest(&buf);
    buf.extend_from_slice(&digest);
    Ok(buf)
}

fn write_len(buf: &mut Vec<u8>, len: usize, context: &str) -> ArtifactResult<()> {
    let len = u32::try_from(len).map_err(|_| {
        ArtifactError::invalid_format(format!("{context} of {len} exceeds the u32 length prefix"))
    })?;
    buf.extend_from_slice(&len.to_be_bytes());
    Ok(())
}

fn write_str(buf: &mut Vec<u8>, s: &str, context: &str) -> ArtifactResult<()> {
    write_len(buf, s.len(), context)?;
    buf.extend_from_slice(s.as_bytes());
    Ok(())
}

/// Decodes a binary table.
///
/// # Errors
///
/// Returns an error if the magic, version or digest is wrong, or if the
/// contents are truncated or carry trailing bytes.
pub fn decode_table(data: &[u8]) -> ArtifactResult<RecordBatch> {
    if data.len() < MIN_TABLE_LEN {
        return Err(ArtifactError::UnexpectedEof {
            context: "table header",
        });
    }
    if data[0..4] != TABLE_MAGIC {
        return Err(ArtifactError::invalid_format("invalid table magic"));
    }

    let (body, trailer) = data.split_at(data.len() - DIGEST_LEN);
    let actual = Sha256::digest(body);
    if actual.as_slice() != trailer {
        return Err(ArtifactError::ChecksumMismatch {
            expected: hex(trailer),
            actual: hex(&actual),
        });
    }

    let mut reader = TableReader::new(body);
    reader.skip(TABLE_MAGIC.len());

    let version = reader.read_u8("version")?;
    if version != TABLE_VERSION {
        return Err(ArtifactError::UnsupportedVersion { version });
    }

    let count = reader.read_len("record count")?;
    let mut batch = RecordBatch::new();
    for position in 0..count {
        batch.push(reader.read_record(position)?);
    }

    if !reader.is_empty() {
        return Err(ArtifactError::invalid_format(format!(
            "{} trailing bytes after {count} records",
            reader.remaining()
        )));
    }
    Ok(batch)
}

/// Cursor over table bytes.
struct TableReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> TableReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn skip(&mut self, n: usize) {
        self.pos += n;
    }

    fn take(&mut self, n: usize, context: &'static str) -> ArtifactResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(ArtifactError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_u8(&mut self, context: &'static str) -> ArtifactResult<u8> {
        Ok(self.take(1, context)?[0])
    }

    fn read_len(&mut self, context: &'static str) -> ArtifactResult<usize> {
        let bytes = self.take(4, context)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize)
    }

    fn read_str(&mut self, context: &'static str) -> ArtifactResult<String> {
        let len = self.read_len(context)?;
        let bytes = self.take(len, context)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| ArtifactError::InvalidUtf8 { context })
    }

    fn read_record(&mut self, position: usize) -> ArtifactResult<Record> {
        let name = self.read_str("name")?;
        let label = self.read_str("label")?;
        let target_count = self.read_len("target count")?;

        let mut targets = Vec::new();
        for _ in 0..target_count {
            let url = self.read_str("url")?;
            let qualifier = match self.read_u8("qualifier flag")? {
                0 => None,
                1 => Some(self.read_str("qualifier")?),
                flag => {
                    return Err(ArtifactError::invalid_format(format!(
                        "invalid qualifier flag {flag} in record {position}"
                    )))
                }
            };
            targets.push(RecordTarget {
                url: Some(url),
                qualifier,
            });
        }

        Ok(Record {
            position,
            name: Some(name),
            label: Some(label),
            targets: Some(targets),
        })
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
