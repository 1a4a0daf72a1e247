//! In-memory record store loaded from the flat message database file.
//!
//! The file is headerless: consecutive fixed-width records until end of
//! file, nothing else. Each record is a NUL-padded name field followed by a
//! NUL-padded message field.

use std::io;
use std::path::Path;

use bytes::BytesMut;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// On-disk width of the name field.
pub const NAME_MAX: usize = 16;
/// On-disk width of the message field.
pub const MSG_MAX: usize = 24;
/// On-disk size of one record.
pub const RECORD_SIZE: usize = NAME_MAX + MSG_MAX;

/// One database entry, decoded from its fixed-width form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub msg: String,
}

impl Record {
    fn from_bytes(raw: &[u8]) -> Self {
        Self {
            name: decode_field(&raw[..NAME_MAX]),
            msg: decode_field(&raw[NAME_MAX..]),
        }
    }
}

/// Field contents run to the first NUL; padding after it is ignored.
fn decode_field(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Records in file order. Scans are restartable, always reflect that order,
/// and report 1-based indexes.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Reads the database file through to end of stream.
    ///
    /// A trailing partial record is silently dropped; a read error
    /// mid-stream is surfaced, distinct from clean end of file.
    pub async fn load(path: &Path) -> io::Result<Self> {
        let mut file = File::open(path).await?;

        let mut buf = BytesMut::with_capacity(4096);
        loop {
            let n = file.read_buf(&mut buf).await?;
            if n == 0 {
                break;
            }
        }

        let records = buf
            .chunks_exact(RECORD_SIZE)
            .map(Record::from_bytes)
            .collect();

        Ok(Self { records })
    }

    /// Builds a store directly from records, preserving their order.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Lazy full scan in store order, 1-indexed. Each query runs a fresh
    /// scan; there is no cached index.
    pub fn scan(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.records.iter().enumerate().map(|(i, r)| (i + 1, r))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
