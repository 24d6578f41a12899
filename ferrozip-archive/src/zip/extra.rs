//! ZIP extra-field records.
//!
//! Extra fields are an ordered sequence of `(id, payload)` records attached
//! to local and central headers. Unknown ids round-trip byte-for-byte;
//! two well-known ids additionally get a typed view:
//!
//! - `0x5455` Extended timestamp (Info-ZIP "UT")
//! - `0x7075` Unicode path (Info-ZIP "up")

use ferrozip_core::checksum::Crc32;
use ferrozip_core::error::{FerrozipError, Result};

/// Extended timestamp extra field id (Info-ZIP "UT").
pub const EXTRA_ID_UNIX_TIMESTAMP: u16 = 0x5455;

/// Unicode path extra field id (Info-ZIP "up").
pub const EXTRA_ID_UNICODE_PATH: u16 = 0x7075;

/// A single raw extra-field record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraField {
    /// Header id.
    pub id: u16,
    /// Opaque payload bytes.
    pub data: Vec<u8>,
}

/// Typed view of the extra-field ids this library understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnownExtraField {
    /// Extended timestamp (0x5455): presence flags plus an optional
    /// modification time in Unix seconds.
    UnixTimestamp {
        /// Bit 0: mtime present, bit 1: atime, bit 2: ctime.
        flags: u8,
        /// Modification time, when flagged present.
        mtime: Option<u32>,
    },
    /// Unicode path (0x7075): CRC-32 of the standard path field plus the
    /// UTF-8 replacement name.
    UnicodePath {
        /// Format version (1).
        version: u8,
        /// CRC-32 of the header path bytes this name replaces.
        name_crc32: u32,
        /// UTF-8 path.
        name: String,
    },
}

impl ExtraField {
    /// Create a raw extra field.
    pub fn new(id: u16, data: impl Into<Vec<u8>>) -> Self {
        Self {
            id,
            data: data.into(),
        }
    }

    /// Build an extended-timestamp field carrying a modification time.
    pub fn unix_timestamp(mtime_secs: u32) -> Self {
        let mut data = Vec::with_capacity(5);
        data.push(0x01); // mtime present
        data.extend_from_slice(&mtime_secs.to_le_bytes());
        Self::new(EXTRA_ID_UNIX_TIMESTAMP, data)
    }

    /// Build a Unicode-path field replacing `standard_path`.
    pub fn unicode_path(standard_path: &str, utf8_path: &str) -> Self {
        let mut data = Vec::with_capacity(5 + utf8_path.len());
        data.push(1); // version
        data.extend_from_slice(&Crc32::checksum(standard_path.as_bytes()).to_le_bytes());
        data.extend_from_slice(utf8_path.as_bytes());
        Self::new(EXTRA_ID_UNICODE_PATH, data)
    }

    /// Parse an extra-field blob into its ordered records.
    ///
    /// A record whose declared size runs past the end of the blob, or
    /// trailing bytes too short to form a record header, are format errors.
    pub fn parse_all(raw: &[u8]) -> Result<Vec<ExtraField>> {
        let mut fields = Vec::new();
        let mut offset = 0;

        while offset < raw.len() {
            if offset + 4 > raw.len() {
                return Err(FerrozipError::invalid_header(
                    "truncated extra field record header",
                ));
            }
            let id = u16::from_le_bytes([raw[offset], raw[offset + 1]]);
            let size = u16::from_le_bytes([raw[offset + 2], raw[offset + 3]]) as usize;
            offset += 4;

            if offset + size > raw.len() {
                return Err(FerrozipError::invalid_header(
                    "extra field record exceeds blob length",
                ));
            }

            fields.push(ExtraField::new(id, &raw[offset..offset + size]));
            offset += size;
        }

        Ok(fields)
    }

    /// Serialize an ordered sequence of records into a header blob.
    pub fn serialize_all(fields: &[ExtraField]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for field in fields {
            if field.data.len() > u16::MAX as usize {
                return Err(FerrozipError::invalid_input(format!(
                    "extra field 0x{:04x} payload exceeds 65535 bytes",
                    field.id
                )));
            }
            out.extend_from_slice(&field.id.to_le_bytes());
            out.extend_from_slice(&(field.data.len() as u16).to_le_bytes());
            out.extend_from_slice(&field.data);
        }
        if out.len() > u16::MAX as usize {
            return Err(FerrozipError::invalid_input(
                "serialized extra fields exceed 65535 bytes",
            ));
        }
        Ok(out)
    }

    /// Interpret a known id, or `None` when the id is unknown or the
    /// payload does not match its documented layout. Either way the raw
    /// bytes remain untouched for round-tripping.
    pub fn interpret(&self) -> Option<KnownExtraField> {
        match self.id {
            EXTRA_ID_UNIX_TIMESTAMP => {
                let flags = *self.data.first()?;
                let mtime = if flags & 0x01 != 0 {
                    let bytes = self.data.get(1..5)?;
                    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
                } else {
                    None
                };
                Some(KnownExtraField::UnixTimestamp { flags, mtime })
            }
            EXTRA_ID_UNICODE_PATH => {
                let version = *self.data.first()?;
                let crc = self.data.get(1..5)?;
                let name = std::str::from_utf8(self.data.get(5..)?).ok()?;
                Some(KnownExtraField::UnicodePath {
                    version,
                    name_crc32: u32::from_le_bytes([crc[0], crc[1], crc[2], crc[3]]),
                    name: name.to_string(),
                })
            }
            _ => None,
        }
    }
}
