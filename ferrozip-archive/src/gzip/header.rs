//! GZIP header parsing and writing.

use ferrozip_core::error::{FerrozipError, Result};
use std::io::{Read, Write};
use std::time::{SystemTime, UNIX_EPOCH};

/// GZIP magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// GZIP compression method: DEFLATE.
pub const CM_DEFLATE: u8 = 8;

/// GZIP header flag bits.
pub mod flags {
    /// Text file.
    pub const FTEXT: u8 = 0x01;
    /// Header CRC present.
    pub const FHCRC: u8 = 0x02;
    /// Extra field present.
    pub const FEXTRA: u8 = 0x04;
    /// Original filename present.
    pub const FNAME: u8 = 0x08;
    /// Comment present.
    pub const FCOMMENT: u8 = 0x10;
}

/// GZIP file header.
#[derive(Debug, Clone)]
pub struct GzipHeader {
    /// Compression method (must be 8 for DEFLATE).
    pub method: u8,
    /// Flags.
    pub flags: u8,
    /// Modification time (Unix timestamp, 0 if unavailable).
    pub mtime: u32,
    /// Extra flags (compression-level hint).
    pub xfl: u8,
    /// Operating system.
    pub os: u8,
    /// Original filename (if FNAME flag set).
    pub filename: Option<String>,
    /// Comment (if FCOMMENT flag set).
    pub comment: Option<String>,
    /// Header CRC16 (if FHCRC flag set).
    pub header_crc: Option<u16>,
}

impl Default for GzipHeader {
    fn default() -> Self {
        Self {
            method: CM_DEFLATE,
            flags: 0,
            mtime: 0,
            xfl: 0,
            os: 255, // Unknown OS
            filename: None,
            comment: None,
            header_crc: None,
        }
    }
}

impl GzipHeader {
    /// Create a new GZIP header with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a header carrying the original filename.
    pub fn with_filename(filename: &str) -> Self {
        Self {
            flags: flags::FNAME,
            filename: Some(filename.to_string()),
            ..Self::default()
        }
    }

    /// Set the modification time to now.
    pub fn with_mtime_now(mut self) -> Self {
        self.mtime = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        self
    }

    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&GZIP_MAGIC)?;
        writer.write_all(&[self.method, self.flags])?;
        writer.write_all(&self.mtime.to_le_bytes())?;
        writer.write_all(&[self.xfl, self.os])?;

        if self.flags & flags::FNAME != 0 {
            if let Some(ref filename) = self.filename {
                writer.write_all(filename.as_bytes())?;
                writer.write_all(&[0])?; // Null terminator
            }
        }

        if self.flags & flags::FCOMMENT != 0 {
            if let Some(ref comment) = self.comment {
                writer.write_all(comment.as_bytes())?;
                writer.write_all(&[0])?; // Null terminator
            }
        }

        Ok(())
    }

    /// Read a GZIP header from a reader.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; 10];
        reader.read_exact(&mut buf)?;

        if buf[0..2] != GZIP_MAGIC {
            return Err(FerrozipError::invalid_magic(
                GZIP_MAGIC.to_vec(),
                buf[0..2].to_vec(),
            ));
        }

        let method = buf[2];
        if method != CM_DEFLATE {
            return Err(FerrozipError::invalid_header(format!(
                "gzip compression method {}",
                method
            )));
        }

        let hflags = buf[3];
        let mtime = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let xfl = buf[8];
        let os = buf[9];

        let mut filename = None;
        let mut comment = None;
        let mut header_crc = None;

        // Extra field: length-prefixed, skipped
        if hflags & flags::FEXTRA != 0 {
            let mut xlen_buf = [0u8; 2];
            reader.read_exact(&mut xlen_buf)?;
            let xlen = u16::from_le_bytes(xlen_buf) as usize;
            let mut extra = vec![0u8; xlen];
            reader.read_exact(&mut extra)?;
        }

        if hflags & flags::FNAME != 0 {
            filename = Some(Self::read_null_terminated(reader)?);
        }

        if hflags & flags::FCOMMENT != 0 {
            comment = Some(Self::read_null_terminated(reader)?);
        }

        if hflags & flags::FHCRC != 0 {
            let mut crc_buf = [0u8; 2];
            reader.read_exact(&mut crc_buf)?;
            header_crc = Some(u16::from_le_bytes(crc_buf));
        }

        Ok(Self {
            method,
            flags: hflags,
            mtime,
            xfl,
            os,
            filename,
            comment,
            header_crc,
        })
    }

    /// Read a null-terminated string.
    fn read_null_terminated<R: Read>(reader: &mut R) -> Result<String> {
        let mut bytes = Vec::new();
        let mut buf = [0u8; 1];

        loop {
            reader.read_exact(&mut buf)?;
            if buf[0] == 0 {
                break;
            }
            bytes.push(buf[0]);
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_gzip_magic() {
        assert_eq!(GZIP_MAGIC, [0x1F, 0x8B]);
    }

    #[test]
    fn test_gzip_header_default() {
        let header = GzipHeader::new();
        assert_eq!(header.method, CM_DEFLATE);
        assert_eq!(header.flags, 0);
    }

    #[test]
    fn test_gzip_header_with_filename() {
        let header = GzipHeader::with_filename("test.txt");
        assert_eq!(header.flags & flags::FNAME, flags::FNAME);
        assert_eq!(header.filename, Some("test.txt".to_string()));
    }

    #[test]
    fn test_gzip_header_roundtrip() {
        let mut header = GzipHeader::with_filename("data.bin");
        header.mtime = 1_700_000_000;

        let mut bytes = Vec::new();
        header.write(&mut bytes).unwrap();

        let parsed = GzipHeader::read(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(parsed.method, CM_DEFLATE);
        assert_eq!(parsed.mtime, 1_700_000_000);
        assert_eq!(parsed.filename, Some("data.bin".to_string()));
    }

    #[test]
    fn test_gzip_header_bad_magic() {
        let bytes = [0x50, 0x4B, 8, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            GzipHeader::read(&mut Cursor::new(&bytes)),
            Err(FerrozipError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn test_gzip_header_bad_method() {
        let bytes = [0x1F, 0x8B, 7, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            GzipHeader::read(&mut Cursor::new(&bytes)),
            Err(FerrozipError::InvalidHeader { .. })
        ));
    }
}
