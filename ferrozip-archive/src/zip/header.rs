//! ZIP binary record layouts.
//!
//! Raw read/write of the fixed-layout records that make up a ZIP file:
//! local file headers, central directory records, the end-of-central-
//! directory record, and trailing data descriptors. All integers are
//! little-endian.

use super::dostime::DosDateTime;
use ferrozip_core::error::{FerrozipError, Result};
use std::io::{Read, Write};

/// ZIP local file header signature.
pub const LOCAL_FILE_HEADER_SIG: u32 = 0x04034B50;

/// ZIP central directory header signature.
pub const CENTRAL_DIR_HEADER_SIG: u32 = 0x02014B50;

/// ZIP end of central directory signature.
pub const END_OF_CENTRAL_DIR_SIG: u32 = 0x06054B50;

/// Data descriptor signature (optional, PK\x07\x08).
pub const DATA_DESCRIPTOR_SIG: u32 = 0x08074B50;

/// Flag bit 3: sizes/CRC follow the payload in a data descriptor.
pub const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;

/// Marker in 32-bit size/offset fields meaning "see ZIP64 extra field".
pub const ZIP64_MARKER_32: u32 = 0xFFFF_FFFF;

/// Marker in 16-bit count fields meaning "see ZIP64 EOCD".
pub const ZIP64_MARKER_16: u16 = 0xFFFF;

/// DOS directory attribute bit in the external attributes low byte.
pub const DOS_ATTR_DIRECTORY: u32 = 0x10;

/// Fixed size of the local file header.
pub const LOCAL_HEADER_LEN: usize = 30;

/// Fixed size of the central directory record.
pub const CENTRAL_DIR_RECORD_LEN: usize = 46;

/// Fixed size of the EOCD record (without comment).
pub const EOCD_LEN: usize = 22;

/// Maximum trailing comment length after the EOCD record.
pub const MAX_EOCD_COMMENT: usize = 65_535;

/// ZIP local file header.
#[derive(Debug, Clone)]
pub struct LocalFileHeader {
    /// Minimum version needed to extract.
    pub version_needed: u16,
    /// General purpose bit flags.
    pub flags: u16,
    /// Compression method id.
    pub method: u16,
    /// DOS modification time/date.
    pub dos_time: DosDateTime,
    /// CRC-32 of uncompressed data.
    pub crc32: u32,
    /// Compressed size.
    pub compressed_size: u32,
    /// Uncompressed size.
    pub uncompressed_size: u32,
    /// Member path.
    pub path: String,
    /// Raw extra-field blob.
    pub extra: Vec<u8>,
}

impl LocalFileHeader {
    /// Read a local file header, validating its signature.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; LOCAL_HEADER_LEN];
        reader.read_exact(&mut buf)?;

        let signature = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        if signature != LOCAL_FILE_HEADER_SIG {
            return Err(FerrozipError::invalid_magic(
                LOCAL_FILE_HEADER_SIG.to_le_bytes().to_vec(),
                signature.to_le_bytes().to_vec(),
            ));
        }

        let version_needed = u16::from_le_bytes([buf[4], buf[5]]);
        let flags = u16::from_le_bytes([buf[6], buf[7]]);
        let method = u16::from_le_bytes([buf[8], buf[9]]);
        let dos_time = DosDateTime {
            time: u16::from_le_bytes([buf[10], buf[11]]),
            date: u16::from_le_bytes([buf[12], buf[13]]),
        };
        let crc32 = u32::from_le_bytes([buf[14], buf[15], buf[16], buf[17]]);
        let compressed_size = u32::from_le_bytes([buf[18], buf[19], buf[20], buf[21]]);
        let uncompressed_size = u32::from_le_bytes([buf[22], buf[23], buf[24], buf[25]]);
        let path_len = u16::from_le_bytes([buf[26], buf[27]]) as usize;
        let extra_len = u16::from_le_bytes([buf[28], buf[29]]) as usize;

        let mut path_bytes = vec![0u8; path_len];
        reader.read_exact(&mut path_bytes)?;
        let path = String::from_utf8_lossy(&path_bytes).into_owned();

        let mut extra = vec![0u8; extra_len];
        reader.read_exact(&mut extra)?;

        Ok(Self {
            version_needed,
            flags,
            method,
            dos_time,
            crc32,
            compressed_size,
            uncompressed_size,
            path,
            extra,
        })
    }

    /// Write the header.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&LOCAL_FILE_HEADER_SIG.to_le_bytes())?;
        writer.write_all(&self.version_needed.to_le_bytes())?;
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&self.method.to_le_bytes())?;
        writer.write_all(&self.dos_time.time.to_le_bytes())?;
        writer.write_all(&self.dos_time.date.to_le_bytes())?;
        writer.write_all(&self.crc32.to_le_bytes())?;
        writer.write_all(&self.compressed_size.to_le_bytes())?;
        writer.write_all(&self.uncompressed_size.to_le_bytes())?;
        writer.write_all(&(self.path.len() as u16).to_le_bytes())?;
        writer.write_all(&(self.extra.len() as u16).to_le_bytes())?;
        writer.write_all(self.path.as_bytes())?;
        writer.write_all(&self.extra)?;
        Ok(())
    }

    /// Size of this header when written.
    pub fn written_len(&self) -> usize {
        LOCAL_HEADER_LEN + self.path.len() + self.extra.len()
    }

    /// Check flag bit 3: a data descriptor follows the payload.
    pub fn has_data_descriptor(&self) -> bool {
        self.flags & FLAG_DATA_DESCRIPTOR != 0
    }
}

/// ZIP central directory record.
#[derive(Debug, Clone)]
pub struct CentralDirRecord {
    /// Version and host that made the entry.
    pub version_made_by: u16,
    /// Minimum version needed to extract.
    pub version_needed: u16,
    /// General purpose bit flags.
    pub flags: u16,
    /// Compression method id.
    pub method: u16,
    /// DOS modification time/date.
    pub dos_time: DosDateTime,
    /// CRC-32 of uncompressed data.
    pub crc32: u32,
    /// Compressed size.
    pub compressed_size: u32,
    /// Uncompressed size.
    pub uncompressed_size: u32,
    /// Disk number where the member starts.
    pub disk_start: u16,
    /// Internal file attributes.
    pub internal_attr: u16,
    /// External file attributes (Unix mode in the high 16 bits).
    pub external_attr: u32,
    /// File offset of the member's local header.
    pub local_header_offset: u32,
    /// Member path.
    pub path: String,
    /// Raw extra-field blob.
    pub extra: Vec<u8>,
    /// Member comment.
    pub comment: String,
}

impl CentralDirRecord {
    /// Read a central directory record, validating its signature.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; CENTRAL_DIR_RECORD_LEN];
        reader.read_exact(&mut buf)?;

        let signature = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        if signature != CENTRAL_DIR_HEADER_SIG {
            return Err(FerrozipError::invalid_magic(
                CENTRAL_DIR_HEADER_SIG.to_le_bytes().to_vec(),
                signature.to_le_bytes().to_vec(),
            ));
        }

        let version_made_by = u16::from_le_bytes([buf[4], buf[5]]);
        let version_needed = u16::from_le_bytes([buf[6], buf[7]]);
        let flags = u16::from_le_bytes([buf[8], buf[9]]);
        let method = u16::from_le_bytes([buf[10], buf[11]]);
        let dos_time = DosDateTime {
            time: u16::from_le_bytes([buf[12], buf[13]]),
            date: u16::from_le_bytes([buf[14], buf[15]]),
        };
        let crc32 = u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]);
        let compressed_size = u32::from_le_bytes([buf[20], buf[21], buf[22], buf[23]]);
        let uncompressed_size = u32::from_le_bytes([buf[24], buf[25], buf[26], buf[27]]);
        let path_len = u16::from_le_bytes([buf[28], buf[29]]) as usize;
        let extra_len = u16::from_le_bytes([buf[30], buf[31]]) as usize;
        let comment_len = u16::from_le_bytes([buf[32], buf[33]]) as usize;
        let disk_start = u16::from_le_bytes([buf[34], buf[35]]);
        let internal_attr = u16::from_le_bytes([buf[36], buf[37]]);
        let external_attr = u32::from_le_bytes([buf[38], buf[39], buf[40], buf[41]]);
        let local_header_offset = u32::from_le_bytes([buf[42], buf[43], buf[44], buf[45]]);

        let mut path_bytes = vec![0u8; path_len];
        reader.read_exact(&mut path_bytes)?;
        let path = String::from_utf8_lossy(&path_bytes).into_owned();

        let mut extra = vec![0u8; extra_len];
        reader.read_exact(&mut extra)?;

        let mut comment_bytes = vec![0u8; comment_len];
        reader.read_exact(&mut comment_bytes)?;
        let comment = String::from_utf8_lossy(&comment_bytes).into_owned();

        Ok(Self {
            version_made_by,
            version_needed,
            flags,
            method,
            dos_time,
            crc32,
            compressed_size,
            uncompressed_size,
            disk_start,
            internal_attr,
            external_attr,
            local_header_offset,
            path,
            extra,
            comment,
        })
    }

    /// Write the record.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&CENTRAL_DIR_HEADER_SIG.to_le_bytes())?;
        writer.write_all(&self.version_made_by.to_le_bytes())?;
        writer.write_all(&self.version_needed.to_le_bytes())?;
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&self.method.to_le_bytes())?;
        writer.write_all(&self.dos_time.time.to_le_bytes())?;
        writer.write_all(&self.dos_time.date.to_le_bytes())?;
        writer.write_all(&self.crc32.to_le_bytes())?;
        writer.write_all(&self.compressed_size.to_le_bytes())?;
        writer.write_all(&self.uncompressed_size.to_le_bytes())?;
        writer.write_all(&(self.path.len() as u16).to_le_bytes())?;
        writer.write_all(&(self.extra.len() as u16).to_le_bytes())?;
        writer.write_all(&(self.comment.len() as u16).to_le_bytes())?;
        writer.write_all(&self.disk_start.to_le_bytes())?;
        writer.write_all(&self.internal_attr.to_le_bytes())?;
        writer.write_all(&self.external_attr.to_le_bytes())?;
        writer.write_all(&self.local_header_offset.to_le_bytes())?;
        writer.write_all(self.path.as_bytes())?;
        writer.write_all(&self.extra)?;
        writer.write_all(self.comment.as_bytes())?;
        Ok(())
    }
}

/// ZIP end-of-central-directory record.
#[derive(Debug, Clone)]
pub struct EndOfCentralDir {
    /// Total number of central directory records.
    pub total_entries: u16,
    /// Size of the central directory in bytes.
    pub cd_size: u32,
    /// File offset of the first central directory record.
    pub cd_offset: u32,
    /// Trailing archive comment.
    pub comment: Vec<u8>,
}

impl EndOfCentralDir {
    /// Locate and parse the EOCD record by scanning backward from the end
    /// of the buffer, allowing for a trailing comment of up to 65,535
    /// bytes.
    pub fn find(data: &[u8]) -> Result<(Self, usize)> {
        if data.len() < EOCD_LEN {
            return Err(FerrozipError::invalid_header(
                "buffer too small for an end-of-central-directory record",
            ));
        }

        let search_start = data.len().saturating_sub(MAX_EOCD_COMMENT + EOCD_LEN);
        let window = &data[search_start..];
        let sig = END_OF_CENTRAL_DIR_SIG.to_le_bytes();

        let pos_in_window = window
            .windows(4)
            .rposition(|w| w == sig)
            .ok_or_else(|| {
                FerrozipError::invalid_header("end of central directory record not found")
            })?;
        let pos = search_start + pos_in_window;

        let record = &data[pos..];
        if record.len() < EOCD_LEN {
            return Err(FerrozipError::invalid_header(
                "truncated end-of-central-directory record",
            ));
        }

        let disk_entries = u16::from_le_bytes([record[8], record[9]]);
        let total_entries = u16::from_le_bytes([record[10], record[11]]);
        let cd_size = u32::from_le_bytes([record[12], record[13], record[14], record[15]]);
        let cd_offset = u32::from_le_bytes([record[16], record[17], record[18], record[19]]);
        let comment_len = u16::from_le_bytes([record[20], record[21]]) as usize;

        if disk_entries != total_entries {
            return Err(FerrozipError::unsupported("multi-disk archive"));
        }

        let comment = record[EOCD_LEN..]
            .get(..comment_len)
            .unwrap_or(&record[EOCD_LEN..])
            .to_vec();

        Ok((
            Self {
                total_entries,
                cd_size,
                cd_offset,
                comment,
            },
            pos,
        ))
    }

    /// Write the record.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&END_OF_CENTRAL_DIR_SIG.to_le_bytes())?;
        writer.write_all(&0u16.to_le_bytes())?; // Disk number
        writer.write_all(&0u16.to_le_bytes())?; // Disk with central directory
        writer.write_all(&self.total_entries.to_le_bytes())?; // Entries on this disk
        writer.write_all(&self.total_entries.to_le_bytes())?; // Total entries
        writer.write_all(&self.cd_size.to_le_bytes())?;
        writer.write_all(&self.cd_offset.to_le_bytes())?;
        writer.write_all(&(self.comment.len() as u16).to_le_bytes())?;
        writer.write_all(&self.comment)?;
        Ok(())
    }
}

/// ZIP data descriptor: trails the payload when local flag bit 3 is set.
#[derive(Debug, Clone, Copy)]
pub struct DataDescriptor {
    /// CRC-32 of uncompressed data.
    pub crc32: u32,
    /// Compressed size.
    pub compressed_size: u32,
    /// Uncompressed size.
    pub uncompressed_size: u32,
}

impl DataDescriptor {
    /// Read a data descriptor. The optional `0x08074B50` signature word is
    /// tolerated in either form.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;

        let first_word = u32::from_le_bytes(buf);
        let crc32 = if first_word == DATA_DESCRIPTOR_SIG {
            reader.read_exact(&mut buf)?;
            u32::from_le_bytes(buf)
        } else {
            first_word
        };

        reader.read_exact(&mut buf)?;
        let compressed_size = u32::from_le_bytes(buf);
        reader.read_exact(&mut buf)?;
        let uncompressed_size = u32::from_le_bytes(buf);

        Ok(Self {
            crc32,
            compressed_size,
            uncompressed_size,
        })
    }
}
