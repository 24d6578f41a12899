//! GZIP format support (RFC 1952).
//!
//! GZIP wraps a single DEFLATE stream with a 10-byte header (plus optional
//! filename/comment fields) and an 8-byte trailer holding the CRC-32 and
//! the uncompressed length modulo 2^32.

pub mod header;

pub use header::{CM_DEFLATE, GZIP_MAGIC, GzipHeader, flags};

use ferrozip_core::checksum::Crc32;
use ferrozip_core::error::{FerrozipError, Result};
use ferrozip_deflate::{deflate, inflate};
use std::io::Cursor;

/// Compress data into the GZIP format.
///
/// # Example
///
/// ```
/// use ferrozip_archive::gzip::{gzip_compress, gzip_decompress};
///
/// let data = b"Hello, GZIP!";
/// let compressed = gzip_compress(data, 6).unwrap();
/// assert_eq!(gzip_decompress(&compressed).unwrap(), data);
/// ```
pub fn gzip_compress(data: &[u8], level: u8) -> Result<Vec<u8>> {
    gzip_compress_with_header(data, GzipHeader::new(), level)
}

/// Compress data into the GZIP format, recording the original filename.
pub fn gzip_compress_with_filename(data: &[u8], filename: &str, level: u8) -> Result<Vec<u8>> {
    let header = GzipHeader::with_filename(filename).with_mtime_now();
    gzip_compress_with_header(data, header, level)
}

/// Compress data into the GZIP format with an explicit header.
pub fn gzip_compress_with_header(
    data: &[u8],
    mut header: GzipHeader,
    level: u8,
) -> Result<Vec<u8>> {
    let level = level.min(9);

    // XFL hints at the compression effort
    header.xfl = match level {
        0..=1 => 4, // Fastest
        9 => 2,     // Maximum compression
        _ => 0,
    };

    let mut output = Vec::with_capacity(data.len() / 2 + 32);
    header.write(&mut output)?;

    let compressed = deflate(data, level)?;
    output.extend_from_slice(&compressed);

    // Trailer: CRC-32 then ISIZE, both little-endian
    let crc = Crc32::checksum(data);
    output.extend_from_slice(&crc.to_le_bytes());
    output.extend_from_slice(&(data.len() as u32).to_le_bytes());

    Ok(output)
}

/// Decompress GZIP format data.
pub fn gzip_decompress(data: &[u8]) -> Result<Vec<u8>> {
    let (_, decompressed) = gzip_decompress_with_header(data)?;
    Ok(decompressed)
}

/// Decompress GZIP format data, returning the parsed header as well.
pub fn gzip_decompress_with_header(data: &[u8]) -> Result<(GzipHeader, Vec<u8>)> {
    let mut cursor = Cursor::new(data);
    let header = GzipHeader::read(&mut cursor)?;
    let body_start = cursor.position() as usize;

    let body = &data[body_start..];
    if body.len() < 8 {
        return Err(FerrozipError::unexpected_eof(8 - body.len()));
    }

    let deflate_data = &body[..body.len() - 8];
    let trailer = &body[body.len() - 8..];
    let expected_crc = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    let expected_size = u32::from_le_bytes([trailer[4], trailer[5], trailer[6], trailer[7]]);

    let decompressed = inflate(deflate_data)?;

    let actual_crc = Crc32::checksum(&decompressed);
    if actual_crc != expected_crc {
        return Err(FerrozipError::checksum_mismatch(expected_crc, actual_crc));
    }

    // ISIZE is the uncompressed length modulo 2^32
    let actual_size = decompressed.len() as u32;
    if actual_size != expected_size {
        return Err(FerrozipError::checksum_mismatch(expected_size, actual_size));
    }

    Ok((header, decompressed))
}
