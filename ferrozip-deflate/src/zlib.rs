//! Zlib format wrapper for DEFLATE (RFC 1950).
//!
//! The zlib format wraps a raw DEFLATE stream with a 2-byte header and a
//! big-endian Adler-32 trailer over the uncompressed data:
//!
//! ```text
//! +---+---+============+---+---+---+---+
//! |CMF|FLG| compressed |    ADLER32    |
//! +---+---+============+---+---+---+---+
//! ```
//!
//! - CMF: CM (bits 0-3, must be 8 for DEFLATE) and CINFO (bits 4-7,
//!   log2(window size) - 8)
//! - FLG: FCHECK (bits 0-4, makes `CMF*256 + FLG` divisible by 31),
//!   FDICT (bit 5, preset dictionary), FLEVEL (bits 6-7)

use crate::deflate::deflate;
use crate::inflate::inflate;
use ferrozip_core::checksum::Adler32;
use ferrozip_core::error::{FerrozipError, Result};

/// Zlib compression level indicator stored in the FLG byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum ZlibLevel {
    /// Fastest compression.
    Fastest = 0,
    /// Fast compression.
    Fast = 1,
    /// Default compression.
    Default = 2,
    /// Maximum compression.
    Maximum = 3,
}

impl ZlibLevel {
    /// Convert from compression level (0-9) to the FLEVEL indicator.
    fn from_level(level: u8) -> Self {
        match level {
            0..=2 => Self::Fastest,
            3..=5 => Self::Fast,
            6 => Self::Default,
            _ => Self::Maximum,
        }
    }
}

/// Compress data into the zlib format.
///
/// # Example
///
/// ```
/// use ferrozip_deflate::zlib::{zlib_compress, zlib_decompress};
///
/// let data = b"Hello, World! Hello, World!";
/// let compressed = zlib_compress(data, 6).unwrap();
/// let decompressed = zlib_decompress(&compressed).unwrap();
/// assert_eq!(decompressed, data);
/// ```
pub fn zlib_compress(input: &[u8], level: u8) -> Result<Vec<u8>> {
    let level = level.min(9);

    let compressed = deflate(input, level)?;

    let mut output = Vec::with_capacity(6 + compressed.len());

    // CMF: CM=8 (DEFLATE), CINFO=7 (32 KiB window)
    let cmf: u8 = 0x78;

    // FLG: FCHECK makes (CMF*256 + FLG) divisible by 31
    let flevel = ZlibLevel::from_level(level) as u8;
    let flg_base = flevel << 6;
    let remainder = ((cmf as u16) * 256 + flg_base as u16) % 31;
    let fcheck = if remainder == 0 {
        0
    } else {
        (31 - remainder) as u8
    };
    let flg = flg_base | fcheck;

    output.push(cmf);
    output.push(flg);
    output.extend_from_slice(&compressed);

    // Adler-32 trailer over the uncompressed data (big-endian)
    let checksum = Adler32::checksum(input);
    output.extend_from_slice(&checksum.to_be_bytes());

    Ok(output)
}

/// Decompress zlib format data.
///
/// Validates the header check bits and the Adler-32 trailer. Streams that
/// demand a preset dictionary (FDICT) are rejected as unsupported.
pub fn zlib_decompress(input: &[u8]) -> Result<Vec<u8>> {
    if input.len() < 6 {
        return Err(FerrozipError::invalid_header("zlib data too short"));
    }

    let cmf = input[0];
    let flg = input[1];

    let cm = cmf & 0x0F;
    if cm != 8 {
        return Err(FerrozipError::invalid_header(format!(
            "unsupported zlib compression method {}",
            cm
        )));
    }

    let cinfo = cmf >> 4;
    if cinfo > 7 {
        return Err(FerrozipError::invalid_header("invalid zlib window size"));
    }

    if ((cmf as u16) * 256 + flg as u16) % 31 != 0 {
        return Err(FerrozipError::invalid_header("zlib header check failed"));
    }

    if (flg >> 5) & 1 != 0 {
        return Err(FerrozipError::unsupported("zlib preset dictionary"));
    }

    let deflate_data = &input[2..input.len() - 4];
    let decompressed = inflate(deflate_data)?;

    let stored_checksum = u32::from_be_bytes([
        input[input.len() - 4],
        input[input.len() - 3],
        input[input.len() - 2],
        input[input.len() - 1],
    ]);
    let computed_checksum = Adler32::checksum(&decompressed);

    if stored_checksum != computed_checksum {
        return Err(FerrozipError::checksum_mismatch(
            stored_checksum,
            computed_checksum,
        ));
    }

    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zlib_header() {
        let compressed = zlib_compress(b"test", 6).expect("compress failed");

        assert_eq!(compressed[0], 0x78);

        let cmf = compressed[0] as u16;
        let flg = compressed[1] as u16;
        assert_eq!((cmf * 256 + flg) % 31, 0);
    }

    #[test]
    fn test_zlib_header_all_levels() {
        for level in 0..=9 {
            let compressed = zlib_compress(b"abc", level).unwrap();
            let cmf = compressed[0] as u16;
            let flg = compressed[1] as u16;
            assert_eq!((cmf * 256 + flg) % 31, 0, "level {} header check", level);
        }
    }

    #[test]
    fn test_zlib_roundtrip_simple() {
        let data = b"Hello, World!";
        let compressed = zlib_compress(data, 6).expect("compress failed");
        let decompressed = zlib_decompress(&compressed).expect("decompress failed");
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_zlib_roundtrip_repeated() {
        let data = b"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
        let compressed = zlib_compress(data, 6).expect("compress failed");
        assert!(compressed.len() < data.len());
        let decompressed = zlib_decompress(&compressed).expect("decompress failed");
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_zlib_roundtrip_empty() {
        let data: &[u8] = b"";
        let compressed = zlib_compress(data, 6).expect("compress failed");
        let decompressed = zlib_decompress(&compressed).expect("decompress failed");
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_zlib_roundtrip_large() {
        let data: Vec<u8> = (0..10000).map(|i| (i % 256) as u8).collect();
        let compressed = zlib_compress(&data, 6).expect("compress failed");
        let decompressed = zlib_decompress(&compressed).expect("decompress failed");
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_zlib_levels() {
        let data = b"Hello, World! Hello, World! Hello, World!";

        for level in 0..=9 {
            let compressed = zlib_compress(data, level)
                .unwrap_or_else(|_| panic!("level {} compress failed", level));
            let decompressed = zlib_decompress(&compressed)
                .unwrap_or_else(|_| panic!("level {} decompress failed", level));
            assert_eq!(&decompressed[..], &data[..]);
        }
    }

    #[test]
    fn test_zlib_checksum_verification() {
        let data = b"Test data for checksum";
        let mut compressed = zlib_compress(data, 6).expect("compress failed");

        // Corrupt the trailer
        let len = compressed.len();
        compressed[len - 1] ^= 0xFF;

        assert!(matches!(
            zlib_decompress(&compressed),
            Err(FerrozipError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_zlib_invalid_method() {
        // CM != 8
        let bad_data = [0x07, 0x9A, 0x00, 0x00, 0x00, 0x01];
        assert!(matches!(
            zlib_decompress(&bad_data),
            Err(FerrozipError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_zlib_header_check_failed() {
        // Valid CM/CINFO but FCHECK deliberately wrong.
        let bad_data = [0x78, 0x9D, 0x00, 0x00, 0x00, 0x01];
        assert!(matches!(
            zlib_decompress(&bad_data),
            Err(FerrozipError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_zlib_fdict_rejected() {
        // FDICT bit set with a valid FCHECK: CMF=0x78, FLG base 0x20.
        let cmf = 0x78u8;
        let flg_base = 0x20u8;
        let remainder = ((cmf as u16) * 256 + flg_base as u16) % 31;
        let flg = flg_base + if remainder == 0 { 0 } else { 31 - remainder as u8 };

        let bad_data = [cmf, flg, 0, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            zlib_decompress(&bad_data),
            Err(FerrozipError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_zlib_too_short() {
        let short_data = [0x78, 0x9C];
        assert!(zlib_decompress(&short_data).is_err());
    }
}
