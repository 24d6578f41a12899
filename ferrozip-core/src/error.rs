//! Error types for Ferrozip operations.
//!
//! This module provides the error type shared by every layer of the
//! workspace, covering format validation, checksum verification, and
//! decompression failures. Expected format violations always surface as
//! error values; only encoder-internal consistency bugs may panic.

use std::io;
use thiserror::Error;

/// The main error type for Ferrozip operations.
#[derive(Debug, Error)]
pub enum FerrozipError {
    /// I/O error from an underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number or record signature.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Invalid or malformed header.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// A stored DEFLATE block whose LEN/NLEN pair is inconsistent.
    #[error("Stored block length mismatch: LEN={len:#06x}, NLEN={nlen:#06x}")]
    StoredLengthMismatch {
        /// LEN field as read.
        len: u16,
        /// NLEN field as read.
        nlen: u16,
    },

    /// CRC-32 or Adler-32 checksum mismatch.
    #[error("Checksum mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        /// Expected checksum from the stream.
        expected: u32,
        /// Checksum computed from the data.
        computed: u32,
    },

    /// Invalid Huffman code encountered during decompression.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidHuffmanCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// Invalid distance in an LZ77 back-reference.
    #[error("Invalid back-reference distance: {distance} exceeds produced output {available}")]
    InvalidDistance {
        /// The invalid distance value.
        distance: usize,
        /// Number of bytes produced so far.
        available: usize,
    },

    /// Unexpected end of the input buffer.
    #[error("Unexpected end of stream: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// Feature present in the stream but not supported by this library.
    #[error("Unsupported feature: {feature}")]
    Unsupported {
        /// Description of the unsupported feature.
        feature: String,
    },

    /// Invalid caller-supplied input (e.g. a rejected member path).
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the rejected input.
        message: String,
    },
}

/// Result type alias for Ferrozip operations.
pub type Result<T> = std::result::Result<T, FerrozipError>;

impl FerrozipError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a stored block length mismatch error.
    pub fn stored_length_mismatch(len: u16, nlen: u16) -> Self {
        Self::StoredLengthMismatch { len, nlen }
    }

    /// Create a checksum mismatch error.
    pub fn checksum_mismatch(expected: u32, computed: u32) -> Self {
        Self::ChecksumMismatch { expected, computed }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create an invalid distance error.
    pub fn invalid_distance(distance: usize, available: usize) -> Self {
        Self::InvalidDistance {
            distance,
            available,
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        Self::Unsupported {
            feature: feature.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
