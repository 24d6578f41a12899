//! # Ferrozip Core
//!
//! Core components for the Ferrozip codec library.
//!
//! This crate provides the fundamental building blocks shared by the DEFLATE
//! codec and the container/archive layers:
//!
//! - [`bitstream`]: LSB-first bit-level I/O over in-memory buffers
//! - [`checksum`]: CRC-32 (RFC 1952) and Adler-32 (RFC 1950)
//! - [`window`]: decode output buffer with back-reference copy semantics
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! Ferrozip is designed as a layered stack:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │ L3: Container                                          │
//! │     ZIP archive model/codec, gzip wrapper              │
//! ├────────────────────────────────────────────────────────┤
//! │ L2: Codec                                              │
//! │     DEFLATE (LZ77 + Huffman), zlib wrapper             │
//! ├────────────────────────────────────────────────────────┤
//! │ L1: Primitives (this crate)                            │
//! │     BitReader/BitWriter, OutputWindow, CRC-32/Adler-32 │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! All operations are whole-buffer and synchronous: inputs and outputs are
//! fully materialized byte buffers, and the only long-lived shared state is
//! read-only constant tables.
//!
//! ## Example
//!
//! ```rust
//! use ferrozip_core::bitstream::{BitReader, BitWriter};
//! use ferrozip_core::checksum::Crc32;
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3);
//! let bytes = writer.finish();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//!
//! assert_eq!(Crc32::checksum(b"123456789"), 0xCBF43926);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod checksum;
pub mod error;
pub mod window;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use checksum::{Adler32, Crc32};
pub use error::{FerrozipError, Result};
pub use window::OutputWindow;

/// Compression level for codecs that support it.
///
/// Levels are clamped to the 0-9 range. Level 0 means "store only"
/// (no compression).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    /// No compression (store only).
    pub const NONE: Self = Self(0);
    /// Fastest compression.
    pub const FAST: Self = Self(1);
    /// Default compression (balanced).
    pub const DEFAULT: Self = Self(6);
    /// Best compression (slowest).
    pub const BEST: Self = Self(9);

    /// Create a custom compression level (0-9, clamped).
    pub fn new(level: u8) -> Self {
        Self(level.min(9))
    }

    /// Get the level value.
    pub fn level(&self) -> u8 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u8> for CompressionLevel {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}
