//! # Ferrozip Deflate
//!
//! Pure Rust implementation of the DEFLATE compressed-block format
//! (RFC 1951) and the zlib container around it (RFC 1950).
//!
//! ## Supported block types
//!
//! - **Stored** (type `00`): uncompressed, used for incompressible input
//! - **Fixed Huffman** (type `01`): LZ77 back-references coded with the
//!   RFC-mandated fixed code tables
//!
//! Dynamic Huffman blocks (type `10`) are a documented extension point:
//! decoders reject them with an unsupported-feature error rather than
//! attempting a partial decode. The reserved block type `11` fails closed.
//!
//! ## Example
//!
//! ```rust
//! use ferrozip_deflate::{deflate, inflate};
//!
//! let original = b"Hello, World! Hello, World!";
//! let compressed = deflate(original, 6).unwrap();
//! let decompressed = inflate(&compressed).unwrap();
//! assert_eq!(&decompressed, original);
//! ```
//!
//! ## Compression Levels
//!
//! - Level 0: no compression (stored blocks)
//! - Level 1-4: fast, greedy matching
//! - Level 5-9: deeper match chains with lazy matching (default is 6)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod deflate;
pub mod huffman;
pub mod inflate;
pub mod lz77;
pub mod tables;
pub mod zlib;

// Re-exports
pub use deflate::{Deflater, deflate};
pub use huffman::{CodeTable, HuffmanTree};
pub use inflate::{Inflater, inflate};
pub use lz77::{Lz77Encoder, Lz77Token};
pub use zlib::{zlib_compress, zlib_decompress};
