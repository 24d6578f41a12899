//! # Ferrozip Archive
//!
//! Container format support for Ferrozip.
//!
//! This crate provides the two container layers above the DEFLATE codec:
//!
//! - **ZIP**: an in-memory archive model (ordered, immutable member values)
//!   plus the binary codec for local headers, the central directory, and the
//!   end-of-central-directory record
//! - **GZIP**: single-stream compression wrapper (RFC 1952)
//!
//! ## Example
//!
//! ```rust
//! use ferrozip_archive::zip::{Archive, MemberBuilder};
//!
//! let member = MemberBuilder::file("hello.txt", b"Hello, World!")
//!     .build()
//!     .unwrap();
//! let archive = Archive::new().add(member);
//!
//! let bytes = archive.to_bytes().unwrap();
//! let decoded = Archive::from_bytes(&bytes).unwrap();
//! assert_eq!(decoded.member_count(), 1);
//! assert_eq!(
//!     decoded.find("hello.txt").unwrap().content().unwrap(),
//!     b"Hello, World!"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod gzip;
pub mod zip;

// Re-exports
pub use gzip::{GzipHeader, gzip_compress, gzip_compress_with_filename, gzip_decompress};
pub use zip::{Archive, CompressionMethod, ExtraField, Member, MemberBuilder, MemberKind};
