//! DEFLATE decompression (inflate).
//!
//! This module implements the decompression side of RFC 1951 for stored and
//! fixed-Huffman blocks. Dynamic Huffman blocks (type `10`) are rejected
//! with an unsupported-feature error rather than partially decoded, and the
//! reserved type `11` fails closed.

use crate::huffman::END_OF_BLOCK;
use crate::tables::{
    DISTANCE_EXTRA_BITS, LENGTH_EXTRA_BITS, decode_distance, decode_length, fixed_distance_tree,
    fixed_litlen_tree,
};
use ferrozip_core::error::{FerrozipError, Result};
use ferrozip_core::{BitReader, OutputWindow};

/// DEFLATE decompressor.
#[derive(Debug)]
pub struct Inflater {
    /// Decoded output; doubles as the back-reference window.
    output: OutputWindow,
    /// Whether the final block has been decoded.
    final_block: bool,
}

impl Inflater {
    /// Create a new DEFLATE decompressor.
    pub fn new() -> Self {
        Self {
            output: OutputWindow::with_capacity(4096),
            final_block: false,
        }
    }

    /// Decompress a complete DEFLATE stream from a bit reader.
    pub fn inflate(mut self, reader: &mut BitReader<'_>) -> Result<Vec<u8>> {
        while !self.final_block {
            self.inflate_block(reader)?;
        }

        Ok(self.output.into_output())
    }

    /// Decompress a single block.
    fn inflate_block(&mut self, reader: &mut BitReader<'_>) -> Result<()> {
        let bfinal = reader.read_bit()?;
        let btype = reader.read_bits(2)?;

        self.final_block = bfinal;

        match btype {
            0 => self.inflate_stored(reader),
            1 => self.inflate_fixed(reader),
            2 => Err(FerrozipError::unsupported("dynamic Huffman block")),
            3 => Err(FerrozipError::invalid_header("reserved block type 3")),
            _ => unreachable!(),
        }
    }

    /// Decompress a stored (uncompressed) block.
    fn inflate_stored(&mut self, reader: &mut BitReader<'_>) -> Result<()> {
        reader.align_to_byte();

        let len = reader.read_bits(16)? as u16;
        let nlen = reader.read_bits(16)? as u16;

        if nlen != !len {
            return Err(FerrozipError::stored_length_mismatch(len, nlen));
        }

        let mut buf = vec![0u8; len as usize];
        reader.read_bytes(&mut buf)?;
        self.output.write_literals(&buf);

        Ok(())
    }

    /// Decompress a block coded with the fixed Huffman tables.
    fn inflate_fixed(&mut self, reader: &mut BitReader<'_>) -> Result<()> {
        let litlen_tree = fixed_litlen_tree();
        let dist_tree = fixed_distance_tree();

        loop {
            let code = litlen_tree.decode(reader)?;

            if code < END_OF_BLOCK {
                self.output.write_literal(code as u8);
            } else if code == END_OF_BLOCK {
                break;
            } else if code <= 285 {
                let length_idx = (code - 257) as usize;
                let extra_bits = LENGTH_EXTRA_BITS[length_idx];
                let extra = reader.read_bits(extra_bits)? as u16;
                let length = decode_length(code, extra);

                let dist_code = dist_tree.decode(reader)?;
                if dist_code >= 30 {
                    return Err(FerrozipError::invalid_huffman(reader.bit_position()));
                }

                let dist_extra_bits = DISTANCE_EXTRA_BITS[dist_code as usize];
                let dist_extra = reader.read_bits(dist_extra_bits)? as u16;
                let distance = decode_distance(dist_code, dist_extra);

                self.output.copy_match(distance as usize, length as usize)?;
            } else {
                // Symbols 286-287 exist in the fixed code but are invalid.
                return Err(FerrozipError::invalid_huffman(reader.bit_position()));
            }
        }

        Ok(())
    }
}

impl Default for Inflater {
    fn default() -> Self {
        Self::new()
    }
}

/// Decompress a complete DEFLATE stream.
pub fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(data);
    Inflater::new().inflate(&mut reader)
}
