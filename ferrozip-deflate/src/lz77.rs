//! LZ77 match finding for DEFLATE.
//!
//! The encoder scans the input against a 32 KiB sliding window of recent
//! data. For each position it either emits a literal byte or, when a prior
//! occurrence of at least 3 bytes is found, a (length, distance)
//! back-reference.
//!
//! Candidate positions are located through a hash table over 3-byte
//! prefixes with chained previous positions; the chain is walked from the
//! most recent (nearest) candidate outward, and a candidate only replaces
//! the current best on strictly greater length, so ties on length always
//! resolve to the smallest distance.

/// Maximum window size for DEFLATE (32 KiB).
pub const WINDOW_SIZE: usize = 32768;

/// Minimum match length.
pub const MIN_MATCH: usize = 3;

/// Maximum match length.
pub const MAX_MATCH: usize = 258;

/// Size of the hash table (power of 2).
const HASH_SIZE: usize = 32768;

/// Hash mask.
const HASH_MASK: usize = HASH_SIZE - 1;

/// Upper bound on hash chain entries to check.
const MAX_CHAIN_LENGTH: usize = 4096;

/// A token produced by LZ77 compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lz77Token {
    /// A literal byte.
    Literal(u8),
    /// A back-reference to previously seen data.
    Match {
        /// Number of bytes to copy (3-258).
        length: u16,
        /// Distance back into the window (1-32768).
        distance: u16,
    },
}

/// LZ77 encoder for DEFLATE compression.
#[derive(Debug)]
pub struct Lz77Encoder {
    /// Sliding window buffer (double-sized so matches can run past 32 KiB
    /// before a slide).
    window: Vec<u8>,
    /// Current position in the window.
    window_pos: usize,
    /// Hash table: maps hash -> most recent position in window.
    hash_table: Vec<u16>,
    /// Hash chain: previous position with the same hash.
    hash_chain: Vec<u16>,
    /// Chain search depth for this level.
    max_chain: usize,
    /// Minimum match length to accept for this level.
    min_match: usize,
    /// Enable one-step lazy matching.
    lazy_match: bool,
}

impl Lz77Encoder {
    /// Create a new LZ77 encoder with default settings.
    pub fn new() -> Self {
        Self::with_level(6)
    }

    /// Create a new LZ77 encoder with the specified compression level (0-9).
    pub fn with_level(level: u8) -> Self {
        let level = level.min(9);

        let (max_chain, min_match, lazy_match) = match level {
            0 => (0, MAX_MATCH + 1, false), // Store only
            1 => (4, 4, false),
            2 => (8, 4, false),
            3 => (16, 4, false),
            4 => (32, 4, false),
            5 => (64, 4, true),
            6 => (128, 4, true),
            7 => (256, 3, true),
            8 => (1024, 3, true),
            9 => (MAX_CHAIN_LENGTH, 3, true),
            _ => unreachable!(),
        };

        Self {
            window: vec![0; WINDOW_SIZE * 2],
            window_pos: 0,
            hash_table: vec![0; HASH_SIZE],
            hash_chain: vec![0; WINDOW_SIZE],
            max_chain,
            min_match,
            lazy_match,
        }
    }

    /// Reset the encoder state.
    pub fn reset(&mut self) {
        self.window_pos = 0;
        self.hash_table.fill(0);
        self.hash_chain.fill(0);
    }

    /// Mix 3 bytes into a hash table index.
    #[inline(always)]
    fn hash(b0: u8, b1: u8, b2: u8) -> usize {
        let h = ((b0 as usize).wrapping_mul(506832829))
            ^ ((b1 as usize).wrapping_mul(2654435761) << 8)
            ^ ((b2 as usize).wrapping_mul(374761393) << 16);
        (h ^ (h >> 15)) & HASH_MASK
    }

    /// Insert the 3-byte prefix at `pos` into the hash chain.
    fn update_hash(&mut self, pos: usize) {
        if pos + 2 < self.window.len() {
            let h = Self::hash(self.window[pos], self.window[pos + 1], self.window[pos + 2]);
            let prev = self.hash_table[h];
            self.hash_chain[pos & (WINDOW_SIZE - 1)] = prev;
            self.hash_table[h] = pos as u16;
        }
    }

    /// Find the longest match at `pos`.
    ///
    /// The chain is walked nearest-first and only a strictly longer match
    /// replaces the best, so equal-length candidates resolve to the
    /// smallest distance.
    fn find_match(&self, pos: usize, max_len: usize) -> Option<(u16, u16)> {
        if pos < MIN_MATCH || max_len < self.min_match {
            return None;
        }

        let h = Self::hash(self.window[pos], self.window[pos + 1], self.window[pos + 2]);

        let mut match_pos = self.hash_table[h] as usize;
        let mut best_len = self.min_match - 1;
        let mut best_dist = 0usize;

        let min_pos = pos.saturating_sub(WINDOW_SIZE);
        let mut chain_len = 0;
        let max_check = max_len.min(MAX_MATCH);

        while match_pos >= min_pos && match_pos < pos && chain_len < self.max_chain {
            let dist = pos - match_pos;

            if dist <= WINDOW_SIZE {
                // Cheap rejection: a longer match must extend past the
                // current best, so compare that byte first.
                if self.window[match_pos + best_len] == self.window[pos + best_len]
                    && self.window[match_pos] == self.window[pos]
                {
                    let mut len = 1;
                    while len < max_check
                        && self.window[match_pos + len] == self.window[pos + len]
                    {
                        len += 1;
                    }

                    if len > best_len {
                        best_len = len;
                        best_dist = dist;

                        if len >= max_check {
                            break;
                        }
                    }
                }
            }

            match_pos = self.hash_chain[match_pos & (WINDOW_SIZE - 1)] as usize;
            chain_len += 1;
        }

        if best_len >= self.min_match {
            Some((best_len as u16, best_dist as u16))
        } else {
            None
        }
    }

    /// Compress input data to LZ77 tokens.
    pub fn compress(&mut self, input: &[u8]) -> Vec<Lz77Token> {
        let mut tokens = Vec::with_capacity(input.len() / 2 + 16);
        let mut input_pos = 0;

        while input_pos < input.len() {
            let space_in_window = self.window.len() - self.window_pos;
            let chunk_size = space_in_window.min(input.len() - input_pos);

            let start = self.window_pos;
            self.window[start..start + chunk_size]
                .copy_from_slice(&input[input_pos..input_pos + chunk_size]);

            let end = start + chunk_size;
            let mut pos = start;

            while pos < end {
                let remaining = end - pos;

                if let Some((length, distance)) = self.find_match(pos, remaining) {
                    let mut use_match = true;

                    if self.lazy_match && pos + 1 < end {
                        // Emit a literal instead when the next position
                        // holds a clearly better match.
                        self.update_hash(pos);
                        if let Some((next_len, _)) = self.find_match(pos + 1, remaining - 1) {
                            if next_len > length + 1 {
                                use_match = false;
                            }
                        }
                    }

                    if use_match {
                        tokens.push(Lz77Token::Match { length, distance });

                        for i in 0..length as usize {
                            self.update_hash(pos + i);
                        }

                        pos += length as usize;
                        continue;
                    }
                }

                tokens.push(Lz77Token::Literal(self.window[pos]));
                self.update_hash(pos);
                pos += 1;
            }

            self.window_pos = end;
            input_pos += chunk_size;

            if self.window_pos >= WINDOW_SIZE + WINDOW_SIZE / 2 {
                self.slide_window();
            }
        }

        tokens
    }

    /// Slide the window down by 32 KiB to make room for more data.
    fn slide_window(&mut self) {
        let slide_amount = WINDOW_SIZE;

        self.window.copy_within(slide_amount..self.window_pos, 0);
        self.window_pos -= slide_amount;

        for entry in &mut self.hash_table {
            *entry = entry.saturating_sub(slide_amount as u16);
        }
        for entry in &mut self.hash_chain {
            *entry = entry.saturating_sub(slide_amount as u16);
        }
    }

    /// Compress all data at once (convenience method).
    pub fn compress_all(input: &[u8], level: u8) -> Vec<Lz77Token> {
        let mut encoder = Self::with_level(level);
        encoder.compress(input)
    }
}

impl Default for Lz77Encoder {
    fn default() -> Self {
        Self::new()
    }
}
