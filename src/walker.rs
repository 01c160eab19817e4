//! Left-to-right chunk extraction over a little-endian word buffer.
//!
//! Bit `i` of the message is bit `i % 32` of word `i / 32`. Chunks are read
//! least-significant bits first; a chunk straddling two words takes its low
//! bits from the end of the first word and its high bits from the start of
//! the next.

use core::{iter::FusedIterator, slice};

use crate::{
    errors::ConfigError,
    params::Params,
    types::{chunk_mask, Word, WORD_BITS},
};

/// Leftover bits of a partially consumed word.
///
/// `residue` holds exactly `residue_bits` significant bits and
/// `residue_bits < WORD_BITS` holds between extractions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitCursor {
    residue: u64,
    residue_bits: u32,
}

#[allow(clippy::cast_possible_truncation)]
impl BitCursor {
    #[must_use]
    pub const fn new() -> Self {
        Self { residue: 0, residue_bits: 0 }
    }

    #[must_use]
    pub const fn residue_bits(&self) -> u32 {
        self.residue_bits
    }

    /// Extract the next `chunk_bits`-wide value, loading words from `words`
    /// only when the residue runs short. `None` once `words` is exhausted, or
    /// for a width outside `1..=32`.
    pub fn take(&mut self, chunk_bits: u32, words: &mut slice::Iter<'_, Word>) -> Option<u32> {
        if !(1..=WORD_BITS).contains(&chunk_bits) {
            return None;
        }
        if chunk_bits == 1 {
            return self.take_bit(words);
        }
        let mask = u64::from(chunk_mask(chunk_bits));
        if self.residue_bits >= chunk_bits {
            let value = self.residue & mask;
            self.residue >>= chunk_bits;
            self.residue_bits -= chunk_bits;
            Some(value as u32)
        } else if self.residue_bits == 0 {
            let word = u64::from(*words.next()?);
            self.residue = word >> chunk_bits;
            self.residue_bits = WORD_BITS - chunk_bits;
            Some((word & mask) as u32)
        } else {
            // splice: residue is the low part, the next word supplies the rest
            let low_bits = self.residue_bits;
            let high_bits = chunk_bits - low_bits;
            let word = u64::from(*words.next()?);
            let value = self.residue | ((word & u64::from(chunk_mask(high_bits))) << low_bits);
            self.residue = word >> high_bits;
            self.residue_bits = WORD_BITS - high_bits;
            Some(value as u32)
        }
    }

    fn take_bit(&mut self, words: &mut slice::Iter<'_, Word>) -> Option<u32> {
        if self.residue_bits > 0 {
            let bit = self.residue & 1;
            self.residue >>= 1;
            self.residue_bits -= 1;
            Some(bit as u32)
        } else {
            let word = *words.next()?;
            self.residue = u64::from(word >> 1);
            self.residue_bits = WORD_BITS - 1;
            Some(word & 1)
        }
    }
}

/// Iterator over the message chunk values, in extraction order.
#[derive(Debug, Clone)]
pub struct ChunkWalker<'a> {
    words: slice::Iter<'a, Word>,
    cursor: BitCursor,
    chunk_bits: u32,
    remaining: usize,
}

impl<'a> ChunkWalker<'a> {
    /// Walk the first `total_bits` bits of `msg` in `chunk_bits`-wide chunks.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `chunk_bits` is zero or wider than a word,
    /// `total_bits` is not a multiple of it, or `msg` is too short.
    pub fn new(msg: &'a [Word], total_bits: usize, chunk_bits: u8) -> Result<Self, ConfigError> {
        let params = Params::fixed_checksum_width(total_bits, chunk_bits);
        params.gate(msg)?;
        Ok(Self::from_params(msg, &params))
    }

    /// Caller has already passed `params` through the entry gate for `msg`.
    pub(crate) fn from_params(msg: &'a [Word], params: &Params) -> Self {
        Self {
            words: msg.iter(),
            cursor: BitCursor::new(),
            chunk_bits: u32::from(params.chunk_width()),
            remaining: params.message_chunks(),
        }
    }

    #[must_use]
    pub const fn cursor(&self) -> BitCursor {
        self.cursor
    }
}

impl Iterator for ChunkWalker<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let value = self.cursor.take(self.chunk_bits, &mut self.words);
        if value.is_none() {
            self.remaining = 0;
        }
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ChunkWalker<'_> {}
impl FusedIterator for ChunkWalker<'_> {}
