//! Running checksum of message chunk values and its re-emission as chunks.

use core::{iter::FusedIterator, slice};

use crate::types::{chunk_mask, Chunk, ChunkKind};

/// Sum of message chunk values, bounded by `checksum_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumEncoder {
    sum: u64,
    max: u64,
}

impl ChecksumEncoder {
    #[must_use]
    pub const fn new(checksum_max: u64) -> Self {
        Self { sum: 0, max: checksum_max }
    }

    /// Add one message chunk value. The total must stay within `checksum_max`.
    #[inline]
    pub fn accumulate(&mut self, value: u32) {
        self.sum += u64::from(value);
        debug_assert!(self.sum <= self.max, "checksum {} exceeds bound {}", self.sum, self.max);
    }

    #[must_use]
    pub const fn sum(&self) -> u64 {
        self.sum
    }

    #[must_use]
    pub const fn max(&self) -> u64 {
        self.max
    }

    /// Emit `width`-bit chunks until the shifted `checksum_max` reaches zero.
    /// Nothing is emitted when `checksum_max` is zero.
    #[must_use]
    pub fn into_fixed(self, width: u8) -> ChecksumChunks<'static> {
        ChecksumChunks { sum: self.sum, max: self.max, schedule: Schedule::Fixed(u32::from(width)) }
    }

    /// Emit one chunk per entry of `widths`, stopping early at a zero width.
    /// Every width is emitted even after the checksum is exhausted.
    #[must_use]
    pub fn into_explicit(self, widths: &[u8]) -> ChecksumChunks<'_> {
        ChecksumChunks { sum: self.sum, max: self.max, schedule: Schedule::Explicit(widths.iter()) }
    }
}

#[derive(Debug, Clone)]
enum Schedule<'w> {
    Fixed(u32),
    Explicit(slice::Iter<'w, u8>),
}

/// Checksum chunks in emission order, least-significant first.
#[derive(Debug, Clone)]
pub struct ChecksumChunks<'w> {
    sum: u64,
    max: u64,
    schedule: Schedule<'w>,
}

impl Iterator for ChecksumChunks<'_> {
    type Item = Chunk;

    #[allow(clippy::cast_possible_truncation)]
    fn next(&mut self) -> Option<Chunk> {
        let width = match &mut self.schedule {
            Schedule::Fixed(width) => {
                if *width == 0 || self.max == 0 {
                    return None;
                }
                *width
            }
            Schedule::Explicit(widths) => match widths.next() {
                Some(&width) if width != 0 => u32::from(width),
                _ => {
                    *widths = slice::Iter::default();
                    return None;
                }
            },
        };
        let mask = u64::from(chunk_mask(width));
        // sum <= max, so the unclamped extraction never exceeds the clamped bound
        let chunk = Chunk {
            kind: ChunkKind::Checksum,
            value: (self.sum & mask) as u32,
            max: mask.min(self.max) as u32,
        };
        self.sum >>= width;
        self.max >>= width;
        Some(chunk)
    }
}

impl FusedIterator for ChecksumChunks<'_> {}
