use crate::{
    errors::ConfigError,
    types::{chunk_mask, Word, MAX_CHUNK_BITS, WORD_BITS},
};

/// How the checksum is cut into chunks after the message chunks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChecksumPolicy {
    /// Merkle-Lamport: 1-bit message chunks and 1-bit checksum chunks.
    SingleBit,
    /// Checksum chunks reuse the message chunk width until the checksum maximum is exhausted.
    FixedWidth,
    /// One checksum chunk per listed width, in order. Widths must be non-zero.
    ExplicitWidths(Vec<u8>),
}

/// Configuration of one signing or verification pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Params {
    /// Message length in bits, read from the start of the word buffer.
    pub total_bits: usize,
    /// Message chunk width. Ignored (treated as 1) under [`ChecksumPolicy::SingleBit`].
    pub chunk_bits: u8,
    pub checksum: ChecksumPolicy,
}

impl Params {
    /// General Winternitz with an explicit checksum width schedule.
    #[must_use]
    pub fn winternitz(
        total_bits: usize,
        chunk_bits: u8,
        checksum_widths: impl Into<Vec<u8>>,
    ) -> Self {
        let checksum = ChecksumPolicy::ExplicitWidths(checksum_widths.into());
        Self { total_bits, chunk_bits, checksum }
    }

    /// Winternitz whose checksum chunks have the message chunk width.
    #[must_use]
    pub const fn fixed_checksum_width(total_bits: usize, chunk_bits: u8) -> Self {
        Self { total_bits, chunk_bits, checksum: ChecksumPolicy::FixedWidth }
    }

    #[must_use]
    pub const fn merkle_lamport(total_bits: usize) -> Self {
        Self { total_bits, chunk_bits: 1, checksum: ChecksumPolicy::SingleBit }
    }

    /// Explicit schedule of `chunk_bits`-wide checksum chunks, the last one narrowed
    /// to exactly the bits `checksum_max` still needs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `(total_bits, chunk_bits)` is itself invalid.
    pub fn minimal_checksum_widths(total_bits: usize, chunk_bits: u8) -> Result<Self, ConfigError> {
        let fixed = Self::fixed_checksum_width(total_bits, chunk_bits);
        fixed.validate()?;
        let mut remaining = bit_length(fixed.checksum_max()?);
        let mut widths = Vec::new();
        while remaining > 0 {
            let w = u8::try_from(remaining).map_or(chunk_bits, |r| r.min(chunk_bits));
            widths.push(w);
            remaining -= u32::from(w);
        }
        Ok(Self::winternitz(total_bits, chunk_bits, widths))
    }

    /// Effective message chunk width.
    #[must_use]
    pub const fn chunk_width(&self) -> u8 {
        match self.checksum {
            ChecksumPolicy::SingleBit => 1,
            _ => self.chunk_bits,
        }
    }

    /// Largest message chunk value, `2^chunk_bits - 1`.
    #[must_use]
    pub fn chunk_max(&self) -> u32 {
        chunk_mask(u32::from(self.chunk_width().min(MAX_CHUNK_BITS)))
    }

    #[must_use]
    pub fn message_chunks(&self) -> usize {
        match self.chunk_width() {
            0 => 0,
            w => self.total_bits / usize::from(w),
        }
    }

    /// Upper bound of the checksum: `chunk_max * message_chunks`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ChecksumOverflow` if the bound does not fit `u64`.
    pub fn checksum_max(&self) -> Result<u64, ConfigError> {
        let overflow = ConfigError::ChecksumOverflow {
            total_bits: self.total_bits,
            chunk_bits: self.chunk_width(),
        };
        let chunks = u64::try_from(self.message_chunks()).map_err(|_| overflow)?;
        u64::from(self.chunk_max()).checked_mul(chunks).ok_or(overflow)
    }

    /// Number of checksum chunks the pass emits.
    ///
    /// # Errors
    ///
    /// Propagates [`Params::checksum_max`] failures.
    pub fn checksum_chunks(&self) -> Result<usize, ConfigError> {
        match &self.checksum {
            ChecksumPolicy::ExplicitWidths(widths) => Ok(widths.len()),
            ChecksumPolicy::SingleBit | ChecksumPolicy::FixedWidth => {
                let width = u32::from(self.chunk_width());
                if width == 0 {
                    return Ok(0);
                }
                let bits = bit_length(self.checksum_max()?);
                Ok(bits.div_ceil(width) as usize)
            }
        }
    }

    /// Message plus checksum chunks, i.e. the number of hash chains a key needs.
    ///
    /// # Errors
    ///
    /// Propagates [`Params::checksum_max`] failures.
    pub fn total_chunks(&self) -> Result<usize, ConfigError> {
        Ok(self.message_chunks() + self.checksum_chunks()?)
    }

    /// Entry gate: every check that does not depend on the message buffer.
    ///
    /// # Errors
    ///
    /// Returns the first failing `ConfigError`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checked_checksum_max().map(|_| ())
    }

    /// Full entry gate including the buffer length; yields `checksum_max`.
    pub(crate) fn gate(&self, msg: &[Word]) -> Result<u64, ConfigError> {
        let checksum_max = self.checked_checksum_max()?;
        let available_bits = msg.len().saturating_mul(WORD_BITS as usize);
        if self.total_bits > available_bits {
            let total_bits = self.total_bits;
            return Err(ConfigError::MessageTooShort { total_bits, available_bits });
        }
        Ok(checksum_max)
    }

    fn checked_checksum_max(&self) -> Result<u64, ConfigError> {
        let chunk_bits = self.chunk_width();
        if chunk_bits == 0 {
            return Err(ConfigError::ZeroChunkWidth);
        }
        if u32::from(chunk_bits) > WORD_BITS {
            return Err(ConfigError::ChunkTooWide { chunk_bits, word_bits: WORD_BITS });
        }
        if !self.total_bits.is_multiple_of(usize::from(chunk_bits)) {
            return Err(ConfigError::MisalignedLength { total_bits: self.total_bits, chunk_bits });
        }
        let checksum_max = self.checksum_max()?;
        if let ChecksumPolicy::ExplicitWidths(widths) = &self.checksum {
            let mut available_bits = 0u32;
            for (position, &width) in widths.iter().enumerate() {
                if width == 0 {
                    return Err(ConfigError::ZeroChecksumWidth { position });
                }
                if width > MAX_CHUNK_BITS {
                    return Err(ConfigError::ChecksumWidthTooWide {
                        position,
                        width,
                        word_bits: WORD_BITS,
                    });
                }
                available_bits = available_bits.saturating_add(u32::from(width));
            }
            if checksum_max > capacity(available_bits) {
                return Err(ConfigError::InsufficientChecksumWidth { checksum_max, available_bits });
            }
        }
        Ok(checksum_max)
    }
}

/// Largest value representable in `bits` bits, saturating at `u64::MAX`.
const fn capacity(bits: u32) -> u64 {
    if bits >= u64::BITS { u64::MAX } else { (1u64 << bits) - 1 }
}

const fn bit_length(x: u64) -> u32 {
    u64::BITS - x.leading_zeros()
}
