/// Input word type. Messages are packed little-endian into a slice of these.
pub type Word = u32;

/// Bit width of one input [`Word`].
pub const WORD_BITS: u32 = Word::BITS;

/// Widest chunk the engine accepts, for message and checksum chunks alike.
pub const MAX_CHUNK_BITS: u8 = 32;

/// Mask selecting the low `bits` bits of a word, saturating at a full word.
#[inline]
#[must_use]
pub const fn chunk_mask(bits: u32) -> u32 {
    if bits >= WORD_BITS { Word::MAX } else { (1 << bits) - 1 }
}

/// Whether the callback is driven for signing or for verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Callback receives `chunk_max - value`: forward hash steps still owed.
    Sign,
    /// Callback receives `value`: hash steps already consumed by the signer.
    Verify,
}

impl Mode {
    #[must_use]
    pub const fn is_sign(self) -> bool {
        matches!(self, Self::Sign)
    }
}

impl From<bool> for Mode {
    fn from(sign: bool) -> Self {
        if sign { Self::Sign } else { Self::Verify }
    }
}

/// Where a chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    Message,
    Checksum,
}

/// One chunk as handed to the callback driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk {
    pub kind: ChunkKind,
    /// Extracted value, always `<= max`.
    pub value: u32,
    /// Largest value this chunk position can take.
    pub max: u32,
}

impl Chunk {
    /// Callback argument for this chunk under `mode`.
    #[inline]
    #[must_use]
    pub const fn steps(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Sign => self.max - self.value,
            Mode::Verify => self.value,
        }
    }
}
