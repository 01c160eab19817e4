use thiserror::Error;

use crate::types::ChunkKind;

/// Rejected configuration. Raised before any callback invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("chunk width must be at least one bit")]
    ZeroChunkWidth,

    #[error("chunk width {chunk_bits} exceeds the {word_bits}-bit input word")]
    ChunkTooWide { chunk_bits: u8, word_bits: u32 },

    #[error("message length {total_bits} is not a multiple of chunk width {chunk_bits}")]
    MisalignedLength { total_bits: usize, chunk_bits: u8 },

    #[error("message needs {total_bits} bits but the buffer holds {available_bits}")]
    MessageTooShort { total_bits: usize, available_bits: usize },

    #[error("checksum width at position {position} is zero")]
    ZeroChecksumWidth { position: usize },

    #[error("checksum width {width} at position {position} exceeds {word_bits} bits")]
    ChecksumWidthTooWide { position: usize, width: u8, word_bits: u32 },

    #[error("checksum maximum {checksum_max} does not fit in {available_bits} checksum bits")]
    InsufficientChecksumWidth { checksum_max: u64, available_bits: u32 },

    #[error("checksum of {total_bits} bits in {chunk_bits}-bit chunks overflows 64 bits")]
    ChecksumOverflow { total_bits: usize, chunk_bits: u8 },
}

/// Failure of a whole signing or verification pass.
#[derive(Debug, Error)]
pub enum WinternitzError<E> {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("hash callback failed on {kind:?} chunk {index}: {error}")]
    Callback { index: usize, kind: ChunkKind, error: E },
}

impl<E> WinternitzError<E> {
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Index of the chunk whose callback failed, if any.
    #[must_use]
    pub const fn failed_index(&self) -> Option<usize> {
        match self {
            Self::Config(_) => None,
            Self::Callback { index, .. } => Some(*index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_messages_carry_parameters() {
        let err = ConfigError::MisalignedLength { total_bits: 10, chunk_bits: 4 };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains('4'));

        let err = ConfigError::InsufficientChecksumWidth { checksum_max: 120, available_bits: 4 };
        assert!(err.to_string().contains("120"));
    }

    #[test]
    fn callback_error_wraps_source_message() {
        let err: WinternitzError<&str> =
            WinternitzError::Callback { index: 3, kind: ChunkKind::Checksum, error: "disk gone" };
        let msg = err.to_string();
        assert!(msg.contains("Checksum"));
        assert!(msg.contains("disk gone"));
        assert_eq!(err.failed_index(), Some(3));
        assert!(!err.is_config());
    }

    #[test]
    fn config_converts_into_run_error() {
        let err: WinternitzError<core::convert::Infallible> = ConfigError::ZeroChunkWidth.into();
        assert!(err.is_config());
        assert_eq!(err.failed_index(), None);
    }
}
