//! The three signing variants and the single pass they share.
//!
//! Message chunks flow from the walker straight into the callback driver and
//! are summed on the way; once the message is exhausted the checksum is cut
//! into chunks by the configured policy and driven the same way. Nothing is
//! buffered between extraction and the callback.

use tracing::{debug, warn};

use crate::{
    checksum::{ChecksumChunks, ChecksumEncoder},
    driver::{CallbackDriver, ChunkHasher},
    errors::{ConfigError, WinternitzError},
    params::{ChecksumPolicy, Params},
    types::{Chunk, ChunkKind, Mode, Word},
    walker::ChunkWalker,
};

/// Lazy stream of every chunk of a pass: message chunks, then checksum chunks.
#[derive(Debug, Clone)]
pub struct ChunkStream<'a> {
    walker: ChunkWalker<'a>,
    chunk_max: u32,
    encoder: ChecksumEncoder,
    params: &'a Params,
    checksum: Option<ChecksumChunks<'a>>,
}

impl<'a> ChunkStream<'a> {
    /// # Errors
    ///
    /// Returns `ConfigError` if `params` fails the entry gate for `msg`.
    pub fn new(msg: &'a [Word], params: &'a Params) -> Result<Self, ConfigError> {
        let checksum_max = params.gate(msg)?;
        Ok(Self {
            walker: ChunkWalker::from_params(msg, params),
            chunk_max: params.chunk_max(),
            encoder: ChecksumEncoder::new(checksum_max),
            params,
            checksum: None,
        })
    }

    /// Checksum accumulated so far.
    #[must_use]
    pub const fn checksum(&self) -> u64 {
        self.encoder.sum()
    }
}

impl Iterator for ChunkStream<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.checksum.is_none() {
            if let Some(value) = self.walker.next() {
                self.encoder.accumulate(value);
                return Some(Chunk { kind: ChunkKind::Message, value, max: self.chunk_max });
            }
            let params = self.params;
            self.checksum = Some(match &params.checksum {
                ChecksumPolicy::SingleBit => self.encoder.into_fixed(1),
                ChecksumPolicy::FixedWidth => self.encoder.into_fixed(params.chunk_bits),
                ChecksumPolicy::ExplicitWidths(widths) => self.encoder.into_explicit(widths),
            });
        }
        self.checksum.as_mut().and_then(Iterator::next)
    }
}

/// Drive `hasher` over every chunk of `msg` under `params`.
///
/// Returns the state produced by the last callback.
///
/// # Errors
///
/// `WinternitzError::Config` before any callback runs if `params` is invalid
/// for `msg`; `WinternitzError::Callback` as soon as the hasher fails.
pub fn run<S, H>(
    mode: Mode,
    state: S,
    hasher: H,
    msg: &[Word],
    params: &Params,
) -> Result<S, WinternitzError<H::Error>>
where
    H: ChunkHasher<S>,
{
    let stream = ChunkStream::new(msg, params)
        .inspect_err(|err| warn!(error = %err, "rejected configuration"))?;
    debug!(
        ?mode,
        policy = ?params.checksum,
        total_bits = params.total_bits,
        chunk_bits = params.chunk_width(),
        message_chunks = params.message_chunks(),
        "starting pass"
    );
    let mut driver = CallbackDriver::new(hasher, mode);
    let state = driver.drive(state, stream)?;
    debug!(invocations = driver.invocations(), "pass complete");
    Ok(state)
}

/// General Winternitz: `chunk_bits`-wide message chunks, then one checksum
/// chunk per entry of `checksum_widths`.
///
/// # Errors
///
/// See [`run`]. Also rejects zero entries and widths that cannot hold the
/// maximum checksum.
pub fn winternitz<S, H>(
    mode: Mode,
    state: S,
    hasher: H,
    msg: &[Word],
    total_bits: usize,
    chunk_bits: u8,
    checksum_widths: &[u8],
) -> Result<S, WinternitzError<H::Error>>
where
    H: ChunkHasher<S>,
{
    run(mode, state, hasher, msg, &Params::winternitz(total_bits, chunk_bits, checksum_widths))
}

/// Winternitz with checksum chunks as wide as message chunks.
///
/// # Errors
///
/// See [`run`].
pub fn winternitz_fixed_checksum_width<S, H>(
    mode: Mode,
    state: S,
    hasher: H,
    msg: &[Word],
    total_bits: usize,
    chunk_bits: u8,
) -> Result<S, WinternitzError<H::Error>>
where
    H: ChunkHasher<S>,
{
    run(mode, state, hasher, msg, &Params::fixed_checksum_width(total_bits, chunk_bits))
}

/// Merkle-Lamport: one chunk per message bit, binary checksum.
///
/// # Errors
///
/// See [`run`]. Only a short buffer can fail validation.
pub fn merkle_lamport<S, H>(
    mode: Mode,
    state: S,
    hasher: H,
    msg: &[Word],
    total_bits: usize,
) -> Result<S, WinternitzError<H::Error>>
where
    H: ChunkHasher<S>,
{
    run(mode, state, hasher, msg, &Params::merkle_lamport(total_bits))
}

/// Every chunk a pass over `msg` would hash, without calling anything.
///
/// # Errors
///
/// Returns `ConfigError` if `params` fails the entry gate for `msg`.
pub fn chunk_schedule(msg: &[Word], params: &Params) -> Result<Vec<Chunk>, ConfigError> {
    Ok(ChunkStream::new(msg, params)?.collect())
}
