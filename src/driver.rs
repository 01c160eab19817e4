use tracing::{trace, warn};

use crate::{
    errors::WinternitzError,
    types::{Chunk, Mode},
};

/// The external hash / key-derivation step, applied once per chunk.
///
/// `steps` is the number of hash applications owed for the chunk at the
/// current position; the implementor tracks which chain that is. When
/// signing it walks from the secret toward the public value, when verifying
/// it continues from the signature element.
pub trait ChunkHasher<S> {
    type Error;

    /// # Errors
    ///
    /// Any implementor-defined failure; it aborts the whole pass.
    fn hash(&mut self, state: S, steps: u32) -> Result<S, Self::Error>;
}

impl<S, E, F> ChunkHasher<S> for F
where
    F: FnMut(S, u32) -> Result<S, E>,
{
    type Error = E;

    #[inline]
    fn hash(&mut self, state: S, steps: u32) -> Result<S, E> {
        self(state, steps)
    }
}

/// Threads caller state through one hasher call per chunk, in order.
#[derive(Debug)]
pub struct CallbackDriver<H> {
    hasher: H,
    mode: Mode,
    index: usize,
}

impl<H> CallbackDriver<H> {
    #[must_use]
    pub const fn new(hasher: H, mode: Mode) -> Self {
        Self { hasher, mode, index: 0 }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Successful callback invocations so far.
    #[must_use]
    pub const fn invocations(&self) -> usize {
        self.index
    }

    /// Hash one chunk.
    ///
    /// # Errors
    ///
    /// `WinternitzError::Callback` with this chunk's index when the hasher fails.
    pub fn feed<S>(&mut self, state: S, chunk: Chunk) -> Result<S, WinternitzError<H::Error>>
    where
        H: ChunkHasher<S>,
    {
        let steps = chunk.steps(self.mode);
        trace!(
            index = self.index,
            kind = ?chunk.kind,
            value = chunk.value,
            max = chunk.max,
            steps,
            "hash chunk"
        );
        match self.hasher.hash(state, steps) {
            Ok(next) => {
                self.index += 1;
                Ok(next)
            }
            Err(error) => {
                warn!(index = self.index, kind = ?chunk.kind, "hash callback failed");
                Err(WinternitzError::Callback { index: self.index, kind: chunk.kind, error })
            }
        }
    }

    /// Hash every chunk of `chunks`, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// See [`CallbackDriver::feed`].
    pub fn drive<S, I>(&mut self, state: S, chunks: I) -> Result<S, WinternitzError<H::Error>>
    where
        H: ChunkHasher<S>,
        I: IntoIterator<Item = Chunk>,
    {
        chunks.into_iter().try_fold(state, |state, chunk| self.feed(state, chunk))
    }

    #[must_use]
    pub fn into_hasher(self) -> H {
        self.hasher
    }
}
