#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! Winternitz Engine - chunk extraction and checksum driving for hash-based
//! one-time signatures.
//!
//! This crate turns a little-endian, word-packed message into the ordered
//! chunk values that Lamport, Merkle-Lamport and Winternitz signatures sign,
//! appends the checksum chunks, and feeds each value to a caller-supplied
//! hash callback exactly once, in order.

// Fixed choices:
// - Input words: u32, little-endian bit order (bit 0 of word 0 comes first)
// - Message chunk width: 1..=32 bits, must divide the message length
// - Checksum: plain sum of message chunk values, emitted least-significant first
// - Callback argument: chunk_max - value when signing, value when verifying
//
// The engine never hashes, never stores keys, and never buffers chunks
// between extraction and the callback.

pub mod types;
pub mod errors;
pub mod params;
pub mod walker;
pub mod checksum;
pub mod driver;
pub mod scheme;
pub mod compat;

pub use types::*;
pub use errors::{ConfigError, WinternitzError};
pub use params::{ChecksumPolicy, Params};
pub use walker::{BitCursor, ChunkWalker};
pub use checksum::{ChecksumChunks, ChecksumEncoder};
pub use driver::{CallbackDriver, ChunkHasher};
pub use scheme::{
    chunk_schedule, merkle_lamport, run, winternitz, winternitz_fixed_checksum_width, ChunkStream,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
