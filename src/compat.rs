//! Sentinel-style entry points.
//!
//! Same passes as [`crate::scheme`], with the flat calling convention of
//! C-style one-time signature libraries: a `bool` sign flag, a callback that
//! returns `None` on failure, zero-terminated checksum widths, and `None` as
//! the single failure result for both bad configuration and callback errors.
//! The callback's `None` aborts the pass.

use crate::{scheme, types::{Mode, Word}};

/// `checksum_bits` is read up to its first zero; a slice without a zero is read to the end.
#[must_use]
pub fn winternitz<S, F>(
    sign: bool,
    state: S,
    mut hash: F,
    msg: &[Word],
    bits: usize,
    chunk_bits: u8,
    checksum_bits: &[u8],
) -> Option<S>
where
    F: FnMut(S, u32) -> Option<S>,
{
    let end = checksum_bits.iter().position(|&w| w == 0).unwrap_or(checksum_bits.len());
    let hasher = |s: S, n: u32| hash(s, n).ok_or(());
    let widths = &checksum_bits[..end];
    scheme::winternitz(Mode::from(sign), state, hasher, msg, bits, chunk_bits, widths).ok()
}

#[must_use]
pub fn winternitz_fixed_checksum_width<S, F>(
    sign: bool,
    state: S,
    mut hash: F,
    msg: &[Word],
    bits: usize,
    chunk_bits: u8,
) -> Option<S>
where
    F: FnMut(S, u32) -> Option<S>,
{
    let hasher = |s: S, n: u32| hash(s, n).ok_or(());
    let mode = Mode::from(sign);
    scheme::winternitz_fixed_checksum_width(mode, state, hasher, msg, bits, chunk_bits).ok()
}

#[must_use]
pub fn merkle_lamport<S, F>(
    sign: bool,
    state: S,
    mut hash: F,
    msg: &[Word],
    bits: usize,
) -> Option<S>
where
    F: FnMut(S, u32) -> Option<S>,
{
    let hasher = |s: S, n: u32| hash(s, n).ok_or(());
    scheme::merkle_lamport(Mode::from(sign), state, hasher, msg, bits).ok()
}
