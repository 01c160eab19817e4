//! Property-based tests for the chunk engine

use proptest::prelude::*;
use winternitz_engine::*;

/// Chunk width, chunk count and a word buffer exactly long enough.
fn message() -> impl Strategy<Value = (u8, usize, Vec<u32>)> {
    (1u8..=32, 0usize..48).prop_flat_map(|(chunk_bits, chunks)| {
        let words = (chunks * usize::from(chunk_bits)).div_ceil(32);
        (Just(chunk_bits), Just(chunks), prop::collection::vec(any::<u32>(), words))
    })
}

fn message_bit(words: &[u32], pos: usize) -> u32 {
    (words[pos / 32] >> (pos % 32)) & 1
}

fn record(acc: Vec<u32>, n: u32) -> Result<Vec<u32>, ()> {
    let mut acc = acc;
    acc.push(n);
    Ok(acc)
}

// Property test: walker emits the right number of in-range values
proptest! {
    #[test]
    fn walker_count_and_range((chunk_bits, chunks, words) in message()) {
        let total_bits = chunks * usize::from(chunk_bits);
        let values: Vec<u32> = ChunkWalker::new(&words, total_bits, chunk_bits).unwrap().collect();
        prop_assert_eq!(values.len(), chunks);
        let max = chunk_mask(u32::from(chunk_bits));
        prop_assert!(values.iter().all(|&v| v <= max));
    }
}

// Property test: chunk bits reassemble into the little-endian message bits
proptest! {
    #[test]
    fn walker_reassembles_message((chunk_bits, chunks, words) in message()) {
        let width = usize::from(chunk_bits);
        let walker = ChunkWalker::new(&words, chunks * width, chunk_bits).unwrap();
        for (i, v) in walker.enumerate() {
            for j in 0..width {
                let expected = message_bit(&words, i * width + j);
                prop_assert_eq!((v >> j) & 1, expected, "chunk {} bit {}", i, j);
            }
        }
    }
}

// Property test: checksum stays in bound and its chunks rebuild it
proptest! {
    #[test]
    fn checksum_chunks_rebuild_sum(
        (chunk_bits, chunks, words) in message(),
        explicit in any::<bool>(),
    ) {
        let total_bits = chunks * usize::from(chunk_bits);
        let params = if explicit {
            Params::minimal_checksum_widths(total_bits, chunk_bits).unwrap()
        } else {
            Params::fixed_checksum_width(total_bits, chunk_bits)
        };
        let schedule = chunk_schedule(&words, &params).unwrap();
        let (message, checksum): (Vec<Chunk>, Vec<Chunk>) =
            schedule.iter().copied().partition(|c| c.kind == ChunkKind::Message);

        let sum: u64 = message.iter().map(|c| u64::from(c.value)).sum();
        prop_assert!(sum <= params.checksum_max().unwrap());
        prop_assert_eq!(schedule.len(), params.total_chunks().unwrap());

        let widths: Vec<u32> = match &params.checksum {
            ChecksumPolicy::ExplicitWidths(w) => w.iter().map(|&w| u32::from(w)).collect(),
            _ => vec![u32::from(chunk_bits); checksum.len()],
        };
        let mut rebuilt = 0u64;
        let mut shift = 0u32;
        for (c, w) in checksum.iter().zip(&widths) {
            prop_assert!(c.value <= c.max);
            rebuilt |= u64::from(c.value) << shift;
            shift += w;
        }
        prop_assert_eq!(rebuilt, sum);
    }
}

// Property test: signing then verifying with a counting hash reaches the public key
proptest! {
    #[test]
    fn sign_verify_counting_round_trip((chunk_bits, chunks, words) in message()) {
        let params = Params::fixed_checksum_width(chunks * usize::from(chunk_bits), chunk_bits);
        // a chain position stands in for a hash value; secrets sit at position 0
        let signature = run(Mode::Sign, Vec::new(), record, &words, &params).unwrap();
        let walk_chain = |mut acc: Vec<u64>, n: u32| -> Result<Vec<u64>, ()> {
            let start = u64::from(signature[acc.len()]);
            acc.push(start + u64::from(n));
            Ok(acc)
        };
        let verified = run(Mode::Verify, Vec::new(), walk_chain, &words, &params).unwrap();
        let schedule = chunk_schedule(&words, &params).unwrap();
        let public: Vec<u64> = schedule.iter().map(|c| u64::from(c.max)).collect();
        prop_assert_eq!(verified, public);
    }
}

// Property test: sentinel shims agree with the typed entry points
proptest! {
    #[test]
    fn compat_matches_typed((chunk_bits, chunks, words) in message(), sign in any::<bool>()) {
        let bits = chunks * usize::from(chunk_bits);
        let mode = Mode::from(sign);
        let width = chunk_bits;
        let typed = winternitz_fixed_checksum_width(mode, Vec::new(), record, &words, bits, width);
        let sentinel = |acc: Vec<u32>, n: u32| record(acc, n).ok();
        let shim =
            compat::winternitz_fixed_checksum_width(sign, vec![], sentinel, &words, bits, width);
        prop_assert_eq!(typed.ok(), shim);
    }
}

// Property test: a failing callback is never called again
proptest! {
    #[test]
    fn failure_halts_pass((chunk_bits, chunks, words) in message(), fail_at in 1usize..8) {
        let params = Params::fixed_checksum_width(chunks * usize::from(chunk_bits), chunk_bits);
        let total = params.total_chunks().unwrap();
        let mut calls = 0usize;
        let hasher = |(): (), _n: u32| {
            calls += 1;
            if calls == fail_at { Err(calls) } else { Ok(()) }
        };
        let result = run(Mode::Sign, (), hasher, &words, &params);
        if fail_at <= total {
            let err = result.unwrap_err();
            prop_assert_eq!(err.failed_index(), Some(fail_at - 1));
            prop_assert_eq!(calls, fail_at);
        } else {
            prop_assert!(result.is_ok());
            prop_assert_eq!(calls, total);
        }
    }
}

#[test]
fn third_invocation_failure_stops_everything() {
    let mut calls = 0;
    let hasher = |s: u32, _n: u32| {
        calls += 1;
        if calls == 3 { Err("refused") } else { Ok(s + 1) }
    };
    let out = merkle_lamport(Mode::Sign, 0u32, hasher, &[u32::MAX; 2], 64);
    assert!(matches!(out, Err(WinternitzError::Callback { index: 2, .. })));
    assert_eq!(calls, 3);
}

#[test]
fn scenario_thirteen() {
    let schedule = chunk_schedule(&[13], &Params::fixed_checksum_width(32, 4)).unwrap();
    let values: Vec<u32> = schedule.iter().map(|c| c.value).collect();
    assert_eq!(values, vec![13, 0, 0, 0, 0, 0, 0, 0, 13, 0]);
    assert_eq!(schedule[9].max, 7);
}

#[test]
fn scenario_single_bits() {
    let schedule = chunk_schedule(&[0b101], &Params::merkle_lamport(3)).unwrap();
    let values: Vec<u32> = schedule.iter().map(|c| c.value).collect();
    assert_eq!(values, vec![1, 0, 1, 0, 1]);
}
