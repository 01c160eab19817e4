#![no_main]

use libfuzzer_sys::fuzz_target;
use winternitz_engine::compat;

fuzz_target!(|data: &[u8]| {
    // header: chunk width, message length; then 8 checksum widths; rest is the message
    if data.len() < 10 {
        return;
    }
    let chunk_bits = data[0];
    let total_bits = usize::from(data[1]);
    let widths = &data[2..10];
    let words: Vec<u32> = data[10..]
        .chunks(4)
        .map(|b| b.iter().rev().fold(0u32, |acc, &x| (acc << 8) | u32::from(x)))
        .collect();

    let add = |acc: u64, n: u32| acc.checked_add(u64::from(n));
    let signed = compat::winternitz(true, 0u64, add, &words, total_bits, chunk_bits, widths);
    let verified = compat::winternitz(false, 0u64, add, &words, total_bits, chunk_bits, widths);
    assert_eq!(signed.is_some(), verified.is_some());
});
