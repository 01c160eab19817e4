#![no_main]

use libfuzzer_sys::fuzz_target;
use winternitz_engine::{chunk_schedule, run, Mode, Params};

fuzz_target!(|data: &[u8]| {
    // header: chunk width, message length, sign flag; rest is the message
    if data.len() < 4 { return; }
    let chunk_bits = data[0];
    let total_bits = usize::from(u16::from_le_bytes([data[1], data[2]]));
    let mode = Mode::from(data[3] & 1 == 1);
    let words: Vec<u32> = data[4..]
        .chunks(4)
        .map(|b| b.iter().rev().fold(0u32, |acc, &x| (acc << 8) | u32::from(x)))
        .collect();

    let params = Params::fixed_checksum_width(total_bits, chunk_bits);
    let Ok(schedule) = chunk_schedule(&words, &params) else { return };
    assert!(schedule.iter().all(|c| c.value <= c.max));

    let mut calls = 0usize;
    let out = run(mode, 0u64, |acc: u64, n: u32| -> Result<u64, ()> {
        calls += 1;
        Ok(acc + u64::from(n))
    }, &words, &params);
    assert!(out.is_ok());
    assert_eq!(calls, schedule.len());
});
