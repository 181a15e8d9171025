#![no_main]

use fastsize_core::{DetectOptions, detect_with};
use libfuzzer_sys::fuzz_target;

// The chunk size only changes how often the source is polled, never the answer.
fuzz_target!(|input: (u8, &[u8])| {
    let (chunk, data) = input;
    let options = DetectOptions::default();

    let mut whole = data;
    let expected = detect_with(&mut whole, &options, data.len().max(1))
        .map(|d| (d.image_type, d.size))
        .map_err(|e| e.image_type());

    let mut chunked = data;
    let actual = detect_with(&mut chunked, &options, usize::from(chunk).max(1))
        .map(|d| (d.image_type, d.size))
        .map_err(|e| e.image_type());

    assert_eq!(expected, actual);
});
