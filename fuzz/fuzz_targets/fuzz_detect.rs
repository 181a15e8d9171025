#![no_main]

use fastsize_core::{DetectOptions, detect_with};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for options in [DetectOptions::default(), DetectOptions::strict()] {
        let mut source = data;
        if let Ok(detection) = detect_with(&mut source, &options, 64) {
            assert!(detection.bytes_read <= data.len());
        }
    }
});
