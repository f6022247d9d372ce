#![no_main]
use bitvec::prelude::*;
use huffcode::{compress, decode_packed, decompress};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, Vec<u8>)| {
    let (text, garbage) = data;

    if !text.is_empty() {
        let packed = compress(&text).unwrap();
        assert_eq!(decompress(&packed).unwrap(), text);
    }

    // Arbitrary bits are either rejected or decoded, never a panic.
    let _ = decode_packed(garbage.view_bits::<Msb0>());
});
