#![no_main]

use cboring::{MajorType, decode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut r = data;
    let limits = decode::Limits::new(decode::MAX_RAW_LENGTH, 64);
    while let Ok((major, len)) = decode::read_header(&mut r) {
        if matches!(major, MajorType::ByteString | MajorType::TextString)
            && limits.read_raw_bytes(len, &mut r).is_err()
        {
            break;
        }
    }
});
