#![no_main]

use cboring::{MajorType, decode, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };

    let mut encoded = Vec::new();
    if selector & 1 == 0 {
        encode::write_byte_string(payload, &mut encoded).unwrap();
        let decoded = decode::read_byte_string(&mut &encoded[..]).unwrap();
        assert_eq!(decoded, payload);
    } else {
        let argument = payload
            .iter()
            .take(8)
            .fold(0u64, |acc, b| (acc << 8) | *b as u64);
        let major = MajorType::from_initial_byte(selector);
        encode::write_header(major, argument, &mut encoded).unwrap();
        assert_eq!(encoded.len(), encode::encoded_header_len(argument));
        assert_eq!(
            decode::read_header(&mut &encoded[..]).unwrap(),
            (major, argument)
        );
    }
});
