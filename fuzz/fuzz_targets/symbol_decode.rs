#![no_main]

use bitpack::{decode, decode_strict, encode, Alphabet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Bytes always survive a round trip.
    let token = encode(&Alphabet::URL_SAFE, data);
    assert_eq!(decode(&Alphabet::URL_SAFE, &token), data);

    // Arbitrary text decodes leniently without panicking.
    if let Ok(text) = std::str::from_utf8(data) {
        let lenient = decode(&Alphabet::URL_SAFE, text);
        if let Ok(strict) = decode_strict(&Alphabet::URL_SAFE, text) {
            assert_eq!(strict, lenient);
        }
        let _ = compress::decompress(&lenient, &compress::Limits::for_testing());
    }
});
