#![no_main]

use b64image::codec;
use libfuzzer_sys::fuzz_target;

// Arbitrary text must never panic the decoder, and whatever it accepts must
// survive a re-encode.
fuzz_target!(|text: &str| {
    if let Ok(bytes) = codec::decode(text) {
        let again = codec::encode(&bytes);
        assert_eq!(codec::decode(&again).ok(), Some(bytes));
    }
});
