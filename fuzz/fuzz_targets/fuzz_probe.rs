#![no_main]

use b64image::{info, probe};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(result) = probe::probe(data) {
        assert!(result.bytes_examined <= data.len());
    }
    let _ = info::from_bytes(data);
});
