#![no_main]

use libfuzzer_sys::fuzz_target;
use mediatype::{parse, MediaType, ParsedMediaType};
use std::collections::HashMap;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(media_type) = parse(s) {
            // A normalized type never contains parameters
            assert!(!media_type.full_type().contains(';'));
            let _ = media_type.prefix();
        }

        // Splitting is total over arbitrary strings
        let raw = ParsedMediaType::new(s, HashMap::new());
        let _ = (raw.main_type(), raw.sub_type(), raw.trees(), raw.suffix());
    }
});
