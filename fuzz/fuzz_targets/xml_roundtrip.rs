#![no_main]
use libfuzzer_sys::fuzz_target;
use xmledit::{parse_document, reduce};

// Whatever parses must survive a rewrite and serialize without panicking
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(mut root) = parse_document(s) {
            reduce(&mut root, -1, true);
            let _ = root.to_string();
        }
    }
});
