#![no_main]
use libfuzzer_sys::fuzz_target;

use group_participants::{extract_items, extract_participants};

fuzz_target!(|data: &[u8]| {
    let value: serde_json::Value = match serde_json::from_slice(data) {
        Ok(v) => v,
        Err(_) => return,
    };

    // Any JSON shape must unwrap to a list (possibly empty) without panicking
    let items = extract_items(&value);
    let records = extract_participants(&value);
    assert_eq!(items.len(), records.len());
});
