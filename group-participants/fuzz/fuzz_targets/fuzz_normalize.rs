#![no_main]
use libfuzzer_sys::fuzz_target;

use group_participants::{check_invariants, classify, describe, normalize, ParticipantRecord};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes: the text boundary may reject them, but must not panic
    let text = match std::str::from_utf8(data) {
        Ok(t) => t,
        Err(_) => return,
    };
    let _ = ParticipantRecord::from_json(text);

    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => return,
    };

    let record = normalize(&value);

    // Text fields are either absent or non-empty
    for field in [
        &record.id,
        &record.conversation_id,
        &record.user_id,
        &record.left_at,
        &record.left_by,
        &record.recreated_at,
        &record.recreated_by,
        &record.definitively_left_at,
        &record.definitively_left_by,
    ] {
        if let Some(s) = field {
            assert!(!s.trim().is_empty());
        }
    }

    // Fixed point
    let again = normalize(&serde_json::to_value(&record).expect("record serializes"));
    assert_eq!(again, record);

    // Terminal state dominates
    let status = describe(&record);
    if record.has_definitively_left {
        assert!(!status.can_leave && !status.can_rejoin);
    }
    assert!(!(status.can_leave && status.can_rejoin));
    assert_eq!(classify(&again), status.state);

    let _ = check_invariants(&record);
});
