/// Normalizer: the single adapter from untrusted backend payloads to
/// [`ParticipantRecord`].
///
/// - Keys are looked up camelCase first, then snake_case.
/// - Flags: `true`, `1`, `"true"`, `"1"` are true; everything else is false.
/// - Text: non-empty strings (trimmed) and numbers are kept; anything else is `None`.
///
/// The function is total. Garbage in degrades to an inactive, non-admin
/// default, never to a privileged record.
use serde_json::{Map, Value};

use crate::limits::*;
use crate::participant::record::ParticipantRecord;

/// Normalize a raw participant payload.
pub fn normalize(raw: &Value) -> ParticipantRecord {
    let obj = match raw.as_object() {
        Some(obj) => obj,
        None => {
            log::debug!("participant payload is not an object, using defaults");
            return ParticipantRecord::default();
        }
    };

    ParticipantRecord {
        id: text_field(obj, ID_KEYS),
        conversation_id: text_field(obj, CONVERSATION_ID_KEYS),
        user_id: text_field(obj, USER_ID_KEYS),

        is_admin: flag_field(obj, IS_ADMIN_KEYS),
        is_deleted: flag_field(obj, IS_DELETED_KEYS),
        has_left: flag_field(obj, HAS_LEFT_KEYS),
        has_definitively_left: flag_field(obj, HAS_DEFINITIVELY_LEFT_KEYS),
        has_cleaned: flag_field(obj, HAS_CLEANED_KEYS),

        left_at: text_field(obj, LEFT_AT_KEYS),
        left_by: text_field(obj, LEFT_BY_KEYS),
        recreated_at: text_field(obj, RECREATED_AT_KEYS),
        recreated_by: text_field(obj, RECREATED_BY_KEYS),
        definitively_left_at: text_field(obj, DEFINITIVELY_LEFT_AT_KEYS),
        definitively_left_by: text_field(obj, DEFINITIVELY_LEFT_BY_KEYS),
    }
}

/// First non-null value under any of `keys`.
fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

fn flag_field(obj: &Map<String, Value>, keys: &[&str]) -> bool {
    lookup(obj, keys).map(coerce_flag).unwrap_or(false)
}

fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    lookup(obj, keys).and_then(coerce_text)
}

/// Strict boolean coercion.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_u64() == Some(1) || n.as_f64() == Some(1.0),
        Value::String(s) => {
            let s = s.trim();
            TRUTHY_STRINGS.iter().any(|t| s.eq_ignore_ascii_case(t))
        }
        _ => false,
    }
}

/// Nullable text coercion.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_flags_are_false() {
        let rec = normalize(&json!({ "hasLeft": null }));
        assert!(!rec.has_left);
        assert!(!rec.has_definitively_left);
        assert!(!rec.is_admin);
        assert!(!rec.has_cleaned);
    }

    #[test]
    fn test_flag_spellings() {
        for truthy in [json!(true), json!(1), json!(1.0), json!("true"), json!(" TRUE "), json!("1")] {
            assert!(coerce_flag(&truthy), "{} should be true", truthy);
        }
        for falsy in [
            json!(false),
            json!(0),
            json!(2),
            json!(-1),
            json!("false"),
            json!("yes"),
            json!(""),
            json!(null),
            json!([true]),
            json!({ "value": true }),
        ] {
            assert!(!coerce_flag(&falsy), "{} should be false", falsy);
        }
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(coerce_text(&json!("2024-01-01")), Some("2024-01-01".into()));
        assert_eq!(coerce_text(&json!("  padded ")), Some("padded".into()));
        assert_eq!(coerce_text(&json!(5)), Some("5".into()));
        assert_eq!(coerce_text(&json!("")), None);
        assert_eq!(coerce_text(&json!("   ")), None);
        assert_eq!(coerce_text(&json!(null)), None);
        assert_eq!(coerce_text(&json!(true)), None);
        assert_eq!(coerce_text(&json!({})), None);
    }

    #[test]
    fn test_snake_case_payload() {
        let rec = normalize(&json!({
            "id": 11,
            "conversation_id": 3,
            "user_id": "8",
            "is_admin": 1,
            "has_left": "true",
            "left_at": "2024-01-01",
            "left_by": 8,
            "recreated_at": "",
        }));
        assert_eq!(rec.id.as_deref(), Some("11"));
        assert_eq!(rec.conversation_id.as_deref(), Some("3"));
        assert_eq!(rec.user_id.as_deref(), Some("8"));
        assert!(rec.is_admin);
        assert!(rec.has_left);
        assert_eq!(rec.left_at.as_deref(), Some("2024-01-01"));
        assert_eq!(rec.left_by.as_deref(), Some("8"));
        assert!(rec.recreated_at.is_none());
    }

    #[test]
    fn test_camel_case_wins_over_snake_case() {
        let rec = normalize(&json!({ "hasLeft": false, "has_left": true }));
        assert!(!rec.has_left);
    }

    #[test]
    fn test_null_camel_case_falls_back_to_snake_case() {
        let rec = normalize(&json!({ "recreatedAt": null, "recreated_at": "2024-02-01" }));
        assert_eq!(rec.recreated_at.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn test_non_object_inputs_degrade_to_default() {
        for raw in [json!(null), json!(42), json!("participant"), json!([{ "isAdmin": true }])] {
            assert_eq!(normalize(&raw), ParticipantRecord::default());
        }
    }

    #[test]
    fn test_malformed_admin_is_not_admin() {
        let rec = normalize(&json!({ "isAdmin": "admin", "isDeleted": {} }));
        assert!(!rec.is_admin);
        assert!(!rec.is_deleted);
    }

    #[test]
    fn test_normalization_is_a_fixed_point() {
        let raws = [
            json!({}),
            json!({ "has_left": 1, "left_at": " 2024-01-01 ", "left_by": 3 }),
            json!({
                "hasLeft": "true",
                "hasDefinitivelyLeft": true,
                "recreatedAt": "2024-02-01",
                "definitively_left_at": "2024-03-01",
                "hasCleaned": "1",
            }),
            json!("not an object"),
        ];
        for raw in raws {
            let once = normalize(&raw);
            let twice = normalize(&serde_json::to_value(&once).unwrap());
            assert_eq!(once, twice);
        }
    }
}
