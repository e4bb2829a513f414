/// Canonical participant record.
///
/// A participant is the relation between one user and one conversation. The
/// backend owns it; the client only reads snapshots and re-derives state from
/// them on every render.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParticipantError;
use crate::participant::normalize::normalize;

/// A normalized participant snapshot.
///
/// All flags are strict booleans and every optional text field is either a
/// non-empty string or `None`. Build one with [`ParticipantRecord::from_value`]
/// (or through serde, which routes through the same normalizer) rather than by
/// field-guessing on raw payloads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct ParticipantRecord {
    pub id: Option<String>,
    pub conversation_id: Option<String>,
    pub user_id: Option<String>,

    pub is_admin: bool,
    /// No longer an active member (first departure onward).
    pub is_deleted: bool,
    /// Set on the first departure and never reset, not even on rejoin.
    pub has_left: bool,
    /// Terminal: second departure after a rejoin.
    pub has_definitively_left: bool,
    /// The user hid the conversation locally; unrelated to membership.
    pub has_cleaned: bool,

    pub left_at: Option<String>,
    pub left_by: Option<String>,
    /// Presence alone distinguishes "rejoined" from "left once".
    pub recreated_at: Option<String>,
    pub recreated_by: Option<String>,
    pub definitively_left_at: Option<String>,
    pub definitively_left_by: Option<String>,
}

impl From<Value> for ParticipantRecord {
    fn from(value: Value) -> Self {
        normalize(&value)
    }
}

impl ParticipantRecord {
    /// Normalize a raw backend payload. Never fails.
    pub fn from_value(value: &Value) -> Self {
        normalize(value)
    }

    /// Parse JSON text and normalize it. Only unreadable JSON is an error.
    pub fn from_json(json: &str) -> Result<Self, ParticipantError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(normalize(&value))
    }

    /// Serialize back to the canonical camelCase shape.
    pub fn to_json(&self) -> Result<String, ParticipantError> {
        Ok(serde_json::to_string(self)?)
    }

    /// True if this record belongs to `user_id`.
    pub fn is_user(&self, user_id: &str) -> bool {
        self.user_id.as_deref() == Some(user_id)
    }

    pub fn left_at_time(&self) -> Option<DateTime<Utc>> {
        self.left_at.as_deref().and_then(parse_timestamp)
    }

    pub fn recreated_at_time(&self) -> Option<DateTime<Utc>> {
        self.recreated_at.as_deref().and_then(parse_timestamp)
    }

    pub fn definitively_left_at_time(&self) -> Option<DateTime<Utc>> {
        self.definitively_left_at.as_deref().and_then(parse_timestamp)
    }
}

/// Parse the timestamp spellings the backend emits: RFC 3339, naive ISO
/// date-time (taken as UTC) or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
