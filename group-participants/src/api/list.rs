/// List extraction for backend responses.
///
/// List endpoints answer with a bare array, `{ items }`, `{ results }`,
/// `{ data: [...] }` or `{ data: { items } }` depending on the route. This is
/// the one place that knows about those envelopes.
use serde::Deserialize;
use serde_json::Value;

use crate::participant::normalize::normalize;
use crate::participant::record::ParticipantRecord;

#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope {
    Bare(Vec<Value>),
    Items { items: Vec<Value> },
    Results { results: Vec<Value> },
    Data { data: Box<ListEnvelope> },
}

impl ListEnvelope {
    fn into_items(self) -> Vec<Value> {
        match self {
            ListEnvelope::Bare(items)
            | ListEnvelope::Items { items }
            | ListEnvelope::Results { results: items } => items,
            ListEnvelope::Data { data } => data.into_items(),
        }
    }
}

/// Unwrap the item list from any known envelope. Unknown shapes yield an
/// empty list.
pub fn extract_items(response: &Value) -> Vec<Value> {
    match ListEnvelope::deserialize(response) {
        Ok(envelope) => envelope.into_items(),
        Err(e) => {
            log::debug!("unrecognized list envelope: {}", e);
            Vec::new()
        }
    }
}

/// Unwrap and normalize a participant list response.
pub fn extract_participants(response: &Value) -> Vec<ParticipantRecord> {
    extract_items(response).iter().map(normalize).collect()
}
