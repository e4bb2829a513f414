use thiserror::Error;

/// Errors raised at the text boundary of the crate.
///
/// Shape problems inside a well-formed payload are never errors; the
/// normalizer absorbs them. Only input that cannot be read at all ends up here.
#[derive(Error, Debug)]
pub enum ParticipantError {
    #[error("Invalid participant JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unknown participant state: {0}")]
    UnknownState(String),

    #[error("Unknown transition kind: {0}")]
    UnknownTransition(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParticipantError::UnknownState("gone".into());
        assert_eq!(err.to_string(), "Unknown participant state: gone");

        let err = ParticipantError::UnknownTransition("kick".into());
        assert_eq!(err.to_string(), "Unknown transition kind: kick");
    }

    #[test]
    fn test_json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ParticipantError = parse_err.into();
        assert!(err.to_string().starts_with("Invalid participant JSON"));
    }
}
