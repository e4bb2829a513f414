/// Participant lifecycle classification.
///
/// ```text
/// Active --leave--> LeftOnce --rejoin(admin)--> Rejoined --leave--> DefinitivelyLeft
/// ```
///
/// The state is never stored; it is re-derived from a normalized snapshot
/// with a fixed precedence so that every record lands in exactly one state.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParticipantError;
use crate::limits::{LABEL_ACTIVE, LABEL_DEFINITIVELY_LEFT, LABEL_LEFT_ONCE, LABEL_REJOINED};
use crate::participant::record::ParticipantRecord;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantState {
    Active,
    LeftOnce,
    Rejoined,
    DefinitivelyLeft,
}

impl ParticipantState {
    pub const ALL: [ParticipantState; 4] = [
        ParticipantState::Active,
        ParticipantState::LeftOnce,
        ParticipantState::Rejoined,
        ParticipantState::DefinitivelyLeft,
    ];

    /// Active and rejoined members may leave. Leaving from `Rejoined` is terminal.
    pub fn can_leave(&self) -> bool {
        matches!(self, ParticipantState::Active | ParticipantState::Rejoined)
    }

    /// Only a member who left once can be re-added (admin action).
    pub fn can_rejoin(&self) -> bool {
        matches!(self, ParticipantState::LeftOnce)
    }

    /// Currently part of the group.
    pub fn is_member(&self) -> bool {
        self.can_leave()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ParticipantState::DefinitivelyLeft)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ParticipantState::Active => LABEL_ACTIVE,
            ParticipantState::LeftOnce => LABEL_LEFT_ONCE,
            ParticipantState::Rejoined => LABEL_REJOINED,
            ParticipantState::DefinitivelyLeft => LABEL_DEFINITIVELY_LEFT,
        }
    }

    /// Wire name used in logs and serialized diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantState::Active => "active",
            ParticipantState::LeftOnce => "left_once",
            ParticipantState::Rejoined => "rejoined",
            ParticipantState::DefinitivelyLeft => "definitively_left",
        }
    }
}

impl fmt::Display for ParticipantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantState {
    type Err = ParticipantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParticipantState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| ParticipantError::UnknownState(s.to_string()))
    }
}

/// Classify a normalized record. Precedence, highest first:
/// definitively left, rejoined (`recreated_at` present), left once, active.
pub fn classify(record: &ParticipantRecord) -> ParticipantState {
    if record.has_definitively_left {
        ParticipantState::DefinitivelyLeft
    } else if record.has_left && record.recreated_at.is_some() {
        ParticipantState::Rejoined
    } else if record.has_left {
        ParticipantState::LeftOnce
    } else {
        ParticipantState::Active
    }
}

/// State plus its policy bits, as handed to the UI layer.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantStatus {
    pub state: ParticipantState,
    pub can_leave: bool,
    pub can_rejoin: bool,
    pub label: &'static str,
}

impl From<ParticipantState> for ParticipantStatus {
    fn from(state: ParticipantState) -> Self {
        ParticipantStatus {
            state,
            can_leave: state.can_leave(),
            can_rejoin: state.can_rejoin(),
            label: state.label(),
        }
    }
}

pub fn describe(record: &ParticipantRecord) -> ParticipantStatus {
    classify(record).into()
}
