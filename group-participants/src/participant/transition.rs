/// Transition validators: diagnostics for backend mutations.
///
/// The caller snapshots a participant before and after issuing a remote
/// mutation and asks whether the returned record is consistent with that
/// mutation. Findings are data for logs and telemetry. Nothing here blocks
/// the action being validated or fails.
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::ParticipantError;
use crate::participant::record::ParticipantRecord;
use crate::participant::state::{classify, ParticipantState};

// ---------------------------------------------------------------------------
// TransitionKind
// ---------------------------------------------------------------------------

/// The remote mutation that produced the `after` snapshot.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Leave,
    Delete,
    Create,
    Rejoin,
}

impl TransitionKind {
    /// Leave and delete both remove the participant from the group.
    pub fn is_departure(&self) -> bool {
        matches!(self, TransitionKind::Leave | TransitionKind::Delete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Leave => "leave",
            TransitionKind::Delete => "delete",
            TransitionKind::Create => "create",
            TransitionKind::Rejoin => "rejoin",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionKind {
    type Err = ParticipantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leave" => Ok(TransitionKind::Leave),
            "delete" => Ok(TransitionKind::Delete),
            "create" => Ok(TransitionKind::Create),
            "rejoin" => Ok(TransitionKind::Rejoin),
            other => Err(ParticipantError::UnknownTransition(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// A single finding. Whether it counts as an error or a warning is decided by
/// the list it lands in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionIssue {
    #[error("{transition} is not permitted from state {from}")]
    NotPermitted {
        transition: TransitionKind,
        from: ParticipantState,
    },

    #[error("{transition} needs a snapshot taken before the mutation")]
    MissingBeforeSnapshot { transition: TransitionKind },

    #[error("expected state {expected} after {transition}, got {actual}")]
    StateMismatch {
        transition: TransitionKind,
        expected: ParticipantState,
        actual: ParticipantState,
    },

    #[error("{field} must be set after {transition}")]
    MissingField {
        field: &'static str,
        transition: TransitionKind,
    },

    #[error("{field} must be true after {transition}")]
    FlagNotSet {
        field: &'static str,
        transition: TransitionKind,
    },

    #[error("{field} must not be set after {transition}")]
    UnexpectedFlag {
        field: &'static str,
        transition: TransitionKind,
    },

    #[error("{field} is still set after {transition}")]
    FlagStillSet {
        field: &'static str,
        transition: TransitionKind,
    },

    #[error("{field} was reset; it must stay true once set")]
    FlagReset { field: &'static str },

    #[error("{field} changed from {before:?} to {after:?}")]
    FieldChanged {
        field: &'static str,
        before: Option<String>,
        after: Option<String>,
    },

    #[error("departed participant is still flagged as admin")]
    AdminAfterDeparture,

    #[error("hasDefinitivelyLeft is set but hasLeft is not")]
    DefinitivelyLeftWithoutLeaving,

    #[error("recreatedAt is set but hasLeft is not")]
    RecreatedWithoutLeaving,

    #[error("{field} is missing from the departure audit trail")]
    MissingAuditTrail { field: &'static str },
}

// ---------------------------------------------------------------------------
// TransitionReport
// ---------------------------------------------------------------------------

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransitionReport {
    pub is_valid: bool,
    #[serde(serialize_with = "issues_as_text")]
    pub errors: Vec<TransitionIssue>,
    #[serde(serialize_with = "issues_as_text")]
    pub warnings: Vec<TransitionIssue>,
    /// `None` when the transition was not permitted from the prior state.
    pub expected_state: Option<ParticipantState>,
    pub actual_state: ParticipantState,
}

fn issues_as_text<S: Serializer>(issues: &[TransitionIssue], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(issues.iter().map(|issue| issue.to_string()))
}

impl TransitionReport {
    /// Emit the findings through the `log` facade.
    pub fn log(&self, context: &str) {
        for issue in &self.errors {
            log::warn!(
                "participant transition violation ({}): {} [expected={:?}, actual={}]",
                context,
                issue,
                self.expected_state.map(|s| s.as_str()),
                self.actual_state
            );
        }
        for issue in &self.warnings {
            log::debug!("participant transition warning ({}): {}", context, issue);
        }
        if self.is_valid && self.warnings.is_empty() {
            log::debug!("participant transition ok ({}): {}", context, self.actual_state);
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Findings {
    errors: Vec<TransitionIssue>,
    warnings: Vec<TransitionIssue>,
}

impl Findings {
    fn error_if(&mut self, cond: bool, issue: TransitionIssue) {
        if cond {
            self.errors.push(issue);
        }
    }

    fn warn_if(&mut self, cond: bool, issue: TransitionIssue) {
        if cond {
            self.warnings.push(issue);
        }
    }

    /// Audit fields set before the mutation must survive it unchanged.
    fn preserved(&mut self, field: &'static str, before: &Option<String>, after: &Option<String>) {
        if before.is_some() && before != after {
            self.errors.push(TransitionIssue::FieldChanged {
                field,
                before: before.clone(),
                after: after.clone(),
            });
        }
    }
}

/// Check `after` against the transition `kind` applied to `before`.
///
/// `before` is `None` only for a fresh [`TransitionKind::Create`]; any other
/// kind without a prior snapshot is reported as an error.
pub fn validate_transition(
    before: Option<&ParticipantRecord>,
    after: &ParticipantRecord,
    kind: TransitionKind,
) -> TransitionReport {
    let actual = classify(after);
    let mut f = Findings::default();

    let expected = match before {
        None if kind == TransitionKind::Create => {
            check_fresh(after, kind, &mut f);
            Some(ParticipantState::Active)
        }
        None => {
            f.errors.push(TransitionIssue::MissingBeforeSnapshot { transition: kind });
            None
        }
        Some(before) => {
            check_identity(before, after, &mut f);
            let from = classify(before);
            if kind.is_departure() {
                check_departure(before, from, after, kind, &mut f)
            } else {
                check_rejoin(before, from, after, kind, &mut f)
            }
        }
    };

    if let Some(expected) = expected {
        f.error_if(
            expected != actual,
            TransitionIssue::StateMismatch {
                transition: kind,
                expected,
                actual,
            },
        );
    }
    f.warn_if(after.is_admin && !actual.is_member(), TransitionIssue::AdminAfterDeparture);

    TransitionReport {
        is_valid: f.errors.is_empty(),
        errors: f.errors,
        warnings: f.warnings,
        expected_state: expected,
        actual_state: actual,
    }
}

fn check_identity(before: &ParticipantRecord, after: &ParticipantRecord, f: &mut Findings) {
    f.preserved("conversationId", &before.conversation_id, &after.conversation_id);
    f.preserved("userId", &before.user_id, &after.user_id);
}

fn check_fresh(after: &ParticipantRecord, kind: TransitionKind, f: &mut Findings) {
    f.error_if(after.has_left, TransitionIssue::UnexpectedFlag { field: "hasLeft", transition: kind });
    f.error_if(
        after.has_definitively_left,
        TransitionIssue::UnexpectedFlag { field: "hasDefinitivelyLeft", transition: kind },
    );
    f.error_if(
        after.recreated_at.is_some(),
        TransitionIssue::UnexpectedFlag { field: "recreatedAt", transition: kind },
    );
    f.warn_if(after.is_deleted, TransitionIssue::FlagStillSet { field: "isDeleted", transition: kind });
}

fn check_departure(
    before: &ParticipantRecord,
    from: ParticipantState,
    after: &ParticipantRecord,
    kind: TransitionKind,
    f: &mut Findings,
) -> Option<ParticipantState> {
    match from {
        ParticipantState::Active => {
            f.error_if(!after.has_left, TransitionIssue::FlagNotSet { field: "hasLeft", transition: kind });
            f.error_if(after.left_at.is_none(), TransitionIssue::MissingField { field: "leftAt", transition: kind });
            f.error_if(after.left_by.is_none(), TransitionIssue::MissingField { field: "leftBy", transition: kind });
            f.error_if(
                after.has_definitively_left,
                TransitionIssue::UnexpectedFlag { field: "hasDefinitivelyLeft", transition: kind },
            );
            f.warn_if(!after.is_deleted, TransitionIssue::FlagNotSet { field: "isDeleted", transition: kind });
            Some(ParticipantState::LeftOnce)
        }
        ParticipantState::Rejoined => {
            f.error_if(
                !after.has_definitively_left,
                TransitionIssue::FlagNotSet { field: "hasDefinitivelyLeft", transition: kind },
            );
            f.error_if(
                after.definitively_left_at.is_none(),
                TransitionIssue::MissingField { field: "definitivelyLeftAt", transition: kind },
            );
            f.error_if(
                after.definitively_left_by.is_none(),
                TransitionIssue::MissingField { field: "definitivelyLeftBy", transition: kind },
            );
            f.error_if(!after.has_left, TransitionIssue::FlagReset { field: "hasLeft" });
            f.preserved("leftAt", &before.left_at, &after.left_at);
            f.preserved("leftBy", &before.left_by, &after.left_by);
            f.warn_if(!after.is_deleted, TransitionIssue::FlagNotSet { field: "isDeleted", transition: kind });
            Some(ParticipantState::DefinitivelyLeft)
        }
        ParticipantState::LeftOnce | ParticipantState::DefinitivelyLeft => {
            f.errors.push(TransitionIssue::NotPermitted { transition: kind, from });
            None
        }
    }
}

fn check_rejoin(
    before: &ParticipantRecord,
    from: ParticipantState,
    after: &ParticipantRecord,
    kind: TransitionKind,
    f: &mut Findings,
) -> Option<ParticipantState> {
    if from != ParticipantState::LeftOnce {
        f.errors.push(TransitionIssue::NotPermitted { transition: kind, from });
        return None;
    }

    f.error_if(!after.has_left, TransitionIssue::FlagReset { field: "hasLeft" });
    f.error_if(
        after.recreated_at.is_none(),
        TransitionIssue::MissingField { field: "recreatedAt", transition: kind },
    );
    f.warn_if(
        after.recreated_by.is_none(),
        TransitionIssue::MissingField { field: "recreatedBy", transition: kind },
    );
    f.error_if(
        after.has_definitively_left,
        TransitionIssue::UnexpectedFlag { field: "hasDefinitivelyLeft", transition: kind },
    );
    f.preserved("leftAt", &before.left_at, &after.left_at);
    f.preserved("leftBy", &before.left_by, &after.left_by);
    f.warn_if(after.is_deleted, TransitionIssue::FlagStillSet { field: "isDeleted", transition: kind });
    Some(ParticipantState::Rejoined)
}

/// Report records that break the lifecycle invariants. Classification still
/// works on such records; this is for spotting backend bugs.
pub fn check_invariants(record: &ParticipantRecord) -> Vec<TransitionIssue> {
    let mut issues = Vec::new();
    if record.has_definitively_left && !record.has_left {
        issues.push(TransitionIssue::DefinitivelyLeftWithoutLeaving);
    }
    if record.recreated_at.is_some() && !record.has_left {
        issues.push(TransitionIssue::RecreatedWithoutLeaving);
    }
    if record.has_left && record.left_at.is_none() {
        issues.push(TransitionIssue::MissingAuditTrail { field: "leftAt" });
    }
    if record.has_definitively_left && record.definitively_left_at.is_none() {
        issues.push(TransitionIssue::MissingAuditTrail { field: "definitivelyLeftAt" });
    }
    issues
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
