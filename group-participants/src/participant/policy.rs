/// Policy predicates gating group actions.
///
/// Every predicate is a pure function of a normalized record and, where the
/// answer depends on who is asking, an explicit [`CallerContext`]. Nothing here
/// reads the current user from ambient state; callers resolve identity once
/// and pass it down.
use serde::Serialize;

use crate::participant::record::ParticipantRecord;
use crate::participant::state::{classify, ParticipantState};

/// Who is asking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallerContext {
    pub current_user_id: Option<String>,
    pub is_admin_or_creator: bool,
}

impl CallerContext {
    pub fn new(current_user_id: impl Into<String>, is_admin_or_creator: bool) -> Self {
        CallerContext {
            current_user_id: Some(current_user_id.into()),
            is_admin_or_creator,
        }
    }

    /// Derive the caller's privilege from a conversation's participant list.
    ///
    /// The caller is privileged as the conversation creator or as an admin
    /// participant, and only while their own record (if any) is a current
    /// member. A caller with no record is privileged only as creator.
    pub fn from_participants(
        participants: &[ParticipantRecord],
        current_user_id: &str,
        creator_id: Option<&str>,
    ) -> Self {
        let own = participants.iter().find(|p| p.is_user(current_user_id));
        let is_creator = creator_id == Some(current_user_id);

        let is_admin_or_creator = match own {
            Some(rec) => classify(rec).is_member() && (is_creator || rec.is_admin),
            None => is_creator,
        };

        CallerContext {
            current_user_id: Some(current_user_id.to_string()),
            is_admin_or_creator,
        }
    }
}

/// True iff the member is active or rejoined.
pub fn can_leave_group(record: &ParticipantRecord) -> bool {
    classify(record).can_leave()
}

/// True iff the member left exactly once and the caller is an admin or the creator.
pub fn can_rejoin_participant(record: &ParticipantRecord, caller_is_admin_or_creator: bool) -> bool {
    caller_is_admin_or_creator && classify(record) == ParticipantState::LeftOnce
}

pub fn can_manage_admin_status(record: &ParticipantRecord, caller_is_admin_or_creator: bool) -> bool {
    caller_is_admin_or_creator && classify(record) != ParticipantState::DefinitivelyLeft
}

/// Hidden only when the user cleaned the conversation; membership is irrelevant.
pub fn should_display_conversation(record: &ParticipantRecord) -> bool {
    !record.has_cleaned
}

pub fn is_current_user(record: &ParticipantRecord, ctx: &CallerContext) -> bool {
    ctx.current_user_id
        .as_deref()
        .map(|uid| record.is_user(uid))
        .unwrap_or(false)
}

/// Privileged callers may remove other current members, never themselves
/// (that is a leave).
pub fn can_remove_participant(record: &ParticipantRecord, ctx: &CallerContext) -> bool {
    ctx.is_admin_or_creator && !is_current_user(record, ctx) && classify(record).is_member()
}

/// Everything one render of a participant row needs.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantActions {
    pub state: ParticipantState,
    pub can_leave: bool,
    pub can_rejoin: bool,
    pub can_manage_admin: bool,
    pub can_remove: bool,
    pub should_display: bool,
}

impl ParticipantActions {
    pub fn evaluate(record: &ParticipantRecord, ctx: &CallerContext) -> Self {
        ParticipantActions {
            state: classify(record),
            can_leave: can_leave_group(record),
            can_rejoin: can_rejoin_participant(record, ctx.is_admin_or_creator),
            can_manage_admin: can_manage_admin_status(record, ctx.is_admin_or_creator),
            can_remove: can_remove_participant(record, ctx),
            should_display: should_display_conversation(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::normalize::normalize;
    use serde_json::json;

    fn active(user: &str) -> ParticipantRecord {
        ParticipantRecord {
            user_id: Some(user.into()),
            ..Default::default()
        }
    }

    fn left_once(user: &str) -> ParticipantRecord {
        ParticipantRecord {
            user_id: Some(user.into()),
            has_left: true,
            is_deleted: true,
            left_at: Some("2024-01-01".into()),
            left_by: Some(user.into()),
            ..Default::default()
        }
    }

    fn rejoined(user: &str) -> ParticipantRecord {
        ParticipantRecord {
            recreated_at: Some("2024-02-01".into()),
            recreated_by: Some("1".into()),
            is_deleted: false,
            ..left_once(user)
        }
    }

    fn definitively_left(user: &str) -> ParticipantRecord {
        ParticipantRecord {
            has_definitively_left: true,
            is_deleted: true,
            definitively_left_at: Some("2024-03-01".into()),
            definitively_left_by: Some(user.into()),
            ..rejoined(user)
        }
    }

    #[test]
    fn test_can_leave_group() {
        assert!(can_leave_group(&active("1")));
        assert!(!can_leave_group(&left_once("1")));
        assert!(can_leave_group(&rejoined("1")));
        assert!(!can_leave_group(&definitively_left("1")));
    }

    #[test]
    fn test_can_rejoin_requires_left_once_and_privilege() {
        assert!(can_rejoin_participant(&left_once("2"), true));
        assert!(!can_rejoin_participant(&left_once("2"), false));
        for rec in [active("2"), rejoined("2"), definitively_left("2")] {
            assert!(!can_rejoin_participant(&rec, true));
        }
    }

    #[test]
    fn test_can_manage_admin_status() {
        assert!(can_manage_admin_status(&active("2"), true));
        assert!(can_manage_admin_status(&left_once("2"), true));
        assert!(can_manage_admin_status(&rejoined("2"), true));
        assert!(!can_manage_admin_status(&definitively_left("2"), true));
        assert!(!can_manage_admin_status(&active("2"), false));
    }

    #[test]
    fn test_cleaned_conversation_is_hidden_even_when_active() {
        let rec = normalize(&json!({ "hasCleaned": true, "hasLeft": false }));
        assert!(can_leave_group(&rec));
        assert!(!should_display_conversation(&rec));
    }

    #[test]
    fn test_departed_member_still_sees_history() {
        assert!(should_display_conversation(&left_once("3")));
        assert!(should_display_conversation(&definitively_left("3")));
    }

    #[test]
    fn test_caller_context_from_participants() {
        let mut admin = active("1");
        admin.is_admin = true;
        let members = vec![admin, active("2"), left_once("3")];

        assert!(CallerContext::from_participants(&members, "1", None).is_admin_or_creator);
        assert!(!CallerContext::from_participants(&members, "2", None).is_admin_or_creator);
        assert!(CallerContext::from_participants(&members, "2", Some("2")).is_admin_or_creator);
        // A creator who walked out loses the privilege with the membership.
        assert!(!CallerContext::from_participants(&members, "3", Some("3")).is_admin_or_creator);
        // Creator without any participant row.
        assert!(CallerContext::from_participants(&members, "9", Some("9")).is_admin_or_creator);
        assert!(!CallerContext::from_participants(&members, "9", None).is_admin_or_creator);
    }

    #[test]
    fn test_departed_admin_is_not_privileged() {
        let mut former = left_once("4");
        former.is_admin = true;
        let ctx = CallerContext::from_participants(&[former], "4", None);
        assert!(!ctx.is_admin_or_creator);
        assert_eq!(ctx.current_user_id.as_deref(), Some("4"));
    }

    #[test]
    fn test_can_remove_participant() {
        let ctx = CallerContext::new("1", true);
        assert!(can_remove_participant(&active("2"), &ctx));
        assert!(can_remove_participant(&rejoined("2"), &ctx));
        assert!(!can_remove_participant(&left_once("2"), &ctx));
        assert!(!can_remove_participant(&definitively_left("2"), &ctx));
        assert!(!can_remove_participant(&active("1"), &ctx));

        let plain = CallerContext::new("1", false);
        assert!(!can_remove_participant(&active("2"), &plain));
    }

    #[test]
    fn test_is_current_user_without_identity() {
        assert!(!is_current_user(&active("1"), &CallerContext::default()));
        assert!(is_current_user(&active("1"), &CallerContext::new("1", false)));
    }

    #[test]
    fn test_evaluate_bundles_all_predicates() {
        let ctx = CallerContext::new("1", true);
        let actions = ParticipantActions::evaluate(&left_once("2"), &ctx);
        assert_eq!(
            actions,
            ParticipantActions {
                state: ParticipantState::LeftOnce,
                can_leave: false,
                can_rejoin: true,
                can_manage_admin: true,
                can_remove: false,
                should_display: true,
            }
        );

        let value = serde_json::to_value(actions).unwrap();
        assert_eq!(value["canManageAdmin"], json!(true));
        assert_eq!(value["state"], json!("left_once"));
    }
}
