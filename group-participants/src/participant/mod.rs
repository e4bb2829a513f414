//! Participant lifecycle: normalization, classification, policy and
//! transition diagnostics.
//!
//! # Module structure
//! - `record`: `ParticipantRecord`, the canonical snapshot
//! - `normalize`: untrusted payload → `ParticipantRecord`
//! - `state`: four-state classifier and status labels
//! - `policy`: leave / rejoin / remove / admin / display predicates
//! - `transition`: before/after consistency checks (feature `diagnostics`)

pub mod normalize;
pub mod policy;
pub mod record;
pub mod state;
#[cfg(feature = "diagnostics")]
pub mod transition;

// Re-export core types for convenience
pub use normalize::normalize;
pub use policy::{
    can_leave_group, can_manage_admin_status, can_rejoin_participant, can_remove_participant,
    is_current_user, should_display_conversation, CallerContext, ParticipantActions,
};
pub use record::ParticipantRecord;
pub use state::{classify, describe, ParticipantState, ParticipantStatus};
#[cfg(feature = "diagnostics")]
pub use transition::{
    check_invariants, validate_transition, TransitionIssue, TransitionKind, TransitionReport,
};
