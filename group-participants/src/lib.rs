//! # Group Participants
//!
//! **Participant lifecycle resolver for group chat clients.**
//!
//! The backend owns every participant record; a client only ever holds a
//! snapshot fetched for the current screen. This crate turns such a snapshot
//! into answers the UI can act on:
//!
//! - **Normalization** of loosely-typed payloads (camelCase or snake_case keys,
//!   `true`/`1`/`"true"` flags, empty strings for missing dates)
//! - **Classification** into `active`, `left_once`, `rejoined` or
//!   `definitively_left`
//! - **Policy** predicates for leave, rejoin, remove, admin management and
//!   conversation display
//! - **Transition diagnostics** comparing before/after snapshots of a mutation
//!
//! ## Quick Start
//!
//! ```rust
//! use group_participants::{classify, ParticipantRecord, ParticipantState};
//! use group_participants::{can_leave_group, can_rejoin_participant};
//!
//! let record = ParticipantRecord::from_json(
//!     r#"{"has_left": "true", "leftAt": "2024-01-01", "recreatedAt": ""}"#,
//! ).unwrap();
//!
//! assert_eq!(classify(&record), ParticipantState::LeftOnce);
//! assert!(!can_leave_group(&record));
//! assert!(can_rejoin_participant(&record, true));
//! ```
//!
//! ## Architecture
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`participant`] | Record, normalizer, classifier, policy, transition diagnostics |
//! | [`api`] | Response envelope unwrapping for list endpoints |
//! | [`limits`] | Field alias tables and status labels |
//! | [`error`] | Errors at the JSON text boundary |
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `diagnostics` | Yes | Transition validators and invariant checks |

// ── Public modules ──────────────────────────────────────────────────────────

/// Participant lifecycle: normalization, classification, policy, diagnostics.
pub mod participant;

/// Unwrapping of list responses into participant records.
pub mod api;

/// Field aliases and label constants.
pub mod limits;

pub mod error;

// ── Re-exports for convenience ──────────────────────────────────────────────

pub use error::ParticipantError;

pub use participant::{
    can_leave_group, can_manage_admin_status, can_rejoin_participant, can_remove_participant,
    classify, describe, is_current_user, normalize, should_display_conversation, CallerContext,
    ParticipantActions, ParticipantRecord, ParticipantState, ParticipantStatus,
};

#[cfg(feature = "diagnostics")]
pub use participant::{
    check_invariants, validate_transition, TransitionIssue, TransitionKind, TransitionReport,
};

pub use api::{extract_items, extract_participants};

// ── Library metadata ────────────────────────────────────────────────────────

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version() -> &'static str {
    VERSION
}

// ── Tests ───────────────────────────────────────────────────────────────────
