/// Field aliases and display constants for participant payloads.
///
/// The backend has shipped participant records in both camelCase and
/// snake_case. Each entry lists the accepted spellings in lookup order;
/// the first key present in the payload wins.

/// Identifier of the participation relation.
pub const ID_KEYS: &[&str] = &["id", "participantId", "participant_id"];

pub const CONVERSATION_ID_KEYS: &[&str] = &["conversationId", "conversation_id"];
pub const USER_ID_KEYS: &[&str] = &["userId", "user_id"];

pub const IS_ADMIN_KEYS: &[&str] = &["isAdmin", "is_admin"];
pub const IS_DELETED_KEYS: &[&str] = &["isDeleted", "is_deleted"];
pub const HAS_LEFT_KEYS: &[&str] = &["hasLeft", "has_left"];
pub const HAS_DEFINITIVELY_LEFT_KEYS: &[&str] = &["hasDefinitivelyLeft", "has_definitively_left"];
pub const HAS_CLEANED_KEYS: &[&str] = &["hasCleaned", "has_cleaned"];

pub const LEFT_AT_KEYS: &[&str] = &["leftAt", "left_at"];
pub const LEFT_BY_KEYS: &[&str] = &["leftBy", "left_by"];
pub const RECREATED_AT_KEYS: &[&str] = &["recreatedAt", "recreated_at"];
pub const RECREATED_BY_KEYS: &[&str] = &["recreatedBy", "recreated_by"];
pub const DEFINITIVELY_LEFT_AT_KEYS: &[&str] = &["definitivelyLeftAt", "definitively_left_at"];
pub const DEFINITIVELY_LEFT_BY_KEYS: &[&str] = &["definitivelyLeftBy", "definitively_left_by"];

/// String spellings (compared case-insensitively, trimmed) that coerce to `true`.
pub const TRUTHY_STRINGS: &[&str] = &["true", "1"];

// ---------------------------------------------------------------------------
// Status labels
// ---------------------------------------------------------------------------

pub const LABEL_ACTIVE: &str = "Active member";
pub const LABEL_LEFT_ONCE: &str = "Left the group";
pub const LABEL_REJOINED: &str = "Rejoined the group";
pub const LABEL_DEFINITIVELY_LEFT: &str = "Left the group permanently";
