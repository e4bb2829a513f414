//! Adapters for backend responses, kept apart from the lifecycle logic.

pub mod list;

pub use list::{extract_items, extract_participants};
