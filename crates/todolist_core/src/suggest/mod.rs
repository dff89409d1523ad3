//! Category suggestion engine.
//!
//! # Responsibility
//! - Turn free task text into keywords.
//! - Profile existing categories from task history.
//! - Rank categories for new text by name match, fuzzy similarity, keyword
//!   overlap and popularity.
//!
//! # Invariants
//! - Every function here is pure: no I/O, no caching, no hidden state.
//! - Profiles are recomputed from the task snapshot on every call.

pub mod keywords;
pub mod profile;
pub mod ranker;
pub mod similarity;
