//! Domain model for tasks and categories.
//!
//! # Responsibility
//! - Define canonical data structures used by the store and the suggester.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Categories are plain names; tasks reference them weakly by name.

pub mod category;
pub mod task;
