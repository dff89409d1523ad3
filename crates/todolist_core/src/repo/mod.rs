//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for tasks and categories.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Task::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`,
//!   `CategoryNotFound`, `DuplicateCategory`) in addition to DB errors.

pub mod category_repo;
pub mod task_repo;
