//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record owned by the task store.
//! - Provide validation and the few allowed in-place mutations.
//!
//! # Invariants
//! - `id` is a non-nil UUID and never reused.
//! - `text` is trimmed and never empty.
//! - `category`, when set, is a non-blank weak reference to a category name.
//! - Only `completed` and `category` change after creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier of a task.
pub type TaskId = Uuid;

/// Task urgency chosen by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Wire/storage name of this priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a storage name. Matching is case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for [`Task`] records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    EmptyText,
    EmptyCategory,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::EmptyText => write!(f, "task text must not be empty"),
            Self::EmptyCategory => write!(f, "task category must not be blank when set"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTask")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub priority: Priority,
    /// Category name. Not a foreign key: deleting the category clears it.
    pub category: Option<String>,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates an open task with a generated id and the current timestamp.
    ///
    /// `text` is trimmed before validation.
    pub fn new(text: &str, priority: Priority) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4(), text, priority, now_epoch_ms())
    }

    /// Creates a task with caller-provided identity and creation time.
    ///
    /// Used by import paths and tests that need deterministic ids.
    pub fn with_id(
        id: TaskId,
        text: &str,
        priority: Priority,
        created_at: i64,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            text: text.trim().to_string(),
            priority,
            category: None,
            completed: false,
            created_at,
        };
        task.validate()?;
        Ok(task)
    }

    /// Builder-style helper to attach a category.
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        if matches!(self.category.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(TaskValidationError::EmptyCategory);
        }
        Ok(())
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Whether the task still needs doing.
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

#[derive(Deserialize)]
struct RawTask {
    id: TaskId,
    text: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    completed: bool,
    created_at: i64,
}

impl TryFrom<RawTask> for Task {
    type Error = TaskValidationError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        let task = Self {
            id: raw.id,
            text: raw.text,
            priority: raw.priority,
            category: raw.category,
            completed: raw.completed,
            created_at: raw.created_at,
        };
        task.validate()?;
        Ok(task)
    }
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task, TaskValidationError};
    use uuid::Uuid;

    #[test]
    fn new_trims_text_and_starts_open() {
        let task = Task::new("  buy milk  ", Priority::Low).unwrap();
        assert_eq!(task.text, "buy milk");
        assert!(task.is_active());
        assert!(task.category.is_none());
        assert!(task.created_at > 0);
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(
            Task::new("   ", Priority::High).unwrap_err(),
            TaskValidationError::EmptyText
        );
    }

    #[test]
    fn nil_id_is_rejected() {
        let err = Task::with_id(Uuid::nil(), "x", Priority::Medium, 1).unwrap_err();
        assert_eq!(err, TaskValidationError::NilId);
    }

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse(" low "), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut task = Task::new("water plants", Priority::Medium).unwrap();
        assert!(task.toggle_completed());
        assert!(!task.toggle_completed());
    }
}
