//! Core domain logic for the todolist manager.
//! Owns the task store, its invariants, and the category suggester.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod suggest;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::category::{normalize_category_name, CategoryValidationError};
pub use model::task::{Priority, Task, TaskId, TaskValidationError};
pub use repo::category_repo::CategoryRepository;
pub use repo::task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskFilter, TaskListQuery, TaskRepository,
};
pub use service::task_service::{ServiceResult, TaskService, TaskServiceError, TaskStats};
pub use suggest::keywords::extract_keywords;
pub use suggest::profile::{build_category_data, CategoryData, CategoryProfile};
pub use suggest::ranker::{
    suggest_categories, suggest_categories_with, ConfigError, Suggestion, SuggestionConfig,
};
pub use suggest::similarity::{calculate_keyword_uniqueness, calculate_similarity};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
