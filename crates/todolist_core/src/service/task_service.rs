//! Task use-case service.
//!
//! # Responsibility
//! - Provide add/complete/delete/filter/categorize entry points.
//! - Feed a consistent store snapshot into the category suggester.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Log lines carry metadata only; task text never reaches the logs.

use crate::model::task::{Priority, Task, TaskId};
use crate::repo::category_repo::CategoryRepository;
use crate::repo::task_repo::{RepoError, TaskFilter, TaskListQuery, TaskRepository};
use crate::suggest::ranker::{suggest_categories_with, Suggestion, SuggestionConfig};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    TaskNotFound(TaskId),
    Repo(RepoError),
    /// Internal mismatch between a write and its read-back.
    InconsistentState(&'static str),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent task state: {details}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, TaskServiceError>;

/// Task counts for the "items left" summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Task/category service facade over a repository implementation.
pub struct TaskService<R> {
    repo: R,
    config: SuggestionConfig,
}

impl<R> TaskService<R>
where
    R: TaskRepository + CategoryRepository,
{
    /// Creates a service with the default suggestion configuration.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            config: SuggestionConfig::default(),
        }
    }

    /// Replaces the suggestion configuration.
    ///
    /// The caller is expected to have run [`SuggestionConfig::validate`].
    pub fn with_config(mut self, config: SuggestionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// Creates an open task, optionally filed under an existing category.
    pub fn add_task(
        &self,
        text: &str,
        priority: Priority,
        category: Option<&str>,
    ) -> ServiceResult<Task> {
        let mut task = Task::new(text, priority).map_err(RepoError::from)?;
        task.category = category.map(|name| name.trim().to_string());

        let id = self.repo.create_task(&task)?;
        info!(
            "event=task_add module=service status=ok priority={} categorized={}",
            task.priority,
            task.category.is_some()
        );
        self.read_back(id, "created task not found in read-back")
    }

    /// Flips completion state and returns the updated task.
    pub fn toggle_task(&self, id: TaskId) -> ServiceResult<Task> {
        let mut task = self
            .repo
            .get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        let completed = task.toggle_completed();
        self.repo.set_completed(id, completed)?;
        info!("event=task_toggle module=service status=ok completed={completed}");
        Ok(task)
    }

    /// Sets (`Some`) or clears (`None`) the task category.
    pub fn set_task_category(&self, id: TaskId, category: Option<&str>) -> ServiceResult<Task> {
        let category = category.map(str::trim);
        self.repo.set_category(id, category)?;
        self.read_back(id, "categorized task not found in read-back")
    }

    pub fn delete_task(&self, id: TaskId) -> ServiceResult<()> {
        self.repo.delete_task(id)?;
        info!("event=task_delete module=service status=ok");
        Ok(())
    }

    pub fn get_task(&self, id: TaskId) -> ServiceResult<Option<Task>> {
        Ok(self.repo.get_task(id)?)
    }

    /// Lists tasks by completion state and optional exact category.
    pub fn list_tasks(
        &self,
        filter: TaskFilter,
        category: Option<&str>,
    ) -> ServiceResult<Vec<Task>> {
        let query = TaskListQuery {
            filter,
            category: category.map(str::to_string),
        };
        Ok(self.repo.list_tasks(&query)?)
    }

    pub fn task_stats(&self) -> ServiceResult<TaskStats> {
        let tasks = self.repo.list_tasks(&TaskListQuery::default())?;
        let completed = tasks.iter().filter(|task| task.completed).count();
        Ok(TaskStats {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        })
    }

    pub fn list_categories(&self) -> ServiceResult<Vec<String>> {
        Ok(self.repo.list_categories()?)
    }

    /// Adds a category name and returns the stored form.
    pub fn add_category(&self, name: &str) -> ServiceResult<String> {
        let stored = self.repo.add_category(name)?;
        info!("event=category_add module=service status=ok");
        Ok(stored)
    }

    /// Deletes a category; referencing tasks become uncategorized.
    ///
    /// Returns the number of tasks that lost their category.
    pub fn delete_category(&mut self, name: &str) -> ServiceResult<usize> {
        let cleared = self.repo.delete_category(name)?;
        info!("event=category_delete module=service status=ok cleared_tasks={cleared}");
        Ok(cleared)
    }

    /// Ranks known categories for `input` against the current store snapshot.
    pub fn suggest_categories(&self, input: &str) -> ServiceResult<Vec<Suggestion>> {
        let started_at = Instant::now();
        let categories = self.repo.list_categories()?;
        let tasks = self.repo.list_tasks(&TaskListQuery::default())?;

        let suggestions = suggest_categories_with(&self.config, input, &categories, &tasks);
        debug!(
            "event=suggest_categories module=service status=ok input_chars={} categories={} tasks={} suggestions={} duration_ms={}",
            input.chars().count(),
            categories.len(),
            tasks.len(),
            suggestions.len(),
            started_at.elapsed().as_millis()
        );
        Ok(suggestions)
    }

    fn read_back(&self, id: TaskId, details: &'static str) -> ServiceResult<Task> {
        match self.repo.get_task(id)? {
            Some(task) => Ok(task),
            None => {
                warn!("event=read_back module=service status=error details={details}");
                Err(TaskServiceError::InconsistentState(details))
            }
        }
    }
}
