//! Per-category keyword profiles derived from task history.
//!
//! Profiles are a pure projection of `(task.text, task.category)` pairs and
//! are rebuilt for every suggestion request. Nothing here is persisted.

use crate::model::task::Task;
use crate::suggest::keywords::extract_keywords;
use std::collections::BTreeMap;

/// Keyword statistics for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryProfile {
    /// Keyword -> number of occurrences across the category's tasks.
    pub keywords: BTreeMap<String, u32>,
    /// Number of tasks filed under the category.
    pub task_count: u32,
}

impl CategoryProfile {
    /// Occurrence count of `keyword`, zero when absent.
    pub fn keyword_count(&self, keyword: &str) -> u32 {
        self.keywords.get(keyword).copied().unwrap_or(0)
    }

    fn record_task(&mut self, text: &str) {
        self.task_count += 1;
        for keyword in extract_keywords(&text.to_lowercase()) {
            *self.keywords.entry(keyword).or_default() += 1;
        }
    }
}

/// Category name -> profile. Categories without tasks are absent.
pub type CategoryData = BTreeMap<String, CategoryProfile>;

/// Builds keyword profiles for every category referenced by `tasks`.
pub fn build_category_data<'a, I>(tasks: I) -> CategoryData
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut data = CategoryData::new();
    for task in tasks {
        let Some(category) = task.category.as_deref() else {
            continue;
        };
        data.entry(category.to_string())
            .or_default()
            .record_task(&task.text);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::build_category_data;
    use crate::model::task::{Priority, Task};

    fn task(text: &str, category: Option<&str>) -> Task {
        let task = Task::new(text, Priority::Medium).unwrap();
        match category {
            Some(name) => task.in_category(name),
            None => task,
        }
    }

    #[test]
    fn uncategorized_tasks_are_ignored() {
        let tasks = vec![task("finish report", None)];
        assert!(build_category_data(&tasks).is_empty());
    }

    #[test]
    fn counts_tasks_and_keywords_per_category() {
        let tasks = vec![
            task("Finish quarterly REPORT", Some("Work")),
            task("Review report draft", Some("Work")),
            task("Buy groceries", Some("Shopping")),
        ];
        let data = build_category_data(&tasks);

        let work = &data["Work"];
        assert_eq!(work.task_count, 2);
        assert_eq!(work.keyword_count("report"), 2);
        assert_eq!(work.keyword_count("quarterly"), 1);
        assert_eq!(work.keyword_count("groceries"), 0);

        let shopping = &data["Shopping"];
        assert_eq!(shopping.task_count, 1);
        assert_eq!(shopping.keyword_count("groceries"), 1);
    }

    #[test]
    fn category_names_are_case_sensitive() {
        let tasks = vec![
            task("plan sprint", Some("Work")),
            task("plan garden", Some("work")),
        ];
        let data = build_category_data(&tasks);
        assert_eq!(data.len(), 2);
        assert_eq!(data["Work"].task_count, 1);
        assert_eq!(data["work"].task_count, 1);
    }

    #[test]
    fn task_with_only_stop_words_still_counts() {
        let tasks = vec![task("do it", Some("Misc"))];
        let data = build_category_data(&tasks);
        assert_eq!(data["Misc"].task_count, 1);
        assert!(data["Misc"].keywords.is_empty());
    }
}
