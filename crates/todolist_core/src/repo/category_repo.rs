//! Category list persistence.
//!
//! # Invariants
//! - Names are unique and case-sensitive (`BINARY` collation).
//! - Listing returns categories in insertion order.
//! - Deleting a category clears it on referencing tasks in the same
//!   transaction; tasks themselves are kept.

use crate::model::category::normalize_category_name;
use crate::repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository};
use rusqlite::{Connection, TransactionBehavior};

/// Repository interface for the category name list.
pub trait CategoryRepository {
    fn list_categories(&self) -> RepoResult<Vec<String>>;
    /// Adds a category and returns the stored (trimmed) name.
    fn add_category(&self, name: &str) -> RepoResult<String>;
    /// Removes a category and returns how many tasks were uncategorized.
    fn delete_category(&mut self, name: &str) -> RepoResult<usize>;
}

impl CategoryRepository for SqliteTaskRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM categories ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut names = Vec::new();
        while let Some(row) = rows.next()? {
            names.push(row.get("name")?);
        }
        Ok(names)
    }

    fn add_category(&self, name: &str) -> RepoResult<String> {
        let name = normalize_category_name(name)?;
        if category_exists(self.conn, &name)? {
            return Err(RepoError::DuplicateCategory(name));
        }

        self.conn
            .execute("INSERT INTO categories (name) VALUES (?1);", [name.as_str()])?;
        Ok(name)
    }

    fn delete_category(&mut self, name: &str) -> RepoResult<usize> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !category_exists(&tx, name)? {
            return Err(RepoError::CategoryNotFound(name.to_string()));
        }

        let cleared = tx.execute(
            "UPDATE tasks SET category = NULL WHERE category = ?1;",
            [name],
        )?;
        tx.execute("DELETE FROM categories WHERE name = ?1;", [name])?;
        tx.commit()?;

        Ok(cleared)
    }
}

pub(crate) fn category_exists(conn: &Connection, name: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE name = ?1);",
        [name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
