//! Category name rules.
//!
//! Categories have no identity beyond their name. Names are case-sensitive:
//! `Work` and `work` are two different categories.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures for category names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    Empty,
}

impl Display for CategoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "category name must not be empty"),
        }
    }
}

impl Error for CategoryValidationError {}

/// Trims a user-entered category name, preserving case.
pub fn normalize_category_name(raw: &str) -> Result<String, CategoryValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CategoryValidationError::Empty);
    }
    Ok(trimmed.to_string())
}
