//! String similarity and keyword uniqueness scoring.

use crate::suggest::profile::CategoryData;

/// Normalized edit-distance similarity in `[0, 1]`.
///
/// Computed as `(len(longer) - levenshtein(a, b)) / len(longer)` over
/// characters. Two empty strings are identical (`1.0`). The result does not
/// depend on argument order.
pub fn calculate_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }

    let distance = strsim::levenshtein(a, b);
    (longest - distance) as f64 / longest as f64
}

/// Inverse of the number of categories whose profile contains `keyword`.
///
/// Returns `1.0` when no category contains it. Scoring only asks about
/// keywords already found in some profile, so that branch is not expected
/// to be hit in practice.
pub fn calculate_keyword_uniqueness(keyword: &str, data: &CategoryData) -> f64 {
    let sharing = data
        .values()
        .filter(|profile| profile.keyword_count(keyword) > 0)
        .count();
    if sharing == 0 {
        1.0
    } else {
        1.0 / sharing as f64
    }
}

#[cfg(test)]
mod tests {
    use super::{calculate_keyword_uniqueness, calculate_similarity};
    use crate::suggest::profile::{CategoryData, CategoryProfile};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn identical_strings_are_fully_similar() {
        for value in ["", "a", "work", "groceries and errands"] {
            assert_close(calculate_similarity(value, value), 1.0);
        }
    }

    #[test]
    fn empty_against_non_empty_is_zero() {
        assert_close(calculate_similarity("", "abc"), 0.0);
        assert_close(calculate_similarity("abc", ""), 0.0);
    }

    #[test]
    fn ratio_uses_longer_length() {
        // kitten -> sitting needs three edits; longer length is seven.
        assert_close(calculate_similarity("kitten", "sitting"), 4.0 / 7.0);
        assert_close(calculate_similarity("work", "works"), 0.8);
    }

    #[test]
    fn similarity_is_symmetric() {
        let pairs = [
            ("shopping", "shop"),
            ("personal", "persona"),
            ("errands", "garden"),
            ("", "x"),
            ("héllo", "hello"),
        ];
        for (a, b) in pairs {
            assert_close(calculate_similarity(a, b), calculate_similarity(b, a));
        }
    }

    #[test]
    fn multibyte_characters_count_once() {
        assert_close(calculate_similarity("café", "cafe"), 0.75);
    }

    #[test]
    fn uniqueness_is_inverse_of_sharing_categories() {
        let mut data = CategoryData::new();
        for (category, keywords) in [
            ("Work", &["report", "meeting"][..]),
            ("Home", &["report", "garden"][..]),
            ("Shopping", &["milk"][..]),
        ] {
            let mut profile = CategoryProfile::default();
            for keyword in keywords {
                profile.keywords.insert((*keyword).to_string(), 1);
            }
            profile.task_count = 1;
            data.insert(category.to_string(), profile);
        }

        assert_close(calculate_keyword_uniqueness("report", &data), 0.5);
        assert_close(calculate_keyword_uniqueness("garden", &data), 1.0);
        assert_close(calculate_keyword_uniqueness("unknown", &data), 1.0);
    }

    #[test]
    fn zero_counts_do_not_share_a_keyword() {
        let mut data = CategoryData::new();
        let mut present = CategoryProfile::default();
        present.keywords.insert("report".to_string(), 2);
        let mut zeroed = CategoryProfile::default();
        zeroed.keywords.insert("report".to_string(), 0);
        data.insert("A".to_string(), present);
        data.insert("B".to_string(), zeroed);

        assert_close(calculate_keyword_uniqueness("report", &data), 1.0);
    }
}
