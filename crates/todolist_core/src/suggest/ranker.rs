//! Category suggestion ranking.
//!
//! # Responsibility
//! - Score every known category against a piece of task text.
//! - Shape the top candidates into [`Suggestion`] values for the caller.
//!
//! # Invariants
//! - Ranking is a pure function of `(input, categories, tasks, config)`.
//! - At most `max_suggestions` entries, sorted by descending score; ties keep
//!   the order of the category list.
//! - Every returned entry has `score > min_score`.
//! - Nothing in this module fails or panics for any input.

use crate::model::task::Task;
use crate::suggest::keywords::extract_keywords;
use crate::suggest::profile::{build_category_data, CategoryData, CategoryProfile};
use crate::suggest::similarity::{calculate_keyword_uniqueness, calculate_similarity};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

const EXACT_MATCH_TAG: &str = "exact match";
const CONTAINS_CATEGORY_TAG: &str = "contains category";
const PARTIAL_CATEGORY_TAG: &str = "partial category";

/// One ranked category candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    /// Raw accumulated score.
    pub score: f64,
    /// `0..=100`, score scaled against the exact-match anchor.
    pub confidence: u8,
    /// Up to `max_match_reasons` distinct reasons, in discovery order.
    pub matches: Vec<String>,
}

/// Tunable weights and limits for [`suggest_categories_with`].
///
/// The default values are calibrated together: an exact name match alone
/// scores `exact_match_weight`, which equals `confidence_anchor`, so it maps
/// to 100% confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Trimmed input shorter than this (in characters) yields no suggestions.
    pub min_input_chars: usize,
    pub max_suggestions: usize,
    pub max_match_reasons: usize,
    /// Candidates must score strictly above this.
    pub min_score: f64,
    pub exact_match_weight: f64,
    pub contains_category_weight: f64,
    pub partial_category_weight: f64,
    /// Similarity must be strictly above this to count.
    pub similarity_threshold: f64,
    pub similarity_weight: f64,
    pub keyword_weight: f64,
    /// Input keywords need more characters than this for substring matching.
    pub substring_min_keyword_chars: usize,
    pub substring_weight: f64,
    pub popularity_weight: f64,
    pub confidence_anchor: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            min_input_chars: 3,
            max_suggestions: 4,
            max_match_reasons: 3,
            min_score: 2.0,
            exact_match_weight: 50.0,
            contains_category_weight: 30.0,
            partial_category_weight: 20.0,
            similarity_threshold: 0.6,
            similarity_weight: 15.0,
            keyword_weight: 3.0,
            substring_min_keyword_chars: 3,
            substring_weight: 0.5,
            popularity_weight: 0.5,
            confidence_anchor: 50.0,
        }
    }
}

/// Rejected [`SuggestionConfig`] values.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveAnchor(f64),
    ZeroSuggestionLimit,
    NonFiniteWeight(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAnchor(value) => {
                write!(f, "confidence_anchor must be > 0, got {value}")
            }
            Self::ZeroSuggestionLimit => write!(f, "max_suggestions must be at least 1"),
            Self::NonFiniteWeight(field) => write!(f, "`{field}` must be a finite number"),
        }
    }
}

impl Error for ConfigError {}

impl SuggestionConfig {
    /// Checks that the configuration cannot produce NaN or empty rankings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("min_score", self.min_score),
            ("exact_match_weight", self.exact_match_weight),
            ("contains_category_weight", self.contains_category_weight),
            ("partial_category_weight", self.partial_category_weight),
            ("similarity_threshold", self.similarity_threshold),
            ("similarity_weight", self.similarity_weight),
            ("keyword_weight", self.keyword_weight),
            ("substring_weight", self.substring_weight),
            ("popularity_weight", self.popularity_weight),
            ("confidence_anchor", self.confidence_anchor),
        ];
        for (field, value) in weights {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight(field));
            }
        }
        if self.confidence_anchor <= 0.0 {
            return Err(ConfigError::NonPositiveAnchor(self.confidence_anchor));
        }
        if self.max_suggestions == 0 {
            return Err(ConfigError::ZeroSuggestionLimit);
        }
        Ok(())
    }
}

/// Ranks `categories` for `input` using the default configuration.
pub fn suggest_categories(input: &str, categories: &[String], tasks: &[Task]) -> Vec<Suggestion> {
    suggest_categories_with(&SuggestionConfig::default(), input, categories, tasks)
}

/// Ranks `categories` for `input` with explicit weights.
///
/// Returns an empty list when the trimmed input is too short or there are no
/// categories. The caller decides how to present "no suggestions".
pub fn suggest_categories_with(
    config: &SuggestionConfig,
    input: &str,
    categories: &[String],
    tasks: &[Task],
) -> Vec<Suggestion> {
    let input = input.trim().to_lowercase();
    if input.chars().count() < config.min_input_chars || categories.is_empty() {
        return Vec::new();
    }

    let data = build_category_data(tasks);
    let input_keywords = extract_keywords(&input);

    let mut ranked: Vec<Suggestion> = categories
        .iter()
        .map(|category| score_category(config, &input, &input_keywords, category, &data))
        .filter(|suggestion| suggestion.score > config.min_score)
        .collect();

    // `sort_by` is stable, so equal scores keep category-list order.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked.truncate(config.max_suggestions);
    ranked
}

fn score_category(
    config: &SuggestionConfig,
    input: &str,
    input_keywords: &[String],
    category: &str,
    data: &CategoryData,
) -> Suggestion {
    let name = category.to_lowercase();
    let mut score = 0.0;
    let mut matches: Vec<String> = Vec::new();

    if input == name {
        score += config.exact_match_weight;
        matches.push(EXACT_MATCH_TAG.to_string());
    } else if input.contains(name.as_str()) {
        score += config.contains_category_weight;
        matches.push(CONTAINS_CATEGORY_TAG.to_string());
    } else if name.contains(input) {
        score += config.partial_category_weight;
        matches.push(PARTIAL_CATEGORY_TAG.to_string());
    }

    let similarity = calculate_similarity(input, &name);
    if similarity > config.similarity_threshold {
        score += (similarity * config.similarity_weight).floor();
        matches.push(format!("{}% similar", (similarity * 100.0).round() as u32));
    }

    if let Some(profile) = data.get(category) {
        score += keyword_overlap(config, input_keywords, profile, data, &mut matches);
        score += substring_overlap(config, input_keywords, profile);
    }

    let task_count = data.get(category).map_or(0, |profile| profile.task_count);
    score += f64::from(task_count).ln_1p() * config.popularity_weight;

    Suggestion {
        category: category.to_string(),
        score,
        confidence: confidence(score, config.confidence_anchor),
        matches: dedup_reasons(matches, config.max_match_reasons),
    }
}

fn keyword_overlap(
    config: &SuggestionConfig,
    input_keywords: &[String],
    profile: &CategoryProfile,
    data: &CategoryData,
    matches: &mut Vec<String>,
) -> f64 {
    let mut score = 0.0;
    for keyword in input_keywords {
        let frequency = profile.keyword_count(keyword);
        if frequency == 0 {
            continue;
        }
        let uniqueness = calculate_keyword_uniqueness(keyword, data);
        score += f64::from(frequency) * uniqueness * config.keyword_weight;
        matches.push(keyword.clone());
    }
    score
}

// An input keyword equal to a profile keyword is counted here as well as in
// `keyword_overlap`.
fn substring_overlap(
    config: &SuggestionConfig,
    input_keywords: &[String],
    profile: &CategoryProfile,
) -> f64 {
    let mut score = 0.0;
    for (category_keyword, frequency) in &profile.keywords {
        for keyword in input_keywords {
            if keyword.len() > config.substring_min_keyword_chars
                && category_keyword.contains(keyword.as_str())
            {
                score += f64::from(*frequency) * config.substring_weight;
            }
        }
    }
    score
}

fn confidence(score: f64, anchor: f64) -> u8 {
    let scaled = ((score / anchor) * 100.0).floor();
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 100.0) as u8
}

fn dedup_reasons(reasons: Vec<String>, limit: usize) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(limit);
    for reason in reasons {
        if unique.len() == limit {
            break;
        }
        if !unique.contains(&reason) {
            unique.push(reason);
        }
    }
    unique
}
