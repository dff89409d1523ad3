//! Keyword extraction for category matching.
//!
//! # Invariants
//! - Output preserves input order and duplicates.
//! - Every keyword is `[a-z0-9]{3,}` and not a stop word.
//! - Extraction is pure and never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Fragments shorter than this are dropped.
const MIN_KEYWORD_CHARS: usize = 3;

static DELIMITER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s,.:;!?()\-]+").expect("valid delimiter regex"));
static NON_ALNUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("valid non-alnum regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "is", "at", "which", "on", "and", "a", "an", "as", "are", "was", "were", "been",
        "be", "have", "has", "had", "do", "does", "did", "will", "would", "could", "should",
        "may", "might", "must", "can", "shall", "to", "of", "in", "for", "with", "by", "from",
        "up", "about", "into", "through", "during", "before", "after", "above", "below",
        "between", "under", "again", "further", "then", "once", "here", "there", "when", "where",
        "why", "how", "all", "both", "each", "few", "more", "most", "other", "some", "such",
        "only", "own", "same", "than", "too", "very", "just", "but", "not", "this", "that",
        "these", "those", "out", "off", "over", "any", "its", "our", "your", "their", "what",
        "who", "get", "need",
    ]
    .into_iter()
    .collect()
});

/// Returns whether `word` is in the built-in English stop-word list.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Splits already lower-cased text into meaningful keywords.
///
/// Fragments are separated by whitespace and `, . : ; ! ? ( ) -`. Each
/// fragment is reduced to its `[a-z0-9]` characters, then dropped when it is
/// shorter than three characters or a stop word.
pub fn extract_keywords(text: &str) -> Vec<String> {
    DELIMITER_RE
        .split(text)
        .map(|fragment| NON_ALNUM_RE.replace_all(fragment, "").into_owned())
        .filter(|word| word.len() >= MIN_KEYWORD_CHARS)
        .filter(|word| !is_stop_word(word))
        .collect()
}
