use todolist_core::{
    suggest_categories, suggest_categories_with, Priority, Suggestion, SuggestionConfig, Task,
};

fn categories(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn task(text: &str, category: &str) -> Task {
    Task::new(text, Priority::Medium)
        .unwrap()
        .in_category(category)
}

fn names(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions
        .iter()
        .map(|suggestion| suggestion.category.as_str())
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn short_input_or_no_categories_yields_nothing() {
    let tasks = vec![task("finish work report", "Work")];
    let cats = categories(&["Work"]);

    assert!(suggest_categories("wo", &cats, &tasks).is_empty());
    assert!(suggest_categories("   wo   ", &cats, &tasks).is_empty());
    assert!(suggest_categories("", &cats, &tasks).is_empty());
    assert!(suggest_categories("work", &[], &tasks).is_empty());
}

#[test]
fn category_name_in_input_ranks_first_with_high_confidence() {
    let cats = categories(&["Work", "Personal"]);
    let tasks = vec![task("finish work report", "Work")];

    let suggestions = suggest_categories("work", &cats, &tasks);

    assert_eq!(names(&suggestions), vec!["Work"]);
    let work = &suggestions[0];
    assert!(work.score >= 30.0);
    assert!(work.confidence >= 60);
    assert_eq!(work.matches, vec!["exact match", "100% similar", "work"]);
    // 50 exact + 15 similarity + 3 keyword + 0.5 substring + popularity.
    assert_close(work.score, 68.5 + 2f64.ln() * 0.5);
}

#[test]
fn exact_match_is_capped_at_full_confidence() {
    let suggestions = suggest_categories("shopping", &categories(&["shopping"]), &[]);

    assert_eq!(suggestions.len(), 1);
    assert!(suggestions[0].score >= 50.0);
    assert_eq!(suggestions[0].confidence, 100);
    assert!(suggestions[0].matches.iter().any(|tag| tag == "exact match"));
}

#[test]
fn contains_category_scores_thirty_points() {
    let suggestions = suggest_categories("call home tonight", &categories(&["Home"]), &[]);

    assert_eq!(suggestions.len(), 1);
    assert_close(suggestions[0].score, 30.0);
    assert_eq!(suggestions[0].confidence, 60);
    assert_eq!(suggestions[0].matches, vec!["contains category"]);
}

#[test]
fn keyword_history_drives_suggestions() {
    let cats = categories(&["Work", "Home", "Errands"]);
    let tasks = vec![
        task("Prepare quarterly report", "Work"),
        task("Email report to boss", "Work"),
        task("Mow the lawn", "Home"),
        task("Fix garden fence", "Home"),
    ];

    let suggestions = suggest_categories("Write quarterly report", &cats, &tasks);

    assert_eq!(names(&suggestions), vec!["Work"]);
    let work = &suggestions[0];
    assert_eq!(work.matches, vec!["quarterly", "report"]);
    // quarterly 1*1*3 + report 2*1*3, substring 0.5 + 1.0, popularity ln(3)/2.
    assert_close(work.score, 10.5 + 3f64.ln() * 0.5);
    assert_eq!(work.confidence, 22);
}

#[test]
fn shared_keywords_are_weighted_down_and_ties_keep_category_order() {
    let tasks = vec![
        task("clean office desk", "Work"),
        task("clean kitchen", "Home"),
    ];

    let forward = suggest_categories("clean", &categories(&["Work", "Home"]), &tasks);
    assert_eq!(names(&forward), vec!["Work", "Home"]);
    // clean: 1 * 0.5 * 3 + substring 0.5 + popularity ln(2)/2.
    assert_close(forward[0].score, 2.0 + 2f64.ln() * 0.5);
    assert_close(forward[0].score, forward[1].score);

    let reversed = suggest_categories("clean", &categories(&["Home", "Work"]), &tasks);
    assert_eq!(names(&reversed), vec!["Home", "Work"]);
}

#[test]
fn popularity_alone_is_below_the_score_threshold() {
    let tasks = vec![
        task("mow the lawn", "Home"),
        task("paint fence", "Home"),
        task("water plants", "Home"),
    ];

    let suggestions = suggest_categories("unrelated thing", &categories(&["Home"]), &tasks);
    assert!(suggestions.is_empty());
}

#[test]
fn fuzzy_name_similarity_is_tagged_with_percent() {
    let suggestions = suggest_categories("shoping", &categories(&["Shopping"]), &[]);

    assert_eq!(suggestions.len(), 1);
    assert_close(suggestions[0].score, 13.0);
    assert_eq!(suggestions[0].confidence, 26);
    assert_eq!(suggestions[0].matches, vec!["88% similar"]);
}

#[test]
fn exact_keyword_is_also_counted_by_substring_matching() {
    let tasks = vec![task("running shoes", "Fitness")];

    let suggestions = suggest_categories("running", &categories(&["Fitness"]), &tasks);

    assert_eq!(suggestions.len(), 1);
    assert_close(suggestions[0].score, 3.0 + 0.5 + 2f64.ln() * 0.5);
    assert_eq!(suggestions[0].matches, vec!["running"]);
}

#[test]
fn results_are_limited_to_four_and_sorted_by_score() {
    let cats = categories(&[
        "project alpha",
        "project beta",
        "project gamma",
        "project delta",
        "project omega",
        "Project",
    ]);

    let suggestions = suggest_categories("project", &cats, &[]);

    assert_eq!(
        names(&suggestions),
        vec!["Project", "project alpha", "project beta", "project gamma"]
    );
    assert!(suggestions
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
    assert_eq!(suggestions[1].matches, vec!["partial category"]);
    assert_eq!(suggestions[1].confidence, 40);
}

#[test]
fn repeated_calls_are_identical() {
    let cats = categories(&["Work", "Home"]);
    let tasks = vec![
        task("clean office desk", "Work"),
        task("clean kitchen", "Home"),
    ];

    let first = suggest_categories("clean the office", &cats, &tasks);
    let second = suggest_categories("clean the office", &cats, &tasks);
    assert_eq!(first, second);
}

#[test]
fn non_ascii_input_does_not_fail() {
    let cats = categories(&["仕事"]);
    let tasks = vec![task("レポートを書く", "仕事")];

    assert!(suggest_categories("日本語のテキスト", &cats, &tasks).is_empty());
}

#[test]
fn custom_config_changes_limits() {
    let config = SuggestionConfig {
        max_suggestions: 1,
        min_input_chars: 1,
        ..SuggestionConfig::default()
    };
    let cats = categories(&["ab", "abc"]);

    let suggestions = suggest_categories_with(&config, "ab", &cats, &[]);
    assert_eq!(names(&suggestions), vec!["ab"]);
}
