//! Fuzzy matching implementation.
//!
//! Uses SkimMatcherV2 for high-performance fuzzy matching with scoring.

use std::sync::OnceLock;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::select::Choice;

/// Global matcher instance for performance.
static GLOBAL_MATCHER: OnceLock<SkimMatcherV2> = OnceLock::new();

/// Get the global matcher instance.
fn global_matcher() -> &'static SkimMatcherV2 {
    GLOBAL_MATCHER.get_or_init(SkimMatcherV2::default)
}

/// Filter choices based on a query.
///
/// Returns (index, score) pairs sorted by score descending (best matches
/// first). Entries with equal scores keep their original order.
///
/// # Arguments
///
/// * `query` - The search query (empty query returns all choices with score 0)
/// * `choices` - Slice of choices to filter
/// * `search_details` - Whether to also search the detail text (the command)
///
/// # Examples
///
/// ```
/// use npm_scripts::filter::filter_choices;
/// use npm_scripts::select::Choice;
///
/// let choices: Vec<Choice> = ["dev", "build", "test"]
///     .iter()
///     .map(|name| Choice {
///         label: name.to_string(),
///         key: name.to_string(),
///         scope: None,
///         detail: None,
///     })
///     .collect();
///
/// let results = filter_choices("dev", &choices, false);
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].0, 0); // "dev" is at index 0
/// ```
pub fn filter_choices(query: &str, choices: &[Choice], search_details: bool) -> Vec<(usize, i64)> {
    if query.is_empty() {
        return (0..choices.len()).map(|i| (i, 0)).collect();
    }

    let matcher = global_matcher();
    let query_lower = query.to_lowercase();

    let mut matches: Vec<(usize, i64)> = Vec::with_capacity(choices.len().min(32));

    // Reusable buffer for lowercase conversion
    let mut buffer = String::with_capacity(64);

    for (idx, choice) in choices.iter().enumerate() {
        buffer.clear();
        buffer.extend(choice.label.chars().flat_map(|c| c.to_lowercase()));

        if let Some(score) = matcher.fuzzy_match(&buffer, &query_lower) {
            matches.push((idx, score));
            continue;
        }

        if search_details {
            if let Some(detail) = &choice.detail {
                buffer.clear();
                buffer.extend(detail.chars().flat_map(|c| c.to_lowercase()));

                if let Some(score) = matcher.fuzzy_match(&buffer, &query_lower) {
                    // Detail matches get lower priority (half score)
                    matches.push((idx, score / 2));
                }
            }
        }
    }

    matches.sort_by(|a, b| b.1.cmp(&a.1));

    matches
}

/// Get the indices of matched characters in the text.
///
/// This is useful for highlighting matched portions of text in the UI.
///
/// # Examples
///
/// ```
/// use npm_scripts::filter::get_match_indices;
///
/// let indices = get_match_indices("bd", "build");
/// assert_eq!(indices, vec![0, 4]); // 'b' at 0, 'd' at 4
/// ```
pub fn get_match_indices(query: &str, text: &str) -> Vec<usize> {
    if query.is_empty() || text.is_empty() {
        return Vec::new();
    }

    let matcher = global_matcher();
    let query_lower = query.to_lowercase();
    let text_lower = text.to_lowercase();

    matcher
        .fuzzy_indices(&text_lower, &query_lower)
        .map(|(_, indices)| indices)
        .unwrap_or_default()
}
