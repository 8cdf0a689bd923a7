//! Basic tokenizer for query analysis
//!
//! This module provides simple text tokenization for search operations.
//! Splitting happens on whitespace only, so query-syntax tokens such as
//! `type:org` or ISO dates survive intact for the intent analyzer.

/// Tokenize text into lowercase searchable terms
///
/// - Split on whitespace
/// - Drop empty tokens
/// - Lowercase
///
/// # Example
///
/// ```
/// use unisearch_search::tokenizer::tokenize;
///
/// let tokens = tokenize("Revenue  Summary");
/// assert_eq!(tokens, vec!["revenue", "summary"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

/// Tokenize and deduplicate, preserving first-seen order
///
/// # Example
///
/// ```
/// use unisearch_search::tokenizer::tokenize_unique;
///
/// let tokens = tokenize_unique("test test TEST");
/// assert_eq!(tokens, vec!["test"]);
/// ```
pub fn tokenize_unique(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// ASCII case-insensitive substring test
///
/// Byte-wise comparison keeps any derived offsets valid for the original
/// text, which lowercase remapping would not guarantee. Folding is
/// ASCII-only: non-ASCII case pairs ("É" vs "é") never match.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    find_ignore_case(haystack, needle).is_some()
}

/// Byte offset of the first ASCII case-insensitive occurrence
///
/// Folding is ASCII-only, like [`contains_ignore_case`].
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}
