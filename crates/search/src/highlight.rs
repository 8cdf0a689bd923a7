//! Excerpt builder with highlight offset tracking
//!
//! Shared by the source matchers to produce bounded-length text windows
//! around keyword matches. Highlight offsets are relative to the excerpt
//! slice, never to the original text.

use crate::tokenizer::find_ignore_case;
use unisearch_core::{Excerpt, HighlightSpan};

/// Characters of context kept on each side of a matched keyword
pub const EXCERPT_RADIUS: usize = 50;

/// Build an excerpt around the first occurrence of `keyword` in `text`
///
/// Locates the first ASCII case-insensitive occurrence, keeps
/// [`EXCERPT_RADIUS`] bytes of context on each side (clamped to UTF-8
/// character boundaries), and records a highlight span covering the
/// matched keyword relative to the slice. Returns `None` when the
/// keyword does not occur. Case folding is ASCII-only, so a keyword
/// differing from the text only in non-ASCII case ("résumé" vs "RÉSUMÉ")
/// yields no excerpt.
pub fn build_excerpt(field: &str, text: &str, keyword: &str) -> Option<Excerpt> {
    let idx = find_ignore_case(text, keyword)?;

    let mut start = idx.saturating_sub(EXCERPT_RADIUS);
    while !text.is_char_boundary(start) {
        start -= 1;
    }

    let mut end = (idx + keyword.len() + EXCERPT_RADIUS).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }

    Some(Excerpt {
        field: field.to_string(),
        text: text[start..end].to_string(),
        highlights: vec![HighlightSpan {
            start: idx - start,
            end: idx - start + keyword.len(),
        }],
    })
}
