//! Result fusion and ranking
//!
//! Concatenated per-source candidates are sorted with a stable comparator
//! per sort key. Ties keep their input order — a correctness invariant,
//! not an optimization detail. Ascending order reverses the sorted
//! output instead of re-sorting with swapped operands, so ascending tie
//! order is the exact reverse of descending tie order.

use chrono::{DateTime, Utc};
use unisearch_core::{SearchOptions, SortBy, SortOrder, UnifiedResult};

/// Rank fused candidates according to the caller's sort options
///
/// The sort is stable: for equal keys, relative order matches the
/// pre-sort input order.
pub fn rank(mut results: Vec<UnifiedResult>, options: &SearchOptions) -> Vec<UnifiedResult> {
    match options.sort_by {
        SortBy::Relevance => results.sort_by(|a, b| b.score.total_cmp(&a.score)),
        SortBy::Confidence => results.sort_by(|a, b| confidence(b).total_cmp(&confidence(a))),
        SortBy::Type => {
            results.sort_by(|a, b| a.source_type.label().cmp(b.source_type.label()));
        }
        SortBy::Date => results.sort_by(|a, b| timestamp(b).cmp(&timestamp(a))),
    }

    if options.sort_order == SortOrder::Asc {
        results.reverse();
    }
    results
}

/// Missing confidence sorts as 0
fn confidence(result: &UnifiedResult) -> f32 {
    result.metadata.confidence.unwrap_or(0.0)
}

/// Missing timestamp sorts as the epoch
fn timestamp(result: &UnifiedResult) -> DateTime<Utc> {
    result.metadata.timestamp.unwrap_or(DateTime::UNIX_EPOCH)
}

// ============================================================================
// Tests
// ============================================================================
