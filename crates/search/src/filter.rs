//! Post-hoc result filtering
//!
//! A pure, order-preserving predicate pass over the ranked list. The
//! entity-type filter is applied upstream in the KG matcher and is not
//! duplicated here.

use unisearch_core::{SearchFilters, UnifiedResult};

/// Apply caller filters to a ranked result list
///
/// - Drops results whose source type is not enabled
/// - Drops results below the inclusive minimum score
/// - Drops dated results outside the date range; undated results always
///   pass (the date filter cannot exclude them)
/// - Drops results sharing no tag with a non-empty tag filter
pub fn apply_filters(results: Vec<UnifiedResult>, filters: &SearchFilters) -> Vec<UnifiedResult> {
    results
        .into_iter()
        .filter(|result| {
            if !filters.allows_type(result.source_type) {
                return false;
            }
            if let Some(min_score) = filters.min_score {
                if result.score < min_score {
                    return false;
                }
            }
            if let Some(range) = filters.date_range {
                if let Some(ts) = result.metadata.timestamp {
                    if !range.contains(ts) {
                        return false;
                    }
                }
            }
            if !filters.tags.is_empty()
                && !result.metadata.tags.iter().any(|t| filters.tags.contains(t))
            {
                return false;
            }
            true
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
