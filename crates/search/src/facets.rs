//! Facet computation
//!
//! Aggregate counts over the ranked+filtered result set, computed before
//! pagination so the counts reflect everything visible to the current
//! query and filters, not just the current page.
//!
//! Counts are taken AFTER type filtering: a facet for a disabled source
//! type reports 0, so facet widgets cannot preview what re-enabling a
//! type would add back (see DESIGN.md).

use unisearch_core::{Facets, Payload, UnifiedResult};

/// Derive facet counts from a result set
///
/// - `types`: results per source type
/// - `tags`: results per metadata tag
/// - `entity_types`: KG-sourced results per entity type; only payloads
///   that carry a type contribute
pub fn compute_facets(results: &[UnifiedResult]) -> Facets {
    let mut facets = Facets::new();

    for result in results {
        *facets.types.entry(result.source_type).or_insert(0) += 1;

        for tag in &result.metadata.tags {
            *facets.tags.entry(tag.clone()).or_insert(0) += 1;
        }

        if let Payload::Entity(entity) = &result.payload {
            *facets
                .entity_types
                .entry(entity.entity_type.clone())
                .or_insert(0) += 1;
        }
    }

    facets
}

// ============================================================================
// Tests
// ============================================================================
