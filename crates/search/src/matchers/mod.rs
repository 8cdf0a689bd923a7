//! Source matchers
//!
//! This module provides:
//! - SourceMatcher trait shared by all per-source implementations
//! - RagMatcher: lexical scoring over RAG chunks
//! - KgMatcher: entity and relation scoring over the knowledge graph
//! - IdpMatcher: metadata-entry and classification scoring
//!
//! Matchers are pure functions of `(intent, snapshot)`: no shared mutable
//! state, so they may run independently and concurrently without
//! synchronization.

mod idp;
mod kg;
mod rag;

pub use idp::IdpMatcher;
pub use kg::KgMatcher;
pub use rag::RagMatcher;

use crate::intent::QueryIntent;
use unisearch_core::{Result, SearchSnapshot, SourceType, UnifiedResult};

// ============================================================================
// SourceMatcher Trait
// ============================================================================

/// Per-source candidate producer
///
/// Each matcher scores its own dataset against the query keywords and
/// returns candidate results with matched fields and excerpt spans. A
/// matcher is called only when its source type is in the intent's
/// candidate set AND in the caller's enabled-types filter.
///
/// # Invariant
///
/// Matchers never emit zero-score results; a score of 0 means the record
/// is simply not a candidate.
///
/// # Thread Safety
///
/// Matchers must be Send + Sync so the orchestrator can fan out across
/// sources in parallel.
pub trait SourceMatcher: Send + Sync {
    /// Which source dataset this matcher searches
    fn source_type(&self) -> SourceType;

    /// Produce scored candidates for the query
    ///
    /// # Errors
    ///
    /// Returns [`unisearch_core::Error::MalformedSource`] when the
    /// snapshot holds a record this matcher cannot interpret. The
    /// orchestrator isolates such failures to the offending source.
    fn find(&self, intent: &QueryIntent, snapshot: &SearchSnapshot) -> Result<Vec<UnifiedResult>>;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}

/// The standard matcher set, one per source type
pub fn default_matchers() -> Vec<Box<dyn SourceMatcher>> {
    vec![
        Box::new(RagMatcher),
        Box::new(KgMatcher),
        Box::new(IdpMatcher),
    ]
}

/// Record a matched field name once, preserving first-match order
pub(crate) fn push_field(fields: &mut Vec<String>, field: &str) {
    if !fields.iter().any(|f| f == field) {
        fields.push(field.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matchers_cover_all_sources() {
        let matchers = default_matchers();
        let types: Vec<SourceType> = matchers.iter().map(|m| m.source_type()).collect();
        assert_eq!(types.len(), 3);
        for source in SourceType::all() {
            assert!(types.contains(&source));
        }
    }

    #[test]
    fn test_push_field_deduplicates() {
        let mut fields = Vec::new();
        push_field(&mut fields, "content");
        push_field(&mut fields, "title");
        push_field(&mut fields, "content");
        assert_eq!(fields, vec!["content", "title"]);
    }

    #[test]
    fn test_matchers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RagMatcher>();
        assert_send_sync::<KgMatcher>();
        assert_send_sync::<IdpMatcher>();
    }
}
