//! Search API contract tests
//!
//! End-to-end checks of the public `SearchEngine` surface: merged
//! multi-source results, scoring, filtering, facets, pagination, error
//! taxonomy, and per-source failure isolation.

use chrono::{TimeZone, Utc};
use unisearch_search::{
    DateRange, Error, KgEntity, KgRelation, RagChunk, SearchEngine, SearchFilters, SearchOptions,
    SearchSnapshot, SortBy, SortOrder, SourceType,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

fn corpus() -> SearchSnapshot {
    SearchSnapshot::new()
        .with_rag_chunks(vec![
            RagChunk::new("c1", "Revenue Summary", "Revenue grew 12% in Q3")
                .with_index(0)
                .with_token_count(7)
                .with_tags(vec!["finance".into(), "q3".into()]),
            RagChunk::new("c2", "Hiring Plan", "Headcount targets for engineering")
                .with_index(1)
                .with_token_count(5)
                .with_tags(vec!["people".into()]),
        ])
        .with_kg_entities(vec![
            KgEntity::new("e1", "Acme Corp", "ORG").with_confidence(0.95),
            KgEntity::new("e2", "Revenue Department", "ORG").with_confidence(0.6),
            KgEntity::new("e3", "Jane Smith", "PERSON").with_confidence(0.8),
        ])
        .with_kg_relations(vec![KgRelation::new("e2", "e1", "REPORTS_TO")])
        .with_idp_metadata(vec![
            ("subject".into(), "revenue forecast".into()),
            ("author".into(), "finance team".into()),
        ])
        .with_idp_classifications(vec!["revenue report".into(), "internal memo".into()])
}

// ============================================================================
// Merged Result Contracts
// ============================================================================

#[test]
fn test_single_keyword_merges_sources() {
    let mut engine = SearchEngine::new();
    let output = engine.search("revenue", &corpus()).unwrap();

    let types: Vec<SourceType> = output.results.iter().map(|r| r.source_type).collect();
    assert!(types.contains(&SourceType::Rag));
    assert!(types.contains(&SourceType::Kg));
    assert!(types.contains(&SourceType::Idp));

    // Title + content hit on the chunk: (2.0 + 1.0) / 1 keyword.
    let chunk = output
        .results
        .iter()
        .find(|r| r.id == "rag-chunk-c1")
        .unwrap();
    assert!((chunk.score - 3.0).abs() < f32::EPSILON);
    assert!(chunk.matched_fields.contains(&"title".to_string()));
    assert!(chunk.matched_fields.contains(&"content".to_string()));
}

#[test]
fn test_result_ids_are_stable_and_prefixed() {
    let mut engine = SearchEngine::new();
    let output = engine.search("revenue", &corpus()).unwrap();

    for result in &output.results {
        let prefix_ok = match result.source_type {
            SourceType::Rag => result.id.starts_with("rag-"),
            SourceType::Kg => result.id.starts_with("kg-"),
            SourceType::Idp => result.id.starts_with("idp-"),
        };
        assert!(prefix_ok, "bad id {} for {:?}", result.id, result.source_type);
    }
}

#[test]
fn test_excerpts_highlight_within_bounds() {
    let mut engine = SearchEngine::new();
    let output = engine.search("revenue", &corpus()).unwrap();

    for result in &output.results {
        for excerpt in &result.excerpts {
            for span in &excerpt.highlights {
                assert!(span.start < span.end);
                assert!(span.end <= excerpt.text.len());
                assert!(excerpt.text.is_char_boundary(span.start));
                assert!(excerpt.text.is_char_boundary(span.end));
                let highlighted = &excerpt.text[span.start..span.end];
                assert!(highlighted.eq_ignore_ascii_case("revenue"));
            }
        }
    }
}

#[test]
fn test_relation_with_unresolved_endpoint_is_skipped() {
    // Relation points at a missing target; the relation is dropped but
    // the resolvable entity still matches.
    let snapshot = SearchSnapshot::new()
        .with_kg_entities(vec![KgEntity::new("e1", "Acme Corp", "ORG")])
        .with_kg_relations(vec![KgRelation::new("e1", "ghost", "OWNS")]);

    let mut engine = SearchEngine::new();
    let output = engine.search("acme", &snapshot).unwrap();

    assert_eq!(output.results.len(), 1);
    assert_eq!(output.results[0].id, "kg-entity-e1");
    assert!(output.warnings.is_empty());
}

#[test]
fn test_zero_match_query_yields_empty_page_and_facets() {
    let mut engine = SearchEngine::new();
    let output = engine.search("xylophone", &corpus()).unwrap();

    assert!(output.is_empty());
    assert_eq!(output.total, 0);
    assert!(output.facets.is_empty());
    assert!(output.warnings.is_empty());
}

// ============================================================================
// Intent Contracts
// ============================================================================

#[test]
fn test_entity_intent_narrows_to_kg() {
    let mut engine = SearchEngine::new();
    let output = engine.search("who is jane", &corpus()).unwrap();

    assert!(!output.results.is_empty());
    assert!(output
        .results
        .iter()
        .all(|r| r.source_type == SourceType::Kg));
}

#[test]
fn test_type_syntax_suppresses_other_entity_types() {
    let mut engine = SearchEngine::new();
    let output = engine.search("type:person smith", &corpus()).unwrap();

    let entity_ids: Vec<&str> = output
        .results
        .iter()
        .filter(|r| r.source_type == SourceType::Kg)
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(entity_ids, vec!["kg-entity-e3"]);
}

// ============================================================================
// Filter Contracts
// ============================================================================

#[test]
fn test_min_score_is_inclusive() {
    let mut engine = SearchEngine::new();
    engine
        .set_filters(SearchFilters::new().with_min_score(3.0))
        .unwrap();
    let output = engine.search("revenue", &corpus()).unwrap();

    assert!(output.results.iter().all(|r| r.score >= 3.0));
    // The 3.0-scoring chunk sits exactly on the boundary and survives.
    assert!(output.results.iter().any(|r| r.id == "rag-chunk-c1"));
}

#[test]
fn test_type_filter_zeroes_disabled_facet() {
    let mut engine = SearchEngine::new();
    engine
        .set_filters(SearchFilters::new().with_types(vec![SourceType::Kg, SourceType::Idp]))
        .unwrap();
    let output = engine.search("revenue", &corpus()).unwrap();

    assert!(output
        .results
        .iter()
        .all(|r| r.source_type != SourceType::Rag));
    // Facets are counted after type filtering: no rag bucket at all.
    assert_eq!(output.facets.types.get(&SourceType::Rag), None);
    assert!(output.facets.types.get(&SourceType::Kg).copied() > Some(0));
}

#[test]
fn test_explicit_date_range_overrides_query_syntax() {
    let snapshot = SearchSnapshot::new().with_rag_chunks(vec![RagChunk::new(
        "c1",
        "Revenue Summary",
        "Revenue grew",
    )]);

    let mut engine = SearchEngine::new();
    let caller_range = DateRange::before(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
    engine
        .set_filters(SearchFilters::new().with_date_range(caller_range))
        .unwrap();

    // The query's own "after 2099-01-01" would exclude everything, but
    // the caller-set range wins; undated chunks pass regardless.
    let output = engine.search("revenue after 2099-01-01", &snapshot).unwrap();
    assert_eq!(output.results.len(), 1);
}

#[test]
fn test_tag_filter_keeps_only_tagged_chunks() {
    let mut engine = SearchEngine::new();
    engine
        .set_filters(SearchFilters::new().with_tags(vec!["finance".into()]))
        .unwrap();
    let output = engine.search("revenue", &corpus()).unwrap();

    // Only the tagged chunk carries tags; sources without tag metadata
    // are filtered out by a non-empty tag filter.
    assert_eq!(output.results.len(), 1);
    assert_eq!(output.results[0].id, "rag-chunk-c1");
}

// ============================================================================
// Facet Contracts
// ============================================================================

#[test]
fn test_facets_cover_all_matches_not_just_page() {
    let mut engine = SearchEngine::new();
    engine
        .set_options(SearchOptions::new().with_limit(1))
        .unwrap();
    let output = engine.search("revenue", &corpus()).unwrap();

    assert_eq!(output.results.len(), 1);
    assert!(output.total > 1);
    let faceted: usize = output.facets.types.values().sum();
    assert_eq!(faceted, output.total);
}

#[test]
fn test_entity_type_facets() {
    let mut engine = SearchEngine::new();
    let output = engine.search("acme revenue", &corpus()).unwrap();

    assert!(output.facets.entity_types.get("ORG").copied() >= Some(1));
}

// ============================================================================
// Pagination Contracts
// ============================================================================

#[test]
fn test_total_is_pre_pagination_count() {
    let mut engine = SearchEngine::new();
    let full = engine.search("revenue", &corpus()).unwrap();

    engine
        .set_options(SearchOptions::new().with_limit(2))
        .unwrap();
    let page = engine.search("revenue", &corpus()).unwrap();

    assert_eq!(page.total, full.total);
    assert_eq!(page.results.len(), 2.min(full.total));
}

#[test]
fn test_offset_past_end_is_empty_not_error() {
    let mut engine = SearchEngine::new();
    engine
        .set_options(SearchOptions::new().with_limit(10).with_offset(1000))
        .unwrap();
    let output = engine.search("revenue", &corpus()).unwrap();

    assert!(output.results.is_empty());
    assert!(output.total > 0);
}

// ============================================================================
// Sort Contracts
// ============================================================================

#[test]
fn test_sort_by_confidence_desc() {
    let mut engine = SearchEngine::new();
    engine
        .set_options(SearchOptions::new().with_sort(SortBy::Confidence, SortOrder::Desc))
        .unwrap();
    let output = engine.search("revenue acme", &corpus()).unwrap();

    let confidences: Vec<f32> = output
        .results
        .iter()
        .map(|r| r.metadata.confidence.unwrap_or(0.0))
        .collect();
    for pair in confidences.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[test]
fn test_sort_by_type_groups_sources() {
    let mut engine = SearchEngine::new();
    engine
        .set_options(SearchOptions::new().with_sort(SortBy::Type, SortOrder::Desc))
        .unwrap();
    let output = engine.search("revenue", &corpus()).unwrap();

    let labels: Vec<&str> = output
        .results
        .iter()
        .map(|r| r.source_type.label())
        .collect();
    let mut sorted = labels.clone();
    sorted.sort();
    assert_eq!(labels, sorted);
}

// ============================================================================
// Error Taxonomy
// ============================================================================

#[test]
fn test_empty_query_is_rejected() {
    let mut engine = SearchEngine::new();
    assert!(matches!(
        engine.search("", &corpus()),
        Err(Error::EmptyQuery)
    ));
    assert!(matches!(
        engine.search("   \t ", &corpus()),
        Err(Error::EmptyQuery)
    ));
}

#[test]
fn test_invalid_options_rejected_before_matching() {
    let mut engine = SearchEngine::new();
    assert!(matches!(
        engine.set_options(SearchOptions::new().with_limit(0)),
        Err(Error::InvalidPagination(_))
    ));
    assert!(matches!(
        engine.set_filters(SearchFilters::new().with_types(vec![])),
        Err(Error::InvalidFilter(_))
    ));
}

#[test]
fn test_malformed_source_becomes_warning() {
    init_tracing();
    let snapshot = corpus().with_kg_entities(vec![
        KgEntity::new("", "Broken Entity", "ORG"),
        KgEntity::new("e1", "Acme Corp", "ORG"),
    ]);

    let mut engine = SearchEngine::new();
    let output = engine.search("revenue acme", &snapshot).unwrap();

    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].source, SourceType::Kg);
    assert!(!output.warnings[0].message.is_empty());
    // RAG and IDP still answered.
    assert!(output
        .results
        .iter()
        .any(|r| r.source_type == SourceType::Rag));
    assert!(output
        .results
        .iter()
        .any(|r| r.source_type == SourceType::Idp));
}

// ============================================================================
// Serialization Contracts
// ============================================================================

#[test]
fn test_output_serializes_to_json() {
    let mut engine = SearchEngine::new();
    let output = engine.search("revenue", &corpus()).unwrap();

    let json = serde_json::to_value(&output).unwrap();
    assert!(json["results"].is_array());
    assert_eq!(json["total"].as_u64(), Some(output.total as u64));
    // Source types serialize as lowercase labels.
    assert_eq!(json["results"][0]["source_type"].as_str(), Some("rag"));
}
