//! Query intent analysis
//!
//! This module classifies a free-text query into a primary intent, a
//! candidate set of source types to search, and structured filters parsed
//! out of the query text (dates, explicit type tags).
//!
//! Analysis is a pure function of its arguments: the same query and
//! enabled types always produce a structurally identical intent.

use crate::tokenizer::tokenize;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use unisearch_core::{DateRange, Error, Result, SourceType};

/// Words whose presence marks an entity-lookup query
const ENTITY_WORDS: &[&str] = &[
    "who",
    "what",
    "where",
    "entity",
    "person",
    "company",
    "organization",
];

/// Words whose presence marks a relationship-lookup query
const RELATIONSHIP_WORDS: &[&str] = &["how", "why", "relationship", "between", "connected"];

/// Words whose presence marks a metadata-lookup query
const METADATA_WORDS: &[&str] = &["metadata", "property", "attribute", "field"];

/// `before|after|since|until <ISO date>` filter syntax
static DATE_FILTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(before|after|since|until)\s+(\d{4}-\d{2}-\d{2})\b")
        .expect("date filter pattern is valid")
});

/// `type:<word>` filter syntax
static TYPE_FILTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btype:(\w+)\b").expect("type filter pattern is valid"));

// ============================================================================
// QueryIntent
// ============================================================================

/// The classified purpose of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntentKind {
    /// General keyword search across all enabled sources (default)
    #[default]
    Search,
    /// Entity lookup, narrowed to the knowledge graph
    Entity,
    /// Relationship lookup, narrowed to the knowledge graph and RAG chunks
    Relationship,
    /// Metadata lookup, narrowed to extracted-document data
    Metadata,
}

/// Structured filters parsed out of the query text
///
/// Unrecognized filter syntax is ignored, never an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedFilters {
    /// Date range from `before|after|since|until <ISO date>`, open-ended
    /// on the unconstrained side
    pub date_range: Option<DateRange>,

    /// Uppercased entity types from `type:<word>`
    pub entity_types: Vec<String>,
}

/// Derived once per query; never mutated afterward
#[derive(Debug, Clone, PartialEq)]
pub struct QueryIntent {
    /// Classified primary intent
    pub primary: IntentKind,

    /// Source types worth searching for this intent, already intersected
    /// with the caller's enabled types
    pub candidate_sources: Vec<SourceType>,

    /// Lowercase keywords, with filter-syntax tokens removed
    pub keywords: Vec<String>,

    /// Original-case query tokens, for keyword echoing
    pub raw_terms: Vec<String>,

    /// Filters parsed out of the query text
    pub extracted: ExtractedFilters,
}

impl QueryIntent {
    /// Check whether a source should be searched for this intent
    pub fn includes_source(&self, source: SourceType) -> bool {
        self.candidate_sources.contains(&source)
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Classify a query into a [`QueryIntent`]
///
/// Classification uses ordered pattern precedence (first match wins):
/// entity-indicative words, then relationship-indicative, then
/// metadata-indicative, else general search. Candidate sources default to
/// `enabled_types` and are narrowed per intent.
///
/// # Errors
///
/// Returns [`Error::EmptyQuery`] for empty or whitespace-only queries.
pub fn analyze(query: &str, enabled_types: &[SourceType]) -> Result<QueryIntent> {
    if query.trim().is_empty() {
        return Err(Error::EmptyQuery);
    }

    let raw_terms: Vec<String> = query.split_whitespace().map(String::from).collect();
    let tokens = tokenize(query);

    let (extracted, consumed) = extract_filters(query);

    let keywords: Vec<String> = tokens
        .into_iter()
        .filter(|t| !consumed.contains(t))
        .collect();

    let primary = classify(&keywords);
    let candidate_sources = narrow_sources(primary, enabled_types);

    Ok(QueryIntent {
        primary,
        candidate_sources,
        keywords,
        raw_terms,
        extracted,
    })
}

/// First-match-wins intent classification over lowercase tokens
fn classify(tokens: &[String]) -> IntentKind {
    let has_any = |words: &[&str]| tokens.iter().any(|t| words.contains(&t.as_str()));

    if has_any(ENTITY_WORDS) {
        IntentKind::Entity
    } else if has_any(RELATIONSHIP_WORDS) {
        IntentKind::Relationship
    } else if has_any(METADATA_WORDS) {
        IntentKind::Metadata
    } else {
        IntentKind::Search
    }
}

/// Narrow candidate sources per intent, intersected with enabled types
fn narrow_sources(primary: IntentKind, enabled: &[SourceType]) -> Vec<SourceType> {
    let narrowed: &[SourceType] = match primary {
        IntentKind::Entity => &[SourceType::Kg],
        IntentKind::Relationship => &[SourceType::Kg, SourceType::Rag],
        IntentKind::Metadata => &[SourceType::Idp],
        IntentKind::Search => enabled,
    };
    narrowed
        .iter()
        .copied()
        .filter(|s| enabled.contains(s))
        .collect()
}

/// Scan the query for filter syntax
///
/// Returns the extracted filters and the set of lowercase tokens consumed
/// by filter syntax, so they can be dropped from the keyword list.
fn extract_filters(query: &str) -> (ExtractedFilters, HashSet<String>) {
    let mut extracted = ExtractedFilters::default();
    let mut consumed = HashSet::new();

    if let Some(caps) = DATE_FILTER.captures(query) {
        let direction = caps[1].to_lowercase();
        let date_str = &caps[2];
        if let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                let ts = midnight.and_utc();
                extracted.date_range = Some(match direction.as_str() {
                    "before" | "until" => DateRange::before(ts),
                    _ => DateRange::after(ts),
                });
                consumed.insert(direction);
                consumed.insert(date_str.to_lowercase());
            }
        }
        // A direction word with an unparseable date is left as keywords.
    }

    if let Some(caps) = TYPE_FILTER.captures(query) {
        let word = &caps[1];
        extracted.entity_types = vec![word.to_uppercase()];
        consumed.insert(format!("type:{}", word.to_lowercase()));
    }

    (extracted, consumed)
}

// ============================================================================
// Tests
// ============================================================================
