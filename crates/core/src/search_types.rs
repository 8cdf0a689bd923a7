//! Core search types for the unified retrieval pipeline
//!
//! This module defines the foundational search types used throughout the
//! system:
//! - SourceType: Which dataset produced a result
//! - SearchFilters / SearchOptions: Caller-held query state
//! - UnifiedResult: Canonical output unit across all sources
//! - Excerpt / HighlightSpan: Bounded preview windows with offsets
//! - Payload: Tagged back-pointer to the originating source record
//! - Facets / SearchStats / SearchOutput: Response types
//!
//! These types define the interface contracts for search operations.

use crate::error::{Error, Result};
use crate::snapshot::{KgEntity, KgRelation, RagChunk};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// SourceType
// ============================================================================

/// Discriminates which source dataset produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Semantic text chunks from the RAG pipeline
    Rag,
    /// Knowledge-graph entities and relations
    Kg,
    /// Extracted-document metadata and classifications
    Idp,
}

impl SourceType {
    /// All source types, in canonical order
    pub fn all() -> [SourceType; 3] {
        [SourceType::Rag, SourceType::Kg, SourceType::Idp]
    }

    /// Lowercase label used in result ids and lexical type ordering
    pub fn label(&self) -> &'static str {
        match self {
            SourceType::Rag => "rag",
            SourceType::Kg => "kg",
            SourceType::Idp => "idp",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Sort key for the result ranker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Descending relevance score (default)
    #[default]
    Relevance,
    /// Descending timestamp; results without one sort as epoch
    Date,
    /// Ascending lexical source-type label
    Type,
    /// Descending confidence; results without one sort as 0
    Confidence,
}

/// Sort direction
///
/// `Asc` reverses the comparator's natural output rather than re-sorting
/// with swapped operands, so `Asc` tie order is the exact reverse of
/// `Desc` tie order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Natural comparator order (default)
    #[default]
    Desc,
    /// Reversed comparator order
    Asc,
}

// ============================================================================
// SearchOptions
// ============================================================================

/// Pagination and sort options for a search
///
/// # Examples
///
/// ```
/// use unisearch_core::{SearchOptions, SortBy, SortOrder};
///
/// let options = SearchOptions::new()
///     .with_limit(50)
///     .with_offset(100)
///     .with_sort(SortBy::Date, SortOrder::Asc);
///
/// assert_eq!(options.limit, 50);
/// assert_eq!(options.offset, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum results per page (default 20)
    pub limit: usize,

    /// Number of ranked results to skip (default 0)
    pub offset: usize,

    /// Sort key (default relevance)
    pub sort_by: SortBy,

    /// Sort direction (default descending)
    pub sort_order: SortOrder,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            limit: 20,
            offset: 0,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl SearchOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        SearchOptions::default()
    }

    /// Builder: set page size
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Builder: set offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Builder: set sort key and direction
    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }

    /// Validate pagination bounds
    ///
    /// Bounds are unsigned, so negative values are unrepresentable; a zero
    /// limit is rejected rather than silently replaced with the default.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(Error::InvalidPagination(
                "limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// DateRange / SearchFilters
// ============================================================================

/// Inclusive timestamp range, open-ended on either side
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest admissible timestamp, if constrained
    pub start: Option<DateTime<Utc>>,

    /// Latest admissible timestamp, if constrained
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Range admitting timestamps at or after `start`
    pub fn after(start: DateTime<Utc>) -> Self {
        DateRange {
            start: Some(start),
            end: None,
        }
    }

    /// Range admitting timestamps at or before `end`
    pub fn before(end: DateTime<Utc>) -> Self {
        DateRange {
            start: None,
            end: Some(end),
        }
    }

    /// Check whether a timestamp falls inside the range (boundaries inclusive)
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        if let Some(start) = self.start {
            if ts < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if ts > end {
                return false;
            }
        }
        true
    }
}

/// Post-hoc filters applied to the ranked result list
///
/// Constructed from caller state, mutated only by explicit filter-toggle
/// operations, read-only during a search pass. Entity-type filtering is
/// applied upstream in the KG matcher and is carried here only so intent
/// analysis can seed it from query syntax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Enabled source types; must be non-empty
    pub types: Vec<SourceType>,

    /// Optional timestamp range; undated results always pass
    pub date_range: Option<DateRange>,

    /// Optional inclusive minimum score
    pub min_score: Option<f32>,

    /// Tag membership filter; empty means no tag constraint
    pub tags: Vec<String>,

    /// Entity-type membership filter (uppercase labels); applied by the
    /// KG matcher, not duplicated in the filter engine
    pub entity_types: Vec<String>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        SearchFilters {
            types: SourceType::all().to_vec(),
            date_range: None,
            min_score: None,
            tags: vec![],
            entity_types: vec![],
        }
    }
}

impl SearchFilters {
    /// Create filters with all source types enabled and no constraints
    pub fn new() -> Self {
        SearchFilters::default()
    }

    /// Builder: set enabled source types
    pub fn with_types(mut self, types: Vec<SourceType>) -> Self {
        self.types = types;
        self
    }

    /// Builder: set date range
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Builder: set minimum score (inclusive)
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Builder: set tag filter
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Builder: set entity-type filter
    pub fn with_entity_types(mut self, entity_types: Vec<String>) -> Self {
        self.entity_types = entity_types;
        self
    }

    /// Check whether a source type is enabled
    pub fn allows_type(&self, source: SourceType) -> bool {
        self.types.contains(&source)
    }

    /// Validate filter state
    pub fn validate(&self) -> Result<()> {
        if self.types.is_empty() {
            return Err(Error::InvalidFilter(
                "at least one source type must be enabled".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Excerpt
// ============================================================================

/// Highlight offsets into an excerpt's text, `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    /// Byte offset of the first highlighted byte, relative to the excerpt
    pub start: usize,
    /// Byte offset one past the last highlighted byte
    pub end: usize,
}

/// A bounded text window around a keyword match
///
/// `text` is at most ~120 characters (radius 50 on each side of the
/// matched keyword); every highlight span lies within `[0, text.len()]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Excerpt {
    /// Field the excerpt was taken from (e.g., "content", "name")
    pub field: String,

    /// Bounded window of the source text
    pub text: String,

    /// Highlight offsets relative to `text`, in match order
    pub highlights: Vec<HighlightSpan>,
}

// ============================================================================
// Payload / ResultMetadata / UnifiedResult
// ============================================================================

/// Back-pointer to the originating source record
///
/// A tagged union keyed by source, so downstream consumers pattern-match
/// exhaustively instead of duck-typing. The engine itself never
/// interprets payloads; they exist for navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Payload {
    /// Originating RAG chunk
    Chunk(RagChunk),
    /// Originating knowledge-graph entity
    Entity(KgEntity),
    /// Originating knowledge-graph relation
    Relation(KgRelation),
    /// Originating metadata entry
    MetadataEntry {
        /// Field name
        key: String,
        /// Rendered field value
        value: String,
    },
    /// Originating classification label
    Classification {
        /// Label text
        label: String,
    },
}

/// Display metadata carried by every result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Primary display title
    pub title: String,

    /// Secondary display line
    pub description: String,

    /// Origin label naming the producing source (e.g., "knowledge-graph")
    pub origin: String,

    /// Timestamp of the underlying record, when the source carries one
    pub timestamp: Option<DateTime<Utc>>,

    /// Confidence of the underlying record, when the source carries one
    pub confidence: Option<f32>,

    /// Tags of the underlying record
    pub tags: Vec<String>,
}

impl ResultMetadata {
    /// Create metadata with title, description, and origin label
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        ResultMetadata {
            title: title.into(),
            description: description.into(),
            origin: origin.into(),
            timestamp: None,
            confidence: None,
            tags: vec![],
        }
    }

    /// Builder: set timestamp
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Builder: set confidence
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Builder: set tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// The canonical output unit across all sources
///
/// # Invariant
///
/// `score` is the arithmetic mean of per-keyword weight contributions,
/// never negative, and strictly positive for every emitted result —
/// matchers must never emit zero-score results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedResult {
    /// Globally unique id, formed `"<source>-<kind>-<local id>"`
    pub id: String,

    /// Which source produced this result
    pub source_type: SourceType,

    /// Keyword-normalized relevance score, > 0
    pub score: f32,

    /// Display metadata
    pub metadata: ResultMetadata,

    /// Back-pointer to the originating record
    pub payload: Payload,

    /// Names of every field that matched at least one keyword
    pub matched_fields: Vec<String>,

    /// Preview windows explaining why the result matched
    pub excerpts: Vec<Excerpt>,
}

// ============================================================================
// Facets
// ============================================================================

/// Aggregate counts over the ranked+filtered result set
///
/// Computed before pagination, so counts reflect the full set visible to
/// the current query and filters, not just the current page. Entity-type
/// counts are derived only from KG results whose payload carries a type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facets {
    /// Result count per source type
    pub types: HashMap<SourceType, usize>,

    /// Result count per tag
    pub tags: HashMap<String, usize>,

    /// Result count per KG entity type
    pub entity_types: HashMap<String, usize>,
}

impl Facets {
    /// Create empty facets
    pub fn new() -> Self {
        Facets::default()
    }

    /// Check whether every dimension is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.tags.is_empty() && self.entity_types.is_empty()
    }
}

// ============================================================================
// SourceWarning / SearchStats / SearchOutput
// ============================================================================

/// Non-fatal per-source failure surfaced alongside results
///
/// One bad data source must not blank the entire search: the failing
/// matcher is dropped for the request and reported here, so consumers can
/// distinguish "no results" from "search degraded".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceWarning {
    /// Source whose matcher failed
    pub source: SourceType,

    /// Human-readable failure description
    pub message: String,
}

/// Execution statistics for a search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Time spent in the pipeline (microseconds)
    pub elapsed_micros: u64,

    /// Total candidates emitted by matchers before filtering
    pub candidates_considered: usize,

    /// Candidates per source
    pub candidates_by_source: HashMap<SourceType, usize>,
}

impl SearchStats {
    /// Create stats with elapsed time
    pub fn new(elapsed_micros: u64) -> Self {
        SearchStats {
            elapsed_micros,
            ..SearchStats::default()
        }
    }

    /// Record the candidate count for a source
    pub fn add_source_candidates(&mut self, source: SourceType, count: usize) {
        self.candidates_by_source.insert(source, count);
        self.candidates_considered += count;
    }
}

/// One page of search results plus set-level aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutput {
    /// The requested page of ranked, filtered results
    pub results: Vec<UnifiedResult>,

    /// Facet counts over the full ranked+filtered set
    pub facets: Facets,

    /// Size of the ranked+filtered set before pagination
    pub total: usize,

    /// Non-fatal per-source failures, empty on a clean search
    pub warnings: Vec<SourceWarning>,

    /// Superseding generation stamp; a page whose generation is older
    /// than the engine's current one is stale and must be discarded
    pub generation: u64,

    /// Execution statistics
    pub stats: SearchStats,
}

impl SearchOutput {
    /// Create an empty output with the given generation stamp
    pub fn empty(generation: u64) -> Self {
        SearchOutput {
            results: vec![],
            facets: Facets::new(),
            total: 0,
            warnings: vec![],
            generation,
            stats: SearchStats::default(),
        }
    }

    /// Check whether the page has no results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of results on this page
    pub fn len(&self) -> usize {
        self.results.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
