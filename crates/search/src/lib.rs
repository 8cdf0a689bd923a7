//! Unified retrieval pipeline
//!
//! This crate provides:
//! - Intent analyzer classifying free-text queries
//! - SourceMatcher trait plus RAG, knowledge-graph, and IDP matchers
//! - Ranker for cross-source result fusion with stable tie-breaks
//! - Filter engine, paginator, and facet computer
//! - Excerpt builder with highlight offset tracking
//! - SearchEngine orchestrating the whole request/response pipeline
//!
//! # Usage
//!
//! ```
//! use unisearch_search::{SearchEngine, SearchSnapshot};
//!
//! let mut engine = SearchEngine::new();
//! let output = engine.search("revenue", &SearchSnapshot::new()).unwrap();
//! assert!(output.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod facets;
pub mod filter;
pub mod highlight;
pub mod intent;
pub mod matchers;
pub mod paginate;
pub mod ranker;
pub mod tokenizer;

// Re-export commonly used types
pub use engine::SearchEngine;
pub use facets::compute_facets;
pub use filter::apply_filters;
pub use highlight::{build_excerpt, EXCERPT_RADIUS};
pub use intent::{analyze, ExtractedFilters, IntentKind, QueryIntent};
pub use matchers::{IdpMatcher, KgMatcher, RagMatcher, SourceMatcher};
pub use paginate::paginate;
pub use ranker::rank;
pub use tokenizer::{tokenize, tokenize_unique};

// Re-export the core contract types so consumers need only this crate
pub use unisearch_core::{
    DateRange, Error, Excerpt, Facets, HighlightSpan, KgEntity, KgRelation, Payload, RagChunk,
    Result, ResultMetadata, SearchFilters, SearchOptions, SearchOutput, SearchSnapshot,
    SearchStats, SortBy, SortOrder, SourceType, SourceWarning, UnifiedResult,
};
