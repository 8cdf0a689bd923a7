//! Core types for the unified search engine
//!
//! This crate defines the foundational types used throughout the system:
//! - SearchSnapshot: Immutable caller-supplied view of the three source datasets
//! - RagChunk, KgEntity, KgRelation: Source records (produced externally)
//! - SourceType: Discriminates which source produced a result
//! - UnifiedResult, Excerpt: Canonical output units
//! - SearchFilters, SearchOptions: Caller-held query state
//! - Facets, SearchOutput, SearchStats: Response types
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod error;
pub mod search_types;
pub mod snapshot;

// Re-export commonly used types
pub use error::{Error, Result};
pub use search_types::{
    DateRange, Excerpt, Facets, HighlightSpan, Payload, ResultMetadata, SearchFilters,
    SearchOptions, SearchOutput, SearchStats, SortBy, SortOrder, SourceType, SourceWarning,
    UnifiedResult,
};
pub use snapshot::{KgEntity, KgRelation, RagChunk, SearchSnapshot};
