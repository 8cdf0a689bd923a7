//! Unisearch - unified in-process retrieval over heterogeneous sources
//!
//! Unisearch merges three result sources — semantic text (RAG) chunks, a
//! knowledge graph of entities and relations, and extracted-document (IDP)
//! metadata — into one scored, filtered, paginated result list with facets
//! and excerpt highlighting.
//!
//! # Quick Start
//!
//! ```
//! use unisearch::{RagChunk, SearchEngine, SearchSnapshot, SourceType};
//!
//! let snapshot = SearchSnapshot::new().with_rag_chunks(vec![RagChunk::new(
//!     "c1",
//!     "Revenue Summary",
//!     "Revenue grew 12%",
//! )]);
//!
//! let mut engine = SearchEngine::new();
//! let output = engine.search("revenue", &snapshot).unwrap();
//! assert_eq!(output.results[0].source_type, SourceType::Rag);
//! ```
//!
//! # Architecture
//!
//! The engine is a pure request/response pipeline: intent analysis → source
//! matchers → fusion and ranking → filtering → facets → pagination. The
//! [`SearchEngine`] struct holds only caller-side state (filters, options,
//! a memoized query intent); every search runs against an immutable
//! [`SearchSnapshot`] supplied by the caller.

// Re-export the public API from unisearch-search
pub use unisearch_search::*;
