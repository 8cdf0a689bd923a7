//! Immutable source snapshots
//!
//! This module defines the caller-supplied view of the three source
//! datasets at query time:
//! - RagChunk: Segments of source-document text from an external chunker
//! - KgEntity / KgRelation: Knowledge-graph nodes and typed edges
//! - Metadata entries and classification labels from document extraction
//!
//! The engine never creates chunks, entities, or metadata — it only
//! searches over them. A snapshot is read-only for the duration of a
//! search, so concurrent queries against the same snapshot cannot
//! interfere.

use serde::{Deserialize, Serialize};

// ============================================================================
// RagChunk
// ============================================================================

/// A segment of source-document text produced by an external chunking process
///
/// Chunking method, size, and overlap are inputs; the engine never
/// computes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagChunk {
    /// Chunk identifier, unique within the snapshot
    pub id: String,

    /// Title of the chunk (typically the source document section)
    pub title: String,

    /// Text payload of the chunk
    pub content: String,

    /// Position within the parent document
    pub chunk_index: usize,

    /// Token count reported by the chunker
    pub token_count: usize,

    /// Tags attached by the upstream pipeline
    pub tags: Vec<String>,
}

impl RagChunk {
    /// Create a new chunk with empty tags at index 0
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        RagChunk {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            chunk_index: 0,
            token_count: 0,
            tags: vec![],
        }
    }

    /// Builder: set chunk index
    pub fn with_index(mut self, index: usize) -> Self {
        self.chunk_index = index;
        self
    }

    /// Builder: set token count
    pub fn with_token_count(mut self, count: usize) -> Self {
        self.token_count = count;
        self
    }

    /// Builder: set tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

// ============================================================================
// KgEntity / KgRelation
// ============================================================================

/// A knowledge-graph node produced by an external extraction process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KgEntity {
    /// Entity identifier, unique within the snapshot
    pub id: String,

    /// Display name
    pub name: String,

    /// Entity type label (e.g., "ORG", "PERSON")
    pub entity_type: String,

    /// Extraction confidence in [0, 1]
    pub confidence: f32,
}

impl KgEntity {
    /// Create a new entity with confidence 1.0
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        KgEntity {
            id: id.into(),
            name: name.into(),
            entity_type: entity_type.into(),
            confidence: 1.0,
        }
    }

    /// Builder: set confidence
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

/// A typed edge between two knowledge-graph entities
///
/// Endpoints are referenced by entity id; a relation whose endpoint is
/// missing from the snapshot is skipped by the matcher, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KgRelation {
    /// Id of the source entity
    pub source_id: String,

    /// Id of the target entity
    pub target_id: String,

    /// Relation type label (e.g., "OWNS")
    pub relation_type: String,

    /// Extraction confidence in [0, 1]
    pub confidence: f32,
}

impl KgRelation {
    /// Create a new relation with confidence 1.0
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relation_type: impl Into<String>,
    ) -> Self {
        KgRelation {
            source_id: source_id.into(),
            target_id: target_id.into(),
            relation_type: relation_type.into(),
            confidence: 1.0,
        }
    }

    /// Builder: set confidence
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }
}

// ============================================================================
// SearchSnapshot
// ============================================================================

/// Immutable caller-supplied view of the three source datasets
///
/// Every search operates against a frozen snapshot taken by reference;
/// the engine never mutates one. Callers must not mutate the underlying
/// collections while a query is in flight (copy-on-write or
/// snapshot-at-call-time is the required discipline).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSnapshot {
    /// RAG chunks, in upstream order
    pub rag_chunks: Vec<RagChunk>,

    /// Knowledge-graph entities, in upstream order
    pub kg_entities: Vec<KgEntity>,

    /// Knowledge-graph relations, in upstream order
    pub kg_relations: Vec<KgRelation>,

    /// Extracted metadata as ordered (field name, rendered value) pairs
    pub idp_metadata: Vec<(String, String)>,

    /// Classification labels, in upstream order
    pub idp_classifications: Vec<String>,
}

impl SearchSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        SearchSnapshot::default()
    }

    /// Builder: set RAG chunks
    pub fn with_rag_chunks(mut self, chunks: Vec<RagChunk>) -> Self {
        self.rag_chunks = chunks;
        self
    }

    /// Builder: set knowledge-graph entities
    pub fn with_kg_entities(mut self, entities: Vec<KgEntity>) -> Self {
        self.kg_entities = entities;
        self
    }

    /// Builder: set knowledge-graph relations
    pub fn with_kg_relations(mut self, relations: Vec<KgRelation>) -> Self {
        self.kg_relations = relations;
        self
    }

    /// Builder: set metadata entries
    pub fn with_idp_metadata(mut self, metadata: Vec<(String, String)>) -> Self {
        self.idp_metadata = metadata;
        self
    }

    /// Builder: set classification labels
    pub fn with_idp_classifications(mut self, classifications: Vec<String>) -> Self {
        self.idp_classifications = classifications;
        self
    }

    /// Look up an entity by id
    pub fn entity(&self, id: &str) -> Option<&KgEntity> {
        self.kg_entities.iter().find(|e| e.id == id)
    }

    /// Check whether the snapshot holds no data at all
    pub fn is_empty(&self) -> bool {
        self.rag_chunks.is_empty()
            && self.kg_entities.is_empty()
            && self.kg_relations.is_empty()
            && self.idp_metadata.is_empty()
            && self.idp_classifications.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
