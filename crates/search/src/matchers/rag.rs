//! RAG chunk matcher
//!
//! Scores each chunk by summing keyword weights over content, title, and
//! tags, normalized by keyword count. Content hits additionally produce
//! an excerpt window per keyword.

use super::{push_field, SourceMatcher};
use crate::highlight::build_excerpt;
use crate::intent::QueryIntent;
use crate::tokenizer::contains_ignore_case;
use unisearch_core::{
    Error, Payload, Result, ResultMetadata, SearchSnapshot, SourceType, UnifiedResult,
};

/// Weight for a keyword hit in chunk content
const CONTENT_WEIGHT: f32 = 1.0;
/// Weight for a keyword hit in the chunk title
const TITLE_WEIGHT: f32 = 2.0;
/// Weight per tag containing a keyword
const TAG_WEIGHT: f32 = 1.5;

/// Lexical matcher over RAG chunks
#[derive(Debug, Clone, Copy, Default)]
pub struct RagMatcher;

impl SourceMatcher for RagMatcher {
    fn source_type(&self) -> SourceType {
        SourceType::Rag
    }

    fn find(&self, intent: &QueryIntent, snapshot: &SearchSnapshot) -> Result<Vec<UnifiedResult>> {
        let keywords = &intent.keywords;
        if keywords.is_empty() {
            return Ok(vec![]);
        }

        let mut results = Vec::new();
        for chunk in &snapshot.rag_chunks {
            if chunk.id.is_empty() {
                return Err(Error::MalformedSource {
                    source_type: SourceType::Rag,
                    reason: "chunk with empty id".to_string(),
                });
            }

            let mut raw = 0.0f32;
            let mut matched_fields = Vec::new();
            let mut excerpts = Vec::new();

            for keyword in keywords {
                if contains_ignore_case(&chunk.content, keyword) {
                    raw += CONTENT_WEIGHT;
                    push_field(&mut matched_fields, "content");
                    if let Some(excerpt) = build_excerpt("content", &chunk.content, keyword) {
                        excerpts.push(excerpt);
                    }
                }
                if contains_ignore_case(&chunk.title, keyword) {
                    raw += TITLE_WEIGHT;
                    push_field(&mut matched_fields, "title");
                }
                for tag in &chunk.tags {
                    if contains_ignore_case(tag, keyword) {
                        raw += TAG_WEIGHT;
                        push_field(&mut matched_fields, "tags");
                    }
                }
            }

            if raw > 0.0 {
                results.push(UnifiedResult {
                    id: format!("rag-chunk-{}", chunk.id),
                    source_type: SourceType::Rag,
                    score: raw / keywords.len() as f32,
                    metadata: ResultMetadata::new(
                        chunk.title.clone(),
                        format!("Chunk {} ({} tokens)", chunk.chunk_index, chunk.token_count),
                        "rag-chunks",
                    )
                    .with_tags(chunk.tags.clone()),
                    payload: Payload::Chunk(chunk.clone()),
                    matched_fields,
                    excerpts,
                });
            }
        }
        Ok(results)
    }

    fn name(&self) -> &str {
        "rag"
    }
}

// ============================================================================
// Tests
// ============================================================================
