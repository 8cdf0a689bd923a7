//! Extracted-document (IDP) matcher
//!
//! Two passes: metadata entries scored on field name and rendered value,
//! then classification labels scored on label text.

use super::{push_field, SourceMatcher};
use crate::highlight::build_excerpt;
use crate::intent::QueryIntent;
use crate::tokenizer::contains_ignore_case;
use unisearch_core::{
    Error, Payload, Result, ResultMetadata, SearchSnapshot, SourceType, UnifiedResult,
};

/// Weight for a keyword hit in a metadata key or value
const METADATA_WEIGHT: f32 = 1.0;
/// Weight for a keyword hit in a classification label
const CLASSIFICATION_WEIGHT: f32 = 1.0;

/// Lexical matcher over extracted-document metadata and classifications
#[derive(Debug, Clone, Copy, Default)]
pub struct IdpMatcher;

impl SourceMatcher for IdpMatcher {
    fn source_type(&self) -> SourceType {
        SourceType::Idp
    }

    fn find(&self, intent: &QueryIntent, snapshot: &SearchSnapshot) -> Result<Vec<UnifiedResult>> {
        let keywords = &intent.keywords;
        if keywords.is_empty() {
            return Ok(vec![]);
        }

        let mut results = Vec::new();
        self.match_metadata(intent, snapshot, &mut results)?;
        self.match_classifications(intent, snapshot, &mut results);
        Ok(results)
    }

    fn name(&self) -> &str {
        "idp"
    }
}

impl IdpMatcher {
    /// Metadata pass: score each (key, value) entry
    fn match_metadata(
        &self,
        intent: &QueryIntent,
        snapshot: &SearchSnapshot,
        results: &mut Vec<UnifiedResult>,
    ) -> Result<()> {
        let keywords = &intent.keywords;

        for (key, value) in &snapshot.idp_metadata {
            if key.is_empty() {
                return Err(Error::MalformedSource {
                    source_type: SourceType::Idp,
                    reason: "metadata entry with empty field name".to_string(),
                });
            }

            let mut raw = 0.0f32;
            let mut matched_fields = Vec::new();
            for keyword in keywords {
                let key_hit = contains_ignore_case(key, keyword);
                let value_hit = contains_ignore_case(value, keyword);
                if key_hit {
                    push_field(&mut matched_fields, "key");
                }
                if value_hit {
                    push_field(&mut matched_fields, "value");
                }
                if key_hit || value_hit {
                    raw += METADATA_WEIGHT;
                }
            }

            if raw > 0.0 {
                let entry_text = format!("{key}: {value}");
                let excerpts = keywords
                    .iter()
                    .find_map(|kw| build_excerpt("metadata", &entry_text, kw))
                    .into_iter()
                    .collect();

                results.push(UnifiedResult {
                    id: format!("idp-meta-{key}"),
                    source_type: SourceType::Idp,
                    score: raw / keywords.len() as f32,
                    metadata: ResultMetadata::new(key.clone(), value.clone(), "document-metadata"),
                    payload: Payload::MetadataEntry {
                        key: key.clone(),
                        value: value.clone(),
                    },
                    matched_fields,
                    excerpts,
                });
            }
        }
        Ok(())
    }

    /// Classification pass: score each label
    fn match_classifications(
        &self,
        intent: &QueryIntent,
        snapshot: &SearchSnapshot,
        results: &mut Vec<UnifiedResult>,
    ) {
        let keywords = &intent.keywords;

        for (index, label) in snapshot.idp_classifications.iter().enumerate() {
            let mut raw = 0.0f32;
            let mut excerpts = Vec::new();
            for keyword in keywords {
                if contains_ignore_case(label, keyword) {
                    raw += CLASSIFICATION_WEIGHT;
                    if excerpts.is_empty() {
                        if let Some(excerpt) = build_excerpt("classification", label, keyword) {
                            excerpts.push(excerpt);
                        }
                    }
                }
            }

            if raw > 0.0 {
                results.push(UnifiedResult {
                    id: format!("idp-class-{index}"),
                    source_type: SourceType::Idp,
                    score: raw / keywords.len() as f32,
                    metadata: ResultMetadata::new(
                        label.clone(),
                        "Document classification",
                        "document-classification",
                    ),
                    payload: Payload::Classification {
                        label: label.clone(),
                    },
                    matched_fields: vec!["classification".to_string()],
                    excerpts,
                });
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::analyze;

    fn intent_for(query: &str) -> QueryIntent {
        analyze(query, &SourceType::all()).unwrap()
    }

    fn invoice_snapshot() -> SearchSnapshot {
        SearchSnapshot::new()
            .with_idp_metadata(vec![
                ("author".into(), "Jane Doe".into()),
                ("department".into(), "Finance".into()),
            ])
            .with_idp_classifications(vec!["invoice".into(), "quarterly report".into()])
    }

    #[test]
    fn test_metadata_value_match() {
        let results = IdpMatcher
            .find(&intent_for("jane"), &invoice_snapshot())
            .unwrap();

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.id, "idp-meta-author");
        assert!((result.score - 1.0).abs() < f32::EPSILON);
        assert_eq!(result.matched_fields, vec!["value"]);
        assert_eq!(result.excerpts[0].text, "author: Jane Doe");
    }

    #[test]
    fn test_metadata_key_match() {
        let results = IdpMatcher
            .find(&intent_for("department"), &invoice_snapshot())
            .unwrap();
        assert_eq!(results[0].matched_fields, vec!["key"]);
    }

    #[test]
    fn test_keyword_matching_key_and_value_counts_once() {
        let snapshot =
            SearchSnapshot::new().with_idp_metadata(vec![("title".into(), "title page".into())]);
        let results = IdpMatcher.find(&intent_for("title"), &snapshot).unwrap();

        assert!((results[0].score - 1.0).abs() < f32::EPSILON);
        assert_eq!(results[0].matched_fields, vec!["key", "value"]);
    }

    #[test]
    fn test_classification_match() {
        let results = IdpMatcher
            .find(&intent_for("invoice"), &invoice_snapshot())
            .unwrap();

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.id, "idp-class-0");
        assert_eq!(result.metadata.title, "invoice");
        assert_eq!(result.matched_fields, vec!["classification"]);
        assert_eq!(result.excerpts[0].field, "classification");
    }

    #[test]
    fn test_no_match_emits_nothing() {
        let results = IdpMatcher
            .find(&intent_for("zebra"), &invoice_snapshot())
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_metadata_key_is_malformed() {
        let snapshot = SearchSnapshot::new().with_idp_metadata(vec![("".into(), "x".into())]);
        assert!(matches!(
            IdpMatcher.find(&intent_for("x"), &snapshot),
            Err(Error::MalformedSource {
                source_type: SourceType::Idp,
                ..
            })
        ));
    }

    #[test]
    fn test_classification_payload() {
        let results = IdpMatcher
            .find(&intent_for("quarterly"), &invoice_snapshot())
            .unwrap();
        match &results[0].payload {
            Payload::Classification { label } => assert_eq!(label, "quarterly report"),
            other => panic!("Expected classification payload, got {other:?}"),
        }
    }
}
