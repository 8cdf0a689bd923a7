//! Knowledge-graph matcher
//!
//! Two passes over the graph snapshot: entities scored on name and type,
//! then relations scored against a synthetic
//! `"<source> <relation> <target>"` sentence. Relations with an
//! unresolved endpoint are skipped, not errors.

use super::{push_field, SourceMatcher};
use crate::highlight::build_excerpt;
use crate::intent::QueryIntent;
use crate::tokenizer::contains_ignore_case;
use unisearch_core::{
    Error, Payload, Result, ResultMetadata, SearchSnapshot, SourceType, UnifiedResult,
};

/// Weight for a keyword hit in an entity name
const NAME_WEIGHT: f32 = 2.0;
/// Weight for a keyword hit in an entity type
const TYPE_WEIGHT: f32 = 1.0;
/// Weight for a keyword hit in a relation sentence
const RELATION_WEIGHT: f32 = 1.5;

/// Lexical matcher over knowledge-graph entities and relations
#[derive(Debug, Clone, Copy, Default)]
pub struct KgMatcher;

impl SourceMatcher for KgMatcher {
    fn source_type(&self) -> SourceType {
        SourceType::Kg
    }

    fn find(&self, intent: &QueryIntent, snapshot: &SearchSnapshot) -> Result<Vec<UnifiedResult>> {
        let keywords = &intent.keywords;
        if keywords.is_empty() {
            return Ok(vec![]);
        }

        let mut results = Vec::new();
        self.match_entities(intent, snapshot, &mut results)?;
        self.match_relations(intent, snapshot, &mut results);
        Ok(results)
    }

    fn name(&self) -> &str {
        "kg"
    }
}

impl KgMatcher {
    /// Entity pass: score on name and type, honor the entity-type filter
    fn match_entities(
        &self,
        intent: &QueryIntent,
        snapshot: &SearchSnapshot,
        results: &mut Vec<UnifiedResult>,
    ) -> Result<()> {
        let keywords = &intent.keywords;
        let type_filter = &intent.extracted.entity_types;

        for entity in &snapshot.kg_entities {
            if entity.id.is_empty() {
                return Err(Error::MalformedSource {
                    source_type: SourceType::Kg,
                    reason: "entity with empty id".to_string(),
                });
            }
            if !entity.confidence.is_finite() {
                return Err(Error::MalformedSource {
                    source_type: SourceType::Kg,
                    reason: format!("entity {} has non-finite confidence", entity.id),
                });
            }

            // An explicit type filter suppresses entities of other types.
            if !type_filter.is_empty() && !type_filter.contains(&entity.entity_type.to_uppercase())
            {
                continue;
            }

            let mut raw = 0.0f32;
            let mut matched_fields = Vec::new();
            let mut excerpts = Vec::new();

            for keyword in keywords {
                if contains_ignore_case(&entity.name, keyword) {
                    raw += NAME_WEIGHT;
                    push_field(&mut matched_fields, "name");
                    if excerpts.is_empty() {
                        if let Some(excerpt) = build_excerpt("name", &entity.name, keyword) {
                            excerpts.push(excerpt);
                        }
                    }
                }
                if contains_ignore_case(&entity.entity_type, keyword) {
                    raw += TYPE_WEIGHT;
                    push_field(&mut matched_fields, "type");
                }
            }

            if raw > 0.0 {
                results.push(UnifiedResult {
                    id: format!("kg-entity-{}", entity.id),
                    source_type: SourceType::Kg,
                    score: raw / keywords.len() as f32,
                    metadata: ResultMetadata::new(
                        entity.name.clone(),
                        format!("{} entity", entity.entity_type),
                        "knowledge-graph",
                    )
                    .with_confidence(entity.confidence),
                    payload: Payload::Entity(entity.clone()),
                    matched_fields,
                    excerpts,
                });
            }
        }
        Ok(())
    }

    /// Relation pass: score the synthetic sentence, skip unresolved edges
    fn match_relations(
        &self,
        intent: &QueryIntent,
        snapshot: &SearchSnapshot,
        results: &mut Vec<UnifiedResult>,
    ) {
        let keywords = &intent.keywords;

        for (index, relation) in snapshot.kg_relations.iter().enumerate() {
            let (source, target) = match (
                snapshot.entity(&relation.source_id),
                snapshot.entity(&relation.target_id),
            ) {
                (Some(s), Some(t)) => (s, t),
                _ => continue,
            };

            let sentence = format!("{} {} {}", source.name, relation.relation_type, target.name);

            let mut raw = 0.0f32;
            let mut excerpts = Vec::new();
            for keyword in keywords {
                if contains_ignore_case(&sentence, keyword) {
                    raw += RELATION_WEIGHT;
                    if excerpts.is_empty() {
                        if let Some(excerpt) = build_excerpt("relation", &sentence, keyword) {
                            excerpts.push(excerpt);
                        }
                    }
                }
            }

            if raw > 0.0 {
                results.push(UnifiedResult {
                    // Indexed like classification ids: endpoint pairs are
                    // not unique (two entities can share several typed
                    // edges), so the snapshot index disambiguates.
                    id: format!("kg-relation-{index}"),
                    source_type: SourceType::Kg,
                    score: raw / keywords.len() as f32,
                    metadata: ResultMetadata::new(
                        format!("{} → {}", source.name, target.name),
                        sentence,
                        "knowledge-graph",
                    )
                    .with_confidence(relation.confidence),
                    payload: Payload::Relation(relation.clone()),
                    matched_fields: vec!["relation".to_string()],
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
    use unisearch_core::{KgEntity, KgRelation};

    fn intent_for(query: &str) -> QueryIntent {
        analyze(query, &SourceType::all()).unwrap()
    }

    fn acme_snapshot() -> SearchSnapshot {
        SearchSnapshot::new()
            .with_kg_entities(vec![
                KgEntity::new("1", "Acme Corp", "ORG").with_confidence(0.9),
                KgEntity::new("2", "Jane Doe", "PERSON").with_confidence(0.8),
            ])
            .with_kg_relations(vec![KgRelation::new("2", "1", "OWNS").with_confidence(0.7)])
    }

    #[test]
    fn test_entity_name_match() {
        let results = KgMatcher.find(&intent_for("acme"), &acme_snapshot()).unwrap();

        let entity_hit = results.iter().find(|r| r.id == "kg-entity-1").unwrap();
        assert!((entity_hit.score - 2.0).abs() < f32::EPSILON);
        assert_eq!(entity_hit.matched_fields, vec!["name"]);
        assert_eq!(entity_hit.metadata.confidence, Some(0.9));
        assert_eq!(entity_hit.excerpts.len(), 1);
        assert_eq!(entity_hit.excerpts[0].field, "name");
    }

    #[test]
    fn test_entity_type_match() {
        let results = KgMatcher.find(&intent_for("org"), &acme_snapshot()).unwrap();
        let entity_hit = results.iter().find(|r| r.id == "kg-entity-1").unwrap();
        assert!((entity_hit.score - 1.0).abs() < f32::EPSILON);
        assert!(entity_hit.matched_fields.contains(&"type".to_string()));
    }

    #[test]
    fn test_entity_type_filter_suppresses() {
        // "acme" matches the ORG entity, but the filter restricts to PERSON.
        let results = KgMatcher
            .find(&intent_for("acme jane type:person"), &acme_snapshot())
            .unwrap();

        assert!(results.iter().all(|r| r.id != "kg-entity-1"));
        assert!(results.iter().any(|r| r.id == "kg-entity-2"));
    }

    #[test]
    fn test_relation_sentence_match() {
        let results = KgMatcher.find(&intent_for("owns"), &acme_snapshot()).unwrap();

        let relation_hit = results.iter().find(|r| r.id == "kg-relation-0").unwrap();
        assert!((relation_hit.score - 1.5).abs() < f32::EPSILON);
        assert_eq!(relation_hit.metadata.title, "Jane Doe → Acme Corp");
        assert_eq!(relation_hit.matched_fields, vec!["relation"]);
        assert_eq!(relation_hit.excerpts[0].field, "relation");
        assert_eq!(relation_hit.excerpts[0].text, "Jane Doe OWNS Acme Corp");
    }

    #[test]
    fn test_unresolved_relation_skipped() {
        // Target id 2 is missing from the entity set: the relation pass
        // must skip it while the entity pass still matches "Acme".
        let snapshot = SearchSnapshot::new()
            .with_kg_entities(vec![KgEntity::new("1", "Acme Corp", "ORG")])
            .with_kg_relations(vec![KgRelation::new("1", "2", "OWNS")]);

        let results = KgMatcher.find(&intent_for("acme"), &snapshot).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "kg-entity-1");

        let owns = KgMatcher.find(&intent_for("owns"), &snapshot).unwrap();
        assert!(owns.is_empty());
    }

    #[test]
    fn test_parallel_relations_get_distinct_ids() {
        // Two typed edges between the same endpoint pair must not share
        // a result id.
        let snapshot = SearchSnapshot::new()
            .with_kg_entities(vec![
                KgEntity::new("1", "Acme Corp", "ORG"),
                KgEntity::new("2", "Beta Ltd", "ORG"),
            ])
            .with_kg_relations(vec![
                KgRelation::new("1", "2", "OWNS"),
                KgRelation::new("1", "2", "SUPPLIES"),
            ]);

        let results = KgMatcher.find(&intent_for("acme"), &snapshot).unwrap();
        let relation_ids: Vec<&str> = results
            .iter()
            .filter(|r| r.id.starts_with("kg-relation-"))
            .map(|r| r.id.as_str())
            .collect();

        assert_eq!(relation_ids.len(), 2);
        assert_ne!(relation_ids[0], relation_ids[1]);
    }

    #[test]
    fn test_no_match_emits_nothing() {
        let results = KgMatcher
            .find(&intent_for("zebra"), &acme_snapshot())
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_entity_id_is_malformed() {
        let snapshot = SearchSnapshot::new().with_kg_entities(vec![KgEntity::new("", "X", "ORG")]);
        assert!(matches!(
            KgMatcher.find(&intent_for("x"), &snapshot),
            Err(Error::MalformedSource {
                source_type: SourceType::Kg,
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_confidence_is_malformed() {
        let snapshot = SearchSnapshot::new()
            .with_kg_entities(vec![KgEntity::new("1", "X", "ORG").with_confidence(f32::NAN)]);
        assert!(matches!(
            KgMatcher.find(&intent_for("x"), &snapshot),
            Err(Error::MalformedSource {
                source_type: SourceType::Kg,
                ..
            })
        ));
    }

    #[test]
    fn test_relation_payload() {
        let results = KgMatcher.find(&intent_for("owns"), &acme_snapshot()).unwrap();
        match &results[0].payload {
            Payload::Relation(rel) => assert_eq!(rel.relation_type, "OWNS"),
            other => panic!("Expected relation payload, got {other:?}"),
        }
    }
}
