//! Search orchestration
//!
//! This module provides:
//! - SearchEngine: caller-held state (filters, options, memoized intent)
//! - Matcher fan-out with per-source failure isolation
//! - The full pipeline: analyze → match → rank → filter → facet → paginate
//!
//! # Stateless pipeline
//!
//! Every pipeline stage is a pure function; the engine itself holds only
//! caller-side state. A search never mutates the snapshot, so concurrent
//! queries against the same snapshot cannot interfere.

use crate::facets::compute_facets;
use crate::filter::apply_filters;
use crate::intent::{analyze, QueryIntent};
use crate::matchers::{default_matchers, SourceMatcher};
use crate::paginate::paginate;
use crate::ranker::rank;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use unisearch_core::{
    Result, SearchFilters, SearchOptions, SearchOutput, SearchSnapshot, SearchStats, SourceType,
    SourceWarning, UnifiedResult,
};

/// Memoized intent, invalidated when the query or enabled types change
struct CachedIntent {
    query: String,
    enabled: Vec<SourceType>,
    intent: QueryIntent,
}

// ============================================================================
// SearchEngine
// ============================================================================

/// Unified search orchestrator
///
/// # Architecture
///
/// ```text
/// query text
///      │
///      ▼
/// ┌────────────────────────────────────────┐
/// │             SearchEngine               │
/// │  ┌──────────────┐                      │
/// │  │intent analyze│ (memoized per query) │
/// │  └──────┬───────┘                      │
/// │         │ fan-out                      │
/// │  ┌──────┴───────────────┐              │
/// │  │  RAG    KG    IDP    │ (parallel)   │
/// │  └──────┬───────────────┘              │
/// │         ▼                              │
/// │   rank → filter → facets → paginate    │
/// └────────────────┬───────────────────────┘
///                  ▼
///            SearchOutput
/// ```
///
/// # Superseding
///
/// Each call bumps a generation counter and stamps it into the returned
/// output. Callers running queries concurrently (e.g., behind a debounce)
/// must discard any page whose generation is older than
/// [`SearchEngine::generation`] — stale results are never merged.
///
/// # Failure isolation
///
/// A matcher failing on malformed source data is dropped for that search
/// only: its failure is logged and surfaced as a [`SourceWarning`], and
/// the remaining sources still contribute results.
pub struct SearchEngine {
    filters: SearchFilters,
    options: SearchOptions,
    matchers: Vec<Box<dyn SourceMatcher>>,
    cached: Option<CachedIntent>,
    generation: AtomicU64,
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new()
    }
}

impl SearchEngine {
    /// Create an engine with default filters, options, and matchers
    pub fn new() -> Self {
        SearchEngine {
            filters: SearchFilters::default(),
            options: SearchOptions::default(),
            matchers: default_matchers(),
            cached: None,
            generation: AtomicU64::new(0),
        }
    }

    /// Replace the caller filters
    ///
    /// # Errors
    ///
    /// Rejects filters with no enabled source types.
    pub fn set_filters(&mut self, filters: SearchFilters) -> Result<()> {
        filters.validate()?;
        self.filters = filters;
        Ok(())
    }

    /// Replace the pagination and sort options
    ///
    /// # Errors
    ///
    /// Rejects a zero limit.
    pub fn set_options(&mut self, options: SearchOptions) -> Result<()> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    /// Current filters
    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// Current options
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Current superseding generation
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    // ========================================================================
    // Search Orchestration
    // ========================================================================

    /// Run the full pipeline for one query against a snapshot
    ///
    /// Re-invoking with updated filters or options is idempotent and does
    /// not re-derive the intent unless the query text (or the enabled
    /// type set) changed.
    ///
    /// # Errors
    ///
    /// Invalid input only: empty query, invalid filters or pagination. A
    /// query matching nothing returns an empty page with zero facets.
    pub fn search(&mut self, query: &str, snapshot: &SearchSnapshot) -> Result<SearchOutput> {
        let start = Instant::now();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.filters.validate()?;
        self.options.validate()?;
        let intent = self.intent_for(query)?;

        // Date syntax in the query text acts as a filter, but an explicit
        // caller-set date range takes precedence over it.
        let mut effective = self.filters.clone();
        if effective.date_range.is_none() {
            effective.date_range = intent.extracted.date_range;
        }

        let (candidates, warnings, mut stats) = self.run_matchers(&intent, &effective, snapshot);

        let ranked = rank(candidates, &self.options);
        let filtered = apply_filters(ranked, &effective);
        let facets = compute_facets(&filtered);
        let total = filtered.len();
        let results = paginate(filtered, self.options.offset, self.options.limit)?;

        stats.elapsed_micros = start.elapsed().as_micros() as u64;

        Ok(SearchOutput {
            results,
            facets,
            total,
            warnings,
            generation,
            stats,
        })
    }

    /// Fan out to every matcher selected by the intent and filters
    ///
    /// Matchers are pure and `Send + Sync`, so the fan-out runs in
    /// parallel; per-source failures become warnings instead of failing
    /// the whole search.
    fn run_matchers(
        &self,
        intent: &QueryIntent,
        filters: &SearchFilters,
        snapshot: &SearchSnapshot,
    ) -> (Vec<UnifiedResult>, Vec<SourceWarning>, SearchStats) {
        let active: Vec<&dyn SourceMatcher> = self
            .matchers
            .iter()
            .map(|m| m.as_ref())
            .filter(|m| {
                intent.includes_source(m.source_type()) && filters.allows_type(m.source_type())
            })
            .collect();

        let outcomes: Vec<(SourceType, Result<Vec<UnifiedResult>>)> = active
            .par_iter()
            .map(|matcher| (matcher.source_type(), matcher.find(intent, snapshot)))
            .collect();

        let mut candidates = Vec::new();
        let mut warnings = Vec::new();
        let mut stats = SearchStats::default();

        for (source, outcome) in outcomes {
            match outcome {
                Ok(results) => {
                    stats.add_source_candidates(source, results.len());
                    candidates.extend(results);
                }
                Err(err) => {
                    tracing::warn!(
                        source = %source,
                        error = %err,
                        "source matcher failed; dropping source for this search"
                    );
                    warnings.push(SourceWarning {
                        source,
                        message: err.to_string(),
                    });
                }
            }
        }

        (candidates, warnings, stats)
    }

    /// Memoized intent analysis keyed by query text and enabled types
    fn intent_for(&mut self, query: &str) -> Result<QueryIntent> {
        let enabled = self.filters.types.clone();
        if let Some(cached) = &self.cached {
            if cached.query == query && cached.enabled == enabled {
                return Ok(cached.intent.clone());
            }
        }
        let intent = analyze(query, &enabled)?;
        self.cached = Some(CachedIntent {
            query: query.to_string(),
            enabled,
            intent: intent.clone(),
        });
        Ok(intent)
    }
}

// ============================================================================
// Tests
// ============================================================================
