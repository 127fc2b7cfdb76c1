use crate::cache::ResultCache;
use crate::config::EngineConfig;
use crate::index::InvertedIndex;
use crate::tokenizer::query_terms;
use crate::{DocId, Posting, RelativeIndex, RANK_EPSILON};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Resolves multi-word AND queries against a shared index, memoizing results.
///
/// A single server may be used from many threads at once.
pub struct SearchServer {
    index: Arc<InvertedIndex>,
    cache: ResultCache,
}

impl SearchServer {
    pub fn new(index: Arc<InvertedIndex>) -> Self {
        Self::with_config(index, &EngineConfig::default())
    }

    pub fn with_config(index: Arc<InvertedIndex>, config: &EngineConfig) -> Self {
        Self { index, cache: ResultCache::with_capacity(config.cache_capacity) }
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.len()
    }

    /// Resolve every query, returning results in submission order.
    pub fn search<S: AsRef<str> + Sync>(&self, queries: &[S]) -> Vec<Vec<RelativeIndex>> {
        queries.par_iter().map(|q| self.resolve(q.as_ref())).collect()
    }

    /// Documents containing every distinct query term, best first.
    pub fn resolve(&self, query: &str) -> Vec<RelativeIndex> {
        let key = query.to_lowercase();
        if key.trim().is_empty() {
            return Vec::new();
        }

        let generation = self.index.generation();
        self.cache.sync(generation);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(query = %key, "cache hit");
            return hit;
        }

        let result = self.compute(&key);
        tracing::debug!(query = %key, hits = result.len(), "query resolved");

        // a rebuild mid-query may have mixed two index states
        if self.index.generation() == generation {
            self.cache.put_for(generation, key, result.clone());
        }
        result
    }

    fn compute(&self, query: &str) -> Vec<RelativeIndex> {
        let mut terms: Vec<Vec<Posting>> = query_terms(query)
            .iter()
            .map(|term| self.index.lookup(term))
            .collect();
        if terms.is_empty() {
            return Vec::new();
        }
        // rarest first; stable sort keeps query order on equal frequency
        terms.sort_by_key(Vec::len);

        let candidates = match intersect(&terms) {
            Some(docs) => docs,
            None => return Vec::new(),
        };

        let mut relevance: BTreeMap<DocId, u64> = candidates.into_iter().map(|doc| (doc, 0)).collect();
        for postings in &terms {
            for posting in postings {
                if let Some(total) = relevance.get_mut(&posting.doc_id) {
                    *total += u64::from(posting.term_frequency);
                }
            }
        }
        let max_relevance = relevance.values().copied().max().unwrap_or(0);

        let mut results: Vec<RelativeIndex> = relevance
            .into_iter()
            .map(|(doc_id, total)| RelativeIndex { doc_id, rank: relative_rank(total, max_relevance) })
            .collect();
        order_by_rank(&mut results);
        results
    }
}

/// Running intersection of doc id sets; `None` as soon as it becomes empty.
fn intersect(terms: &[Vec<Posting>]) -> Option<BTreeSet<DocId>> {
    let mut running: Option<BTreeSet<DocId>> = None;
    for postings in terms {
        let docs: BTreeSet<DocId> = postings.iter().map(|p| p.doc_id).collect();
        let next = match running {
            None => docs,
            Some(prev) => prev.intersection(&docs).copied().collect(),
        };
        if next.is_empty() {
            return None;
        }
        running = Some(next);
    }
    running
}

fn relative_rank(relevance: u64, max_relevance: u64) -> f32 {
    if max_relevance == 0 {
        return 0.0;
    }
    (relevance as f64 / max_relevance as f64) as f32
}

/// Descending rank. Runs of neighbours whose ranks differ by less than
/// [`RANK_EPSILON`] count as one tie and are ordered by ascending doc id.
fn order_by_rank(results: &mut [RelativeIndex]) {
    results.sort_by(|a, b| b.rank.total_cmp(&a.rank).then(a.doc_id.cmp(&b.doc_id)));
    let mut start = 0;
    while start < results.len() {
        let mut end = start + 1;
        while end < results.len() && results[end - 1].rank - results[end].rank < RANK_EPSILON {
            end += 1;
        }
        results[start..end].sort_by_key(|r| r.doc_id);
        start = end;
    }
}

/// Cap each query's result list at `max_results` entries.
pub fn truncate_results(mut results: Vec<Vec<RelativeIndex>>, max_results: usize) -> Vec<Vec<RelativeIndex>> {
    for answer in &mut results {
        answer.truncate(max_results);
    }
    results
}
