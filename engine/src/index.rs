use crate::tokenizer::term_frequencies;
use crate::{DocId, Posting};
use parking_lot::RwLock;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

type PostingsMap = HashMap<String, Vec<Posting>>;

#[derive(Default)]
struct IndexState {
    postings: PostingsMap,
    num_docs: usize,
}

/// Term to postings map, built in parallel and read-only between rebuilds.
///
/// Postings for a term are ordered by ascending doc id regardless of how many
/// workers took part in the build.
#[derive(Default)]
pub struct InvertedIndex {
    state: RwLock<IndexState>,
    generation: AtomicU64,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh index from `docs`; doc ids are positions in the slice.
    pub fn build<S: AsRef<str> + Sync>(docs: &[S]) -> Self {
        let index = Self::new();
        index.update_document_base(docs);
        index
    }

    /// Replace the whole index with one built from `docs`.
    pub fn update_document_base<S: AsRef<str> + Sync>(&self, docs: &[S]) {
        self.update_document_base_with(docs, None);
    }

    /// Same as [`update_document_base`](Self::update_document_base) with an
    /// optional cap on the number of build workers.
    pub fn update_document_base_with<S: AsRef<str> + Sync>(&self, docs: &[S], max_workers: Option<usize>) {
        let workers = worker_count(docs.len(), max_workers);
        let partials: Vec<PostingsMap> = if workers == 0 {
            Vec::new()
        } else {
            let chunk_size = docs.len().div_ceil(workers);
            docs.par_chunks(chunk_size)
                .enumerate()
                .map(|(chunk, slice)| count_chunk(chunk * chunk_size, slice))
                .collect()
        };

        let mut state = self.state.write();
        state.postings.clear();
        for partial in partials {
            for (term, mut entries) in partial {
                state.postings.entry(term).or_default().append(&mut entries);
            }
        }
        state.num_docs = docs.len();
        self.generation.fetch_add(1, Ordering::AcqRel);

        tracing::info!(num_docs = docs.len(), num_terms = state.postings.len(), workers, "index built");
    }

    /// Postings for `term`, matched case-insensitively. Unknown terms yield an empty list.
    pub fn lookup(&self, term: &str) -> Vec<Posting> {
        let term = term.to_lowercase();
        self.state.read().postings.get(&term).cloned().unwrap_or_default()
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        let term = term.to_lowercase();
        self.state.read().postings.get(&term).map_or(0, Vec::len)
    }

    pub fn num_docs(&self) -> usize {
        self.state.read().num_docs
    }

    pub fn num_terms(&self) -> usize {
        self.state.read().postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().postings.is_empty()
    }

    /// Incremented on every rebuild.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

fn worker_count(num_docs: usize, max_workers: Option<usize>) -> usize {
    if num_docs == 0 {
        return 0;
    }
    let available = rayon::current_num_threads().max(1);
    let limit = max_workers.map_or(available, |cap| cap.clamp(1, available));
    limit.min(num_docs)
}

fn count_chunk<S: AsRef<str>>(first_doc: DocId, docs: &[S]) -> PostingsMap {
    let mut partial = PostingsMap::new();
    for (offset, text) in docs.iter().enumerate() {
        let doc_id = first_doc + offset;
        for (term, term_frequency) in term_frequencies(text.as_ref()) {
            partial.entry(term).or_default().push(Posting { doc_id, term_frequency });
        }
    }
    partial
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(doc_id: DocId, term_frequency: u32) -> Posting {
        Posting { doc_id, term_frequency }
    }

    #[test]
    fn counts_terms_per_document() {
        let idx = InvertedIndex::build(&[
            "london is the capital of great britain",
            "big ben is the nickname for the great bell of the striking clock",
        ]);
        assert_eq!(idx.lookup("london"), vec![p(0, 1)]);
        assert_eq!(idx.lookup("the"), vec![p(0, 1), p(1, 3)]);
        assert_eq!(idx.num_docs(), 2);
    }

    #[test]
    fn several_documents() {
        let idx = InvertedIndex::build(&[
            "milk milk milk milk water water water",
            "milk water water",
            "milk milk milk milk milk water water water water water",
            "americano cappuccino",
        ]);
        assert_eq!(idx.lookup("milk"), vec![p(0, 4), p(1, 1), p(2, 5)]);
        assert_eq!(idx.lookup("water"), vec![p(0, 3), p(1, 2), p(2, 5)]);
        assert_eq!(idx.lookup("cappuccino"), vec![p(3, 1)]);
    }

    #[test]
    fn missing_word() {
        let idx = InvertedIndex::build(&["a b c d e f g h i j k l", "statement"]);
        assert!(idx.lookup("m").is_empty());
        assert_eq!(idx.lookup("statement"), vec![p(1, 1)]);
        assert_eq!(idx.document_frequency("m"), 0);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let idx = InvertedIndex::build(&["The Great Bell", "great GREAT"]);
        assert_eq!(idx.lookup("GREAT"), vec![p(0, 1), p(1, 2)]);
        assert_eq!(idx.lookup("great"), idx.lookup("Great"));
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let docs: [&str; 0] = [];
        let idx = InvertedIndex::build(&docs);
        assert!(idx.is_empty());
        assert_eq!(idx.num_docs(), 0);
        assert!(idx.lookup("anything").is_empty());
    }

    #[test]
    fn blank_documents_contribute_nothing() {
        let idx = InvertedIndex::build(&["", "   ", "word"]);
        assert_eq!(idx.num_terms(), 1);
        assert_eq!(idx.lookup("word"), vec![p(2, 1)]);
    }

    #[test]
    fn overlong_terms_are_not_indexed() {
        let long = "z".repeat(101);
        let idx = InvertedIndex::build(&[format!("{long} short")]);
        assert!(idx.lookup(&long).is_empty());
        assert_eq!(idx.num_terms(), 1);
    }

    #[test]
    fn result_independent_of_worker_count() {
        let docs: Vec<String> = (0..37)
            .map(|i| format!("common term{} {}", i % 5, "rep ".repeat(i % 4 + 1)))
            .collect();
        let single = InvertedIndex::new();
        single.update_document_base_with(&docs, Some(1));
        let many = InvertedIndex::new();
        many.update_document_base_with(&docs, Some(8));

        for term in ["common", "term0", "term3", "rep"] {
            assert_eq!(single.lookup(term), many.lookup(term), "term {term}");
        }
        let common = many.lookup("common");
        assert_eq!(common.len(), 37);
        assert!(common.windows(2).all(|w| w[0].doc_id < w[1].doc_id));
    }

    #[test]
    fn rebuild_replaces_previous_state() {
        let idx = InvertedIndex::build(&["alpha beta"]);
        let before = idx.generation();
        idx.update_document_base(&["gamma"]);
        assert!(idx.lookup("alpha").is_empty());
        assert_eq!(idx.lookup("gamma"), vec![p(0, 1)]);
        assert_eq!(idx.generation(), before + 1);
    }

    #[test]
    fn worker_count_bounds() {
        assert_eq!(worker_count(0, None), 0);
        assert_eq!(worker_count(1, None), 1);
        assert_eq!(worker_count(10, Some(0)), 1);
        assert!(worker_count(3, None) <= 3);
        assert!(worker_count(1000, None) <= rayon::current_num_threads());
    }
}
