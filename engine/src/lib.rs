use serde::{Deserialize, Serialize};

pub mod cache;
pub mod config;
pub mod index;
pub mod search;
pub mod tokenizer;

pub use cache::ResultCache;
pub use config::EngineConfig;
pub use index::InvertedIndex;
pub use search::{truncate_results, SearchServer};

pub type DocId = usize;

/// Tolerance used whenever two ranks are compared.
pub const RANK_EPSILON: f32 = 0.0001;

/// Occurrences of one term in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_frequency: u32,
}

/// Score of one document for one query, relative to the best candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RelativeIndex {
    pub doc_id: DocId,
    pub rank: f32,
}

impl PartialEq for RelativeIndex {
    fn eq(&self, other: &Self) -> bool {
        self.doc_id == other.doc_id && (self.rank - other.rank).abs() < RANK_EPSILON
    }
}
