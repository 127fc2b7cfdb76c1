use std::collections::{HashMap, HashSet};

/// Terms longer than this many characters are never indexed.
pub const MAX_TERM_LEN: usize = 100;

fn normalize(token: &str) -> Option<String> {
    if token.chars().count() > MAX_TERM_LEN {
        return None;
    }
    Some(token.to_lowercase())
}

/// Split text on whitespace into lowercase terms, dropping over-long tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().filter_map(normalize).collect()
}

/// Per-term occurrence counts for a single document.
pub fn term_frequencies(text: &str) -> HashMap<String, u32> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Distinct lowercase query terms in first-seen order.
///
/// Over-long terms are kept: they have no postings, so a query naming one
/// matches nothing.
pub fn query_terms(query: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|term| seen.insert(term.clone()))
        .collect()
}
