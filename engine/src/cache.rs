//! Bounded memo of resolved queries.
//!
//! Eviction is a bulk approximation, not LRU: once the cache is full the
//! older half of the entries, by insertion order, is dropped in one go.
//! Lookups never refresh an entry's position.

use crate::RelativeIndex;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Vec<RelativeIndex>>,
    order: VecDeque<String>,
    generation: u64,
}

impl CacheState {
    fn evict_oldest_half(&mut self) {
        let evict = self.entries.len().div_ceil(2);
        for key in self.order.drain(..evict) {
            self.entries.remove(&key);
        }
    }

    fn insert(&mut self, capacity: usize, key: String, result: Vec<RelativeIndex>) {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = result;
            return;
        }
        if self.entries.len() >= capacity {
            self.evict_oldest_half();
            tracing::debug!(remaining = self.entries.len(), "result cache evicted");
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, result);
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

pub struct ResultCache {
    state: Mutex<CacheState>,
    capacity: usize,
}

impl ResultCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { state: Mutex::new(CacheState::default()), capacity }
    }

    pub fn get(&self, key: &str) -> Option<Vec<RelativeIndex>> {
        self.state.lock().entries.get(key).cloned()
    }

    pub fn put(&self, key: String, result: Vec<RelativeIndex>) {
        if self.capacity == 0 {
            return;
        }
        self.state.lock().insert(self.capacity, key, result);
    }

    /// Drop every entry if they were computed against an older index generation.
    pub fn sync(&self, generation: u64) {
        let mut state = self.state.lock();
        if state.generation != generation {
            state.clear();
            state.generation = generation;
        }
    }

    /// Store `result` only if the cache still tracks `generation`.
    pub fn put_for(&self, generation: u64, key: String, result: Vec<RelativeIndex>) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.state.lock();
        if state.generation == generation {
            state.insert(self.capacity, key, result);
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
