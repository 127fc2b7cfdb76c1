/// Tunables for index construction and query resolution.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Maximum number of cached query results; 0 disables the cache.
    pub cache_capacity: usize,
    /// Upper bound on build workers. `None` uses every thread of the rayon pool.
    pub build_threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            build_threads: None,
        }
    }
}
