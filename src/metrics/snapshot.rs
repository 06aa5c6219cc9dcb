/// Counters and gauges copied out of an LRU or LFU cache.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CacheMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,

    pub evicted_entries: u64,
    pub clears: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl CacheMetricsSnapshot {
    /// Fraction of `get` calls that hit; 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

/// ARC snapshot: core counters plus adaptation signals.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ArcMetricsSnapshot {
    pub core: CacheMetricsSnapshot,

    pub t1_to_t2_promotions: u64,
    pub b1_ghost_hits: u64,
    pub b2_ghost_hits: u64,
    pub p_increases: u64,
    pub p_decreases: u64,
    pub t1_evictions: u64,
    pub t2_evictions: u64,

    pub p: usize,
    pub b1_len: usize,
    pub b2_len: usize,
}
