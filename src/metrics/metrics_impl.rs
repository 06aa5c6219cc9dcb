use crate::metrics::snapshot::{ArcMetricsSnapshot, CacheMetricsSnapshot};
use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder};

/// Live counters for LRU and LFU.
#[derive(Debug, Default, Clone)]
pub struct CacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub evicted_entries: u64,
    pub clears: u64,
}

impl CacheMetrics {
    pub fn snapshot(&self, len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_new: self.insert_new,
            insert_updates: self.insert_updates,
            evicted_entries: self.evicted_entries,
            clears: self.clears,
            cache_len: len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for CacheMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

/// Live counters for ARC.
#[derive(Debug, Default, Clone)]
pub struct ArcMetrics {
    pub core: CacheMetrics,
    pub t1_to_t2_promotions: u64,
    pub b1_ghost_hits: u64,
    pub b2_ghost_hits: u64,
    pub p_increases: u64,
    pub p_decreases: u64,
    pub t1_evictions: u64,
    pub t2_evictions: u64,
}

impl ArcMetrics {
    pub fn snapshot(
        &self,
        len: usize,
        capacity: usize,
        p: usize,
        ghost_len: (usize, usize),
    ) -> ArcMetricsSnapshot {
        ArcMetricsSnapshot {
            core: self.core.snapshot(len, capacity),
            t1_to_t2_promotions: self.t1_to_t2_promotions,
            b1_ghost_hits: self.b1_ghost_hits,
            b2_ghost_hits: self.b2_ghost_hits,
            p_increases: self.p_increases,
            p_decreases: self.p_decreases,
            t1_evictions: self.t1_evictions,
            t2_evictions: self.t2_evictions,
            p,
            b1_len: ghost_len.0,
            b2_len: ghost_len.1,
        }
    }
}

impl CoreMetricsRecorder for ArcMetrics {
    fn record_get_hit(&mut self) {
        self.core.record_get_hit();
    }

    fn record_get_miss(&mut self) {
        self.core.record_get_miss();
    }

    fn record_insert_call(&mut self) {
        self.core.record_insert_call();
    }

    fn record_insert_new(&mut self) {
        self.core.record_insert_new();
    }

    fn record_insert_update(&mut self) {
        self.core.record_insert_update();
    }

    fn record_evicted_entry(&mut self) {
        self.core.record_evicted_entry();
    }

    fn record_clear(&mut self) {
        self.core.record_clear();
    }
}

impl ArcMetricsRecorder for ArcMetrics {
    fn record_t1_to_t2_promotion(&mut self) {
        self.t1_to_t2_promotions += 1;
    }

    fn record_b1_ghost_hit(&mut self) {
        self.b1_ghost_hits += 1;
    }

    fn record_b2_ghost_hit(&mut self) {
        self.b2_ghost_hits += 1;
    }

    fn record_p_increase(&mut self) {
        self.p_increases += 1;
    }

    fn record_p_decrease(&mut self) {
        self.p_decreases += 1;
    }

    fn record_t1_eviction(&mut self) {
        self.t1_evictions += 1;
        self.core.record_evicted_entry();
    }

    fn record_t2_eviction(&mut self) {
        self.t2_evictions += 1;
        self.core.record_evicted_entry();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_metrics_count_hits_and_misses() {
        let mut m = CacheMetrics::default();
        m.record_get_hit();
        m.record_get_hit();
        m.record_get_miss();
        let snap = m.snapshot(2, 8);
        assert_eq!(snap.get_calls, 3);
        assert_eq!(snap.get_hits, 2);
        assert_eq!(snap.cache_len, 2);
        assert!((snap.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn arc_evictions_roll_into_core_count() {
        let mut m = ArcMetrics::default();
        m.record_t1_eviction();
        m.record_t2_eviction();
        m.record_t2_eviction();
        let snap = m.snapshot(0, 4, 1, (1, 2));
        assert_eq!(snap.t1_evictions, 1);
        assert_eq!(snap.t2_evictions, 2);
        assert_eq!(snap.core.evicted_entries, 3);
        assert_eq!(snap.b2_len, 2);
    }
}
