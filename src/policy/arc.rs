//! Adaptive Replacement Cache (ARC) replacement policy.
//!
//! ARC splits resident capacity between a recency list and a frequency list
//! and moves the split point `p` on its own, using ghost lists of recently
//! evicted keys as evidence of which side was undersized.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ArcCache<K, V> Layout                          │
//! │                                                                         │
//! │   Resident (values)                                                     │
//! │   T1: LinkedMap<K, V>  seen once recently                               │
//! │   ┌───────────────────────────────┐                                     │
//! │   │ MRU [k5] ◄──► [k3] ◄──► [k9]  │ oldest → B1 on eviction             │
//! │   └───────────────────────────────┘                                     │
//! │   T2: LinkedMap<K, V>  seen twice or more                               │
//! │   ┌───────────────────────────────┐                                     │
//! │   │ MRU [k1] ◄──► [k7]            │ oldest → B2 on eviction             │
//! │   └───────────────────────────────┘                                     │
//! │                                                                         │
//! │   Ghosts (keys only, each bounded by capacity)                          │
//! │   B1: GhostList<K>   evicted from T1                                    │
//! │   B2: GhostList<K>   evicted from T2                                    │
//! │                                                                         │
//! │   p: target size of T1, 0 ≤ p ≤ capacity                                │
//! │   • hit in B1 → p grows   (recency side was too small)                  │
//! │   • hit in B2 → p shrinks (frequency side was too small)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insert Flow
//!
//! `insert` classifies the key once as a [`Residency`] (or absent) and
//! dispatches:
//!
//! ```text
//!   T1      → move to T2 MRU with the new value
//!   T2      → refresh at T2 MRU with the new value
//!   B1      → p = min(cap, p + max(1, |B2| / |B1|)); replace(false);
//!             drop ghost; insert at T2 MRU
//!   B2      → p = p - max(1, |B1| / |B2|) (floored at 0); replace(true);
//!             drop ghost; insert at T2 MRU
//!   absent  → if |T1| + |T2| == cap:
//!                 |T1| < cap → drop oldest B2 ghost, replace(false)
//!                 |T1| = cap → oldest T1 straight into B1
//!             if |T1| + |T2| > cap: replace(false)
//!             insert at T1 MRU
//! ```
//!
//! ## Replace
//!
//! ```text
//!   replace(in_b2):
//!     if |T1| > 0 and (|T1| >= max(1, p) or (in_b2 and |T1| == p)):
//!         oldest T1 → B1 MRU   (B1 trimmed to cap)
//!     else if |T2| > 0:
//!         oldest T2 → B2 MRU   (B2 trimmed to cap)
//! ```
//!
//! ## Access Flow
//!
//! `get` hits only resident keys: a T1 hit moves the entry to T2 MRU, a T2 hit
//! refreshes it. A key that only survives as a ghost is a miss.
//!
//! ## Operations
//!
//! | Operation   | Time   | Notes                                      |
//! |-------------|--------|--------------------------------------------|
//! | `get`       | O(1)   | May promote T1→T2                          |
//! | `insert`    | O(1)   | At most one eviction plus one ghost trim   |
//! | `contains`  | O(1)   | Resident keys only                         |
//! | `len`       | O(1)   | `|T1| + |T2|`                              |
//! | `clear`     | O(n)   | Also resets `p` to 0                       |
//!
//! ## Example Usage
//!
//! ```
//! use arcache::policy::arc::{ArcCache, Residency};
//! use arcache::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = ArcCache::new(2);
//! cache.insert("a", 1);
//! cache.insert("b", 2);
//! cache.get(&"a"); // promoted to T2
//! assert_eq!(cache.residency(&"a"), Some(Residency::T2));
//!
//! cache.insert("c", 3); // "b" leaves T1 and becomes a B1 ghost
//! assert_eq!(cache.residency(&"b"), Some(Residency::B1));
//! assert!(!cache.contains(&"b"));
//!
//! cache.insert("b", 4); // ghost hit: p grows
//! assert_eq!(cache.p_value(), 1);
//! assert_eq!(cache.get(&"b"), Some(&4));
//! ```
//!
//! ## Thread Safety
//!
//! `ArcCache` is not synchronized; wrap it in `SharedCache` (feature
//! `concurrency`) or a lock of your own to share it.

use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::ds::{GhostList, LinkedMap};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{
    ArcMetrics, ArcMetricsRecorder, ArcMetricsSnapshot, CoreMetricsRecorder,
    MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, MutableCache, ReadOnlyCache};

/// Which ARC list currently holds a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Residency {
    /// Resident, seen once recently.
    T1,
    /// Resident, seen at least twice.
    T2,
    /// Ghost of a T1 eviction.
    B1,
    /// Ghost of a T2 eviction.
    B2,
}

impl Residency {
    /// `true` for T1 and T2, the lists that hold values.
    pub fn is_resident(self) -> bool {
        matches!(self, Residency::T1 | Residency::T2)
    }
}

/// Adaptive Replacement Cache.
pub struct ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    t1: LinkedMap<K, V>,
    t2: LinkedMap<K, V>,
    b1: GhostList<K>,
    b2: GhostList<K>,
    p: usize,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: ArcMetrics,
}

/// `max(1, other / hit)`, or 1 when the hit list is empty.
fn ghost_delta(other: usize, hit: usize) -> usize {
    other.checked_div(hit).map_or(1, |d| d.max(1))
}

impl<K, V> ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an ARC cache holding at most `capacity` resident entries.
    ///
    /// Each ghost list is bounded by `capacity` as well. With a capacity of 0
    /// the cache retains nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            t1: LinkedMap::with_capacity(capacity),
            t2: LinkedMap::with_capacity(capacity),
            b1: GhostList::new(capacity),
            b2: GhostList::new(capacity),
            p: 0,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: ArcMetrics::default(),
        }
    }

    /// Like [`new`](Self::new) but rejects a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity("ARC"));
        }
        Ok(Self::new(capacity))
    }

    /// Current target size of T1.
    pub fn p_value(&self) -> usize {
        self.p
    }

    pub fn t1_len(&self) -> usize {
        self.t1.len()
    }

    pub fn t2_len(&self) -> usize {
        self.t2.len()
    }

    pub fn b1_len(&self) -> usize {
        self.b1.len()
    }

    pub fn b2_len(&self) -> usize {
        self.b2.len()
    }

    /// Reports which list holds `key`, without recording an access.
    pub fn residency(&self, key: &K) -> Option<Residency> {
        if self.t1.contains(key) {
            Some(Residency::T1)
        } else if self.t2.contains(key) {
            Some(Residency::T2)
        } else if self.b1.contains(key) {
            Some(Residency::B1)
        } else if self.b2.contains(key) {
            Some(Residency::B2)
        } else {
            None
        }
    }

    /// Reads a resident value without promoting it.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.t1.get(key).or_else(|| self.t2.get(key))
    }

    /// Evicts one resident entry into its ghost list.
    fn replace(&mut self, in_b2: bool) {
        let t1_len = self.t1.len();
        if t1_len > 0 && (t1_len >= self.p.max(1) || (in_b2 && t1_len == self.p)) {
            self.evict_t1();
        } else if let Some((key, _)) = self.t2.pop_oldest() {
            trace!(policy = "arc", from = "t2", p = self.p, "evicted entry into b2");
            self.b2.record(key);
            #[cfg(feature = "metrics")]
            self.metrics.record_t2_eviction();
        }
    }

    fn evict_t1(&mut self) {
        if let Some((key, _)) = self.t1.pop_oldest() {
            trace!(policy = "arc", from = "t1", p = self.p, "evicted entry into b1");
            self.b1.record(key);
            #[cfg(feature = "metrics")]
            self.metrics.record_t1_eviction();
        }
    }

    /// Handles a put on a key remembered in B1 or B2.
    fn ghost_hit(&mut self, key: K, value: V, in_b2: bool) {
        let (b1_len, b2_len) = (self.b1.len(), self.b2.len());
        if in_b2 {
            let delta = ghost_delta(b1_len, b2_len);
            self.p = self.p.saturating_sub(delta);
            trace!(policy = "arc", ghost = "b2", delta, p = self.p, b1_len, b2_len, "ghost hit");
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_b2_ghost_hit();
                self.metrics.record_p_decrease();
            }
        } else {
            let delta = ghost_delta(b2_len, b1_len);
            self.p = self.p.saturating_add(delta).min(self.capacity);
            trace!(policy = "arc", ghost = "b1", delta, p = self.p, b1_len, b2_len, "ghost hit");
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_b1_ghost_hit();
                self.metrics.record_p_increase();
            }
        }

        self.replace(in_b2);
        if in_b2 {
            self.b2.remove(&key);
        } else {
            self.b1.remove(&key);
        }
        self.t2.insert(key, value);
    }

    /// Makes room for a key found in no list.
    fn make_room_for_new(&mut self) {
        let total = self.t1.len() + self.t2.len();
        if total == self.capacity {
            if self.t1.len() < self.capacity {
                self.b2.pop_oldest();
                self.replace(false);
            } else {
                self.evict_t1();
            }
        } else if total > self.capacity {
            self.replace(false);
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.t1.check_invariants()?;
        self.t2.check_invariants()?;

        let resident = self.t1.len() + self.t2.len();
        if resident > self.capacity {
            return Err(InvariantError::new(format!(
                "|T1| + |T2| = {resident} exceeds capacity {}",
                self.capacity
            )));
        }
        if self.b1.len() > self.capacity || self.b2.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "ghost lists ({}, {}) exceed capacity {}",
                self.b1.len(),
                self.b2.len(),
                self.capacity
            )));
        }
        if self.p > self.capacity {
            return Err(InvariantError::new(format!(
                "p = {} exceeds capacity {}",
                self.p, self.capacity
            )));
        }

        for key in self.t1.keys() {
            if self.t2.contains(key) || self.b1.contains(key) || self.b2.contains(key) {
                return Err(InvariantError::new("T1 key is present in another list"));
            }
        }
        for key in self.t2.keys() {
            if self.b1.contains(key) || self.b2.contains(key) {
                return Err(InvariantError::new("T2 key is present in a ghost list"));
            }
        }
        if self.b1.iter().any(|key| self.b2.contains(key)) {
            return Err(InvariantError::new("key is a ghost in both B1 and B2"));
        }
        Ok(())
    }
}

impl<K, V> ReadOnlyCache<K, V> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        self.residency(key).is_some_and(Residency::is_resident)
    }

    fn len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> CoreCache<K, V> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return None;
        }

        match self.residency(&key) {
            Some(Residency::T1) => {
                let (owned, previous) = self.t1.remove_entry(&key)?;
                self.t2.insert(owned, value);
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_insert_update();
                    self.metrics.record_t1_to_t2_promotion();
                }
                Some(previous)
            },
            Some(Residency::T2) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_update();
                self.t2.insert(key, value)
            },
            Some(Residency::B1) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_new();
                self.ghost_hit(key, value, false);
                None
            },
            Some(Residency::B2) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_new();
                self.ghost_hit(key, value, true);
                None
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_new();
                self.make_room_for_new();
                self.t1.insert(key, value);
                None
            },
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if let Some((owned, value)) = self.t1.remove_entry(key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_get_hit();
                self.metrics.record_t1_to_t2_promotion();
            }
            self.t2.insert(owned, value);
            return self.t2.get(key);
        }

        let value = self.t2.move_to_mru(key);
        #[cfg(feature = "metrics")]
        {
            if value.is_some() {
                self.metrics.record_get_hit();
            } else {
                self.metrics.record_get_miss();
            }
        }
        value
    }

    fn clear(&mut self) {
        debug!(
            policy = "arc",
            dropped = self.t1.len() + self.t2.len(),
            p = self.p,
            "clearing cache"
        );
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.t1.clear();
        self.t2.clear();
        self.b1.clear();
        self.b2.clear();
        self.p = 0;
    }
}

impl<K, V> MutableCache<K, V> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Removes a resident entry; no ghost is recorded for it.
    fn remove(&mut self, key: &K) -> Option<V> {
        self.t1.remove(key).or_else(|| self.t2.remove(key))
    }
}

#[cfg(feature = "metrics")]
impl<K, V> ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> ArcMetricsSnapshot {
        self.metrics.snapshot(
            self.len(),
            self.capacity,
            self.p,
            (self.b1.len(), self.b2.len()),
        )
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<ArcMetricsSnapshot> for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> ArcMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCache")
            .field("capacity", &self.capacity)
            .field("p", &self.p)
            .field("t1_len", &self.t1.len())
            .field("t2_len", &self.t2.len())
            .field("b1_len", &self.b1.len())
            .field("b2_len", &self.b2.len())
            .finish()
    }
}

impl<K, V> Default for ArcCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_new_cache() {
        let cache: ArcCache<u32, u32> = ArcCache::new(10);
        assert_eq!(cache.capacity(), 10);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.p_value(), 0);
        assert_eq!(cache.t1_len() + cache.t2_len() + cache.b1_len() + cache.b2_len(), 0);
    }

    #[test]
    fn arc_single_slot_scenario() {
        let mut cache = ArcCache::new(1);
        cache.insert(1, 1);
        cache.insert(2, 2);
        assert_eq!(cache.residency(&2), Some(Residency::T1));
        assert_eq!(cache.residency(&1), Some(Residency::B1));
        assert_eq!(cache.t1_len(), 1);
        assert_eq!(cache.b1_len(), 1);

        assert_eq!(cache.insert(1, 3), None);
        assert_eq!(cache.p_value(), 1);
        assert_eq!(cache.residency(&1), Some(Residency::T2));
        assert_eq!(cache.residency(&2), Some(Residency::B1));
        assert_eq!(cache.t1_len(), 0);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&1), Some(&3));
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn arc_ghost_hit_in_b1_grows_p() {
        let capacity = 4;
        let mut cache = ArcCache::new(capacity);
        for key in 0..=capacity {
            cache.insert(key, key * 10);
        }
        assert_eq!(cache.residency(&0), Some(Residency::B1));
        let p_before = cache.p_value();

        cache.insert(0, 99);
        assert!(cache.p_value() > p_before);
        assert_eq!(cache.residency(&0), Some(Residency::T2));
        assert_eq!(cache.len(), capacity);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn arc_ghost_hit_in_b2_shrinks_p() {
        let mut cache = ArcCache::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c"); // 1 → B1
        cache.insert(1, "a"); // B1 hit: p = 1, 2 → B1
        assert_eq!(cache.p_value(), 1);

        cache.get(&3); // T2 = {3, 1}
        cache.insert(4, "d"); // T2 oldest (1) → B2
        assert_eq!(cache.residency(&1), Some(Residency::B2));

        cache.insert(1, "a2"); // B2 hit
        assert_eq!(cache.p_value(), 0);
        assert_eq!(cache.residency(&1), Some(Residency::T2));
        assert_eq!(cache.residency(&4), Some(Residency::B1));
        assert_eq!(cache.len(), 2);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn arc_ghost_is_not_a_hit() {
        let mut cache = ArcCache::new(1);
        cache.insert(1, 1);
        cache.insert(2, 2);
        assert_eq!(cache.residency(&1), Some(Residency::B1));

        assert_eq!(cache.get(&1), None);
        assert!(!cache.contains(&1));
        assert_eq!(cache.p_value(), 0);
        assert_eq!(cache.residency(&1), Some(Residency::B1));
    }

    #[test]
    fn arc_cold_miss_on_full_cache_drops_oldest_b2_ghost() {
        let mut cache = ArcCache::new(2);
        cache.insert(1, ());
        cache.insert(2, ());
        cache.get(&1);
        cache.get(&2); // T2 = {2, 1}, T1 empty
        cache.insert(3, ()); // 1 → B2
        assert_eq!(cache.residency(&1), Some(Residency::B2));
        assert_eq!(cache.b2_len(), 1);

        cache.get(&3); // T2 = {3, 2}
        cache.insert(4, ()); // full, |T1| < cap: ghost 1 goes, then 2 → B2
        assert_eq!(cache.residency(&1), None);
        assert_eq!(cache.residency(&2), Some(Residency::B2));
        assert_eq!(cache.b2_len(), 1);
        assert_eq!(cache.residency(&4), Some(Residency::T1));
        assert_eq!(cache.p_value(), 0);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn arc_residency_reports_resident_lists() {
        assert!(Residency::T1.is_resident());
        assert!(Residency::T2.is_resident());
        assert!(!Residency::B1.is_resident());
        assert!(!Residency::B2.is_resident());
    }

    #[test]
    fn arc_get_promotes_t1_to_t2() {
        let mut cache = ArcCache::new(4);
        cache.insert("k", 1);
        assert_eq!(cache.residency(&"k"), Some(Residency::T1));
        assert_eq!(cache.get(&"k"), Some(&1));
        assert_eq!(cache.residency(&"k"), Some(Residency::T2));
        assert_eq!(cache.get(&"k"), Some(&1));
        assert_eq!(cache.t2_len(), 1);
        assert_eq!(cache.t1_len(), 0);
    }

    #[test]
    fn arc_update_returns_previous_value() {
        let mut cache = ArcCache::new(4);
        cache.insert("k", 1);
        assert_eq!(cache.insert("k", 2), Some(1));
        assert_eq!(cache.residency(&"k"), Some(Residency::T2));
        assert_eq!(cache.insert("k", 3), Some(2));
        assert_eq!(cache.peek(&"k"), Some(&3));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn arc_scan_does_not_flush_frequent_entries() {
        let mut cache = ArcCache::new(4);
        cache.insert(1, ());
        cache.insert(2, ());
        cache.get(&1);
        cache.get(&2);

        for key in 100..200 {
            cache.insert(key, ());
        }
        assert!(cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.b1_len() <= 4);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn arc_remove_leaves_no_ghost() {
        let mut cache = ArcCache::new(3);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.get(&2);

        assert_eq!(cache.remove(&1), Some("a"));
        assert_eq!(cache.remove(&2), Some("b"));
        assert_eq!(cache.remove(&3), None);
        assert_eq!(cache.residency(&1), None);
        assert_eq!(cache.residency(&2), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn arc_clear_resets_adaptation() {
        let mut cache = ArcCache::new(1);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(1, 3);
        assert_eq!(cache.p_value(), 1);

        cache.clear();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.p_value(), 0);
        assert_eq!(cache.b1_len() + cache.b2_len(), 0);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.residency(&2), None);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn arc_zero_capacity() {
        let mut cache = ArcCache::new(0);
        assert_eq!(cache.insert(1, 1), None);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.residency(&1), None);
        assert!(cache.check_invariants().is_ok());
        assert!(ArcCache::<u8, u8>::try_new(0).is_err());
        assert!(ArcCache::<u8, u8>::try_new(1).is_ok());
    }

    #[test]
    fn arc_ghost_delta_uses_integer_ratio() {
        assert_eq!(ghost_delta(0, 0), 1);
        assert_eq!(ghost_delta(0, 3), 1);
        assert_eq!(ghost_delta(7, 2), 3);
        assert_eq!(ghost_delta(2, 7), 1);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn arc_metrics_track_ghost_hits() {
        let mut cache = ArcCache::new(1);
        cache.insert(1, 1);
        cache.insert(2, 2);
        cache.insert(1, 3);
        cache.get(&1);
        cache.get(&9);

        let snap = cache.metrics_snapshot();
        assert_eq!(snap.b1_ghost_hits, 1);
        assert_eq!(snap.p_increases, 1);
        assert_eq!(snap.t1_evictions, 2);
        assert_eq!(snap.core.get_hits, 1);
        assert_eq!(snap.core.get_misses, 1);
        assert_eq!(snap.p, 1);
    }
}
