//! # Least Recently Used (LRU) Cache
//!
//! Evicts the entry that has gone longest without an access.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V>                           │
//!   │                                                                  │
//!   │   entries: LinkedMap<K, V>                                       │
//!   │                                                                  │
//!   │     head ──► [C] ◄──► [A] ◄──► [B] ◄── tail                      │
//!   │      MRU                         LRU (next victim)               │
//!   │                                                                  │
//!   │   capacity: usize                                                │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Semantics
//!
//! - `get(k)` hit: `k` moves to the MRU end.
//! - `insert(k, v)` on a resident key: the entry is unlinked and re-linked at
//!   the MRU end with the new value, even if the value did not change.
//! - `insert(k, v)` on a new key with the cache full: the LRU entry is evicted
//!   first.
//! - Capacity 0: inserts are ignored.
//!
//! ## Example
//!
//! ```
//! use arcache::policy::lru::LruCache;
//! use arcache::traits::{CoreCache, ReadOnlyCache};
//!
//! let mut cache = LruCache::new(2);
//! cache.insert(1, "one");
//! cache.insert(2, "two");
//! cache.get(&1);
//! cache.insert(3, "three"); // evicts 2
//!
//! assert!(!cache.contains(&2));
//! assert_eq!(cache.get(&1), Some(&"one"));
//! assert_eq!(cache.len(), 2);
//! ```

use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::ds::LinkedMap;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{
    CacheMetrics, CacheMetricsSnapshot, CoreMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache, ReadOnlyCache};

/// LRU cache over a single recency-ordered [`LinkedMap`].
pub struct LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    entries: LinkedMap<K, V>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LRU cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 creates a cache that accepts no items.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LinkedMap::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Like [`new`](Self::new) but rejects a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity("LRU"));
        }
        Ok(Self::new(capacity))
    }

    /// Reads `key` without changing its recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.entries.check_invariants()?;
        if self.entries.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "LRU holds {} entries over capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        Ok(())
    }
}

impl<K, V> ReadOnlyCache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return None;
        }

        if self.entries.contains(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return self.entries.insert(key, value);
        }

        if self.entries.len() >= self.capacity && self.entries.pop_oldest().is_some() {
            trace!(policy = "lru", capacity = self.capacity, "evicted least recently used entry");
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();
        self.entries.insert(key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let value = self.entries.move_to_mru(key);
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
        debug!(policy = "lru", dropped = self.entries.len(), "clearing cache");
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.entries.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        self.entries.pop_oldest()
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.entries.peek_oldest()
    }

    fn touch(&mut self, key: &K) -> bool {
        self.entries.move_to_mru(key).is_some()
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        self.entries.rank(key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.entries.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LRU cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
