//! # LFU (Least Frequently Used) Cache
//!
//! Evicts the entry with the fewest recorded accesses; ties go to the entry
//! that reached that frequency first.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                              │
//!   │                                                                      │
//!   │   key_frequency: FxHashMap<K, u64>                                   │
//!   │   ┌─────────┬──────┐                                                 │
//!   │   │ page_1  │  3   │                                                 │
//!   │   │ page_2  │  1   │                                                 │
//!   │   │ page_3  │  1   │                                                 │
//!   │   └─────────┴──────┘                                                 │
//!   │                                                                      │
//!   │   buckets: FxHashMap<u64, LinkedMap<K, V>>                           │
//!   │                                                                      │
//!   │     min_frequency = 1                                                │
//!   │          │                                                           │
//!   │          ▼                                                           │
//!   │     freq=1: [page_3] ◄──► [page_2]   ← oldest at this freq evicted   │
//!   │     freq=3: [page_1]                                                 │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Access Flow
//!
//! ```text
//!   get(k) / insert(existing k, v):
//!     1. freq = key_frequency[k]
//!     2. unlink k from buckets[freq]; drop the bucket if it emptied, and
//!        if freq was min_frequency, min_frequency = freq + 1
//!     3. link k at the newest end of buckets[freq + 1]
//!     4. key_frequency[k] = freq + 1
//!
//!   insert(new k, v):
//!     1. if full: pop the oldest key of buckets[min_frequency]
//!     2. link k into buckets[1]; key_frequency[k] = 1
//!     3. min_frequency = 1
//! ```
//!
//! Updating an existing key counts as an access. A capacity of 0 turns
//! `insert` into a no-op.
//!
//! ## Example
//!
//! ```
//! use arcache::policy::lfu::LfuCache;
//! use arcache::traits::{CoreCache, LfuCacheTrait, ReadOnlyCache};
//!
//! let mut cache = LfuCache::new(2);
//! cache.insert("hot", 1);
//! cache.insert("cold", 2);
//! cache.get(&"hot");
//! assert_eq!(cache.frequency(&"hot"), Some(2));
//!
//! cache.insert("new", 3); // evicts "cold" (frequency 1)
//! assert!(cache.contains(&"hot"));
//! assert!(!cache.contains(&"cold"));
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ds::LinkedMap;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{
    CacheMetrics, CacheMetricsSnapshot, CoreMetricsRecorder, MetricsSnapshotProvider,
};
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache, ReadOnlyCache};

/// Frequency-bucketed LFU cache.
pub struct LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    key_frequency: FxHashMap<K, u64>,
    buckets: FxHashMap<u64, LinkedMap<K, V>>,
    /// Smallest populated bucket; only read while buckets are non-empty.
    min_frequency: u64,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LFU cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            key_frequency: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::default(),
            min_frequency: 0,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Like [`new`](Self::new) but rejects a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity("LFU"));
        }
        Ok(Self::new(capacity))
    }

    /// Reads `key` without counting an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let freq = self.key_frequency.get(key)?;
        self.buckets.get(freq)?.get(key)
    }

    /// Current value of the cached minimum frequency.
    pub fn min_frequency(&self) -> u64 {
        self.min_frequency
    }

    /// Unlinks `key` from its bucket as the first half of a frequency bump.
    ///
    /// Returns the owned key, its value and the frequency it moves to.
    fn detach_for_bump(&mut self, key: &K) -> Option<(K, V, u64)> {
        let freq = *self.key_frequency.get(key)?;
        let bucket = self.buckets.get_mut(&freq)?;
        let (owned, value) = bucket.remove_entry(key)?;
        if bucket.is_empty() {
            self.buckets.remove(&freq);
            if self.min_frequency == freq {
                self.min_frequency = freq + 1;
            }
        }
        Some((owned, value, freq + 1))
    }

    /// Links `key` at the newest end of `buckets[freq]`.
    fn attach(&mut self, key: K, value: V, freq: u64) -> &mut LinkedMap<K, V> {
        if let Some(f) = self.key_frequency.get_mut(&key) {
            *f = freq;
        } else {
            self.key_frequency.insert(key.clone(), freq);
        }
        let bucket = self.buckets.entry(freq).or_default();
        bucket.insert(key, value);
        bucket
    }

    /// Pops the oldest entry of the lowest-frequency bucket.
    ///
    /// Leaves `min_frequency` untouched; callers either reset it to 1 or
    /// recompute it.
    fn evict_min(&mut self) -> Option<(K, V)> {
        let freq = self.min_frequency;
        let bucket = self.buckets.get_mut(&freq)?;
        let (key, value) = bucket.pop_oldest()?;
        if bucket.is_empty() {
            self.buckets.remove(&freq);
        }
        self.key_frequency.remove(&key);
        trace!(policy = "lfu", frequency = freq, "evicted least frequently used entry");
        Some((key, value))
    }

    /// O(distinct frequencies); only needed after removals outside the
    /// access/insert paths.
    fn recompute_min_frequency(&mut self) {
        if let Some(&min) = self.buckets.keys().min() {
            self.min_frequency = min;
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.key_frequency.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "LFU holds {} entries over capacity {}",
                self.key_frequency.len(),
                self.capacity
            )));
        }

        let mut bucketed = 0usize;
        for (freq, bucket) in &self.buckets {
            bucket.check_invariants()?;
            if bucket.is_empty() {
                return Err(InvariantError::new(format!("empty bucket {freq} was kept")));
            }
            for key in bucket.keys() {
                if self.key_frequency.get(key) != Some(freq) {
                    return Err(InvariantError::new(format!(
                        "key in bucket {freq} records frequency {:?}",
                        self.key_frequency.get(key)
                    )));
                }
            }
            bucketed += bucket.len();
        }
        if bucketed != self.key_frequency.len() {
            return Err(InvariantError::new(format!(
                "{} keys tracked but {} bucketed",
                self.key_frequency.len(),
                bucketed
            )));
        }

        if let Some(&min) = self.buckets.keys().min()
            && min != self.min_frequency
        {
            return Err(InvariantError::new(format!(
                "min_frequency is {} but smallest bucket is {min}",
                self.min_frequency
            )));
        }
        Ok(())
    }
}

impl<K, V> ReadOnlyCache<K, V> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        self.key_frequency.contains_key(key)
    }

    fn len(&self) -> usize {
        self.key_frequency.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if self.capacity == 0 {
            return None;
        }

        if let Some((owned, previous, freq)) = self.detach_for_bump(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            self.attach(owned, value, freq);
            return Some(previous);
        }

        if self.key_frequency.len() >= self.capacity && self.evict_min().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();
        self.attach(key, value, 1);
        self.min_frequency = 1;
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some((owned, value, freq)) = self.detach_for_bump(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.attach(owned, value, freq).get(key)
    }

    fn clear(&mut self) {
        debug!(policy = "lfu", dropped = self.key_frequency.len(), "clearing cache");
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        self.key_frequency.clear();
        self.buckets.clear();
        self.min_frequency = 0;
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let freq = self.key_frequency.remove(key)?;
        let bucket = self.buckets.get_mut(&freq)?;
        let value = bucket.remove(key);
        if bucket.is_empty() {
            self.buckets.remove(&freq);
            if freq == self.min_frequency {
                self.recompute_min_frequency();
            }
        }
        value
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        if self.key_frequency.is_empty() {
            return None;
        }
        let entry = self.evict_min();
        self.recompute_min_frequency();
        entry
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        if self.key_frequency.is_empty() {
            return None;
        }
        self.buckets.get(&self.min_frequency)?.peek_oldest()
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        self.key_frequency.get(key).copied()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.key_frequency.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.key_frequency.len())
            .field("capacity", &self.capacity)
            .field("buckets", &self.buckets.len())
            .field("min_frequency", &self.min_frequency)
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new(16)
    }
}
