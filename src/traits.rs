//! # Cache Trait Hierarchy
//!
//! One capability contract shared by every eviction policy, so that LRU, LFU
//! and ARC can be swapped without touching callers.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌─────────────────────────────────────┐
//!                  │        ReadOnlyCache<K, V>          │
//!                  │  contains(&, &K) → bool             │
//!                  │  len(&) → usize                     │
//!                  │  is_empty(&) → bool                 │
//!                  │  capacity(&) → usize                │
//!                  └──────────────────┬──────────────────┘
//!                                     ▼
//!                  ┌─────────────────────────────────────┐
//!                  │          CoreCache<K, V>            │
//!                  │  insert(&mut, K, V) → Option<V>     │
//!                  │  get(&mut, &K) → Option<&V>         │
//!                  │  clear(&mut)                        │
//!                  └──────────────────┬──────────────────┘
//!                                     ▼
//!                  ┌─────────────────────────────────────┐
//!                  │         MutableCache<K, V>          │
//!                  │  remove(&mut, &K) → Option<V>       │
//!                  └───────────┬─────────────┬───────────┘
//!                              ▼             ▼
//!              ┌──────────────────────┐  ┌──────────────────────┐
//!              │ LruCacheTrait<K, V>  │  │ LfuCacheTrait<K, V>  │
//!              │  pop_lru / peek_lru  │  │  pop_lfu / peek_lfu  │
//!              │  touch               │  │  frequency           │
//!              │  recency_rank        │  │                      │
//!              └──────────────────────┘  └──────────────────────┘
//! ```
//!
//! | Policy | `CoreCache` | `MutableCache` | Policy trait     |
//! |--------|-------------|----------------|------------------|
//! | LRU    | ✅          | ✅             | `LruCacheTrait`  |
//! | LFU    | ✅          | ✅             | `LfuCacheTrait`  |
//! | ARC    | ✅          | ✅             | inherent methods |
//!
//! ## Contract
//!
//! - `insert` never fails. It may evict another entry to respect
//!   `capacity`, and returns the value it replaced if the key was resident.
//! - `get` records an access when it hits; a miss is `None`.
//! - `len` counts resident entries only (ARC ghosts are excluded).
//! - `clear` leaves the cache as if freshly built with the same capacity.
//! - A capacity of zero retains nothing: `insert` is a no-op.
//!
//! ## Thread Safety
//!
//! Policy types are plain single-threaded values. Callers that share one
//! across threads provide the locking themselves, e.g. via
//! `SharedCache` behind the `concurrency` feature.

/// Read-only queries that never disturb eviction order.
pub trait ReadOnlyCache<K, V> {
    /// Returns `true` if `key` is resident, without recording an access.
    fn contains(&self, key: &K) -> bool;

    /// Number of resident entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries.
    fn capacity(&self) -> usize;
}

/// Operations every eviction policy supports.
///
/// # Example
///
/// ```
/// use arcache::policy::arc::ArcCache;
/// use arcache::policy::lru::LruCache;
/// use arcache::traits::{CoreCache, ReadOnlyCache};
///
/// fn lookup_or_load<C: CoreCache<u64, String>>(cache: &mut C, key: u64) -> String {
///     if let Some(v) = cache.get(&key) {
///         return v.clone();
///     }
///     let loaded = format!("value-{key}");
///     cache.insert(key, loaded.clone());
///     loaded
/// }
///
/// let mut lru = LruCache::new(8);
/// let mut arc = ArcCache::new(8);
/// assert_eq!(lookup_or_load(&mut lru, 1), "value-1");
/// assert_eq!(lookup_or_load(&mut arc, 1), "value-1");
/// assert_eq!(lru.len(), arc.len());
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Inserts or updates `key`, returning the previous resident value.
    ///
    /// # Example
    ///
    /// ```
    /// use arcache::policy::lfu::LfuCache;
    /// use arcache::traits::CoreCache;
    ///
    /// let mut cache = LfuCache::new(4);
    /// assert_eq!(cache.insert(1, "first"), None);
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key` and records the access.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Drops all entries and any policy bookkeeping.
    fn clear(&mut self);
}

/// Caches that allow removing an arbitrary resident key.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes each key in order; the default loops over [`remove`](Self::remove).
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// Recency-specific operations.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// The entry that the next eviction would remove.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used without reading it.
    fn touch(&mut self, key: &K) -> bool;

    /// 0 for the most recently used key. O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Frequency-specific operations.
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the entry the next eviction would pick.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Recorded access count for `key` (1 right after insertion).
    fn frequency(&self, key: &K) -> Option<u64>;
}
