//! Unified cache builder for all eviction policies.
//!
//! Lets callers pick a policy at runtime (for example from their own config
//! file) and still use one concrete type.
//!
//! ## Example
//!
//! ```rust
//! use arcache::builder::{CacheBuilder, CachePolicy};
//! use arcache::traits::CoreCache;
//!
//! let policy: CachePolicy = "arc".parse().unwrap();
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(policy);
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::{ConfigError, InvariantError};
use crate::policy::arc::ArcCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::{CoreCache, MutableCache, ReadOnlyCache};

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction (frequency buckets).
    Lfu,
    /// Adaptive Replacement Cache.
    Arc,
}

impl CachePolicy {
    pub const ALL: [CachePolicy; 3] = [CachePolicy::Lru, CachePolicy::Lfu, CachePolicy::Arc];

    pub fn as_str(self) -> &'static str {
        match self {
            CachePolicy::Lru => "lru",
            CachePolicy::Lfu => "lfu",
            CachePolicy::Arc => "arc",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(CachePolicy::Lru),
            "lfu" => Ok(CachePolicy::Lfu),
            "arc" => Ok(CachePolicy::Arc),
            other => Err(ConfigError::new(format!(
                "unknown cache policy {other:?}, expected one of lru, lfu, arc"
            ))),
        }
    }
}

/// Policy-erased cache produced by [`CacheBuilder`].
pub struct Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V>
where
    K: Clone + Eq + Hash,
{
    Lru(LruCache<K, V>),
    Lfu(LfuCache<K, V>),
    Arc(ArcCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Which policy backs this cache.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
            CacheInner::Arc(_) => CachePolicy::Arc,
        }
    }

    /// Borrows the ARC cache, if that is the backing policy.
    pub fn as_arc(&self) -> Option<&ArcCache<K, V>> {
        match &self.inner {
            CacheInner::Arc(arc) => Some(arc),
            _ => None,
        }
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        match &self.inner {
            CacheInner::Lru(lru) => lru.check_invariants(),
            CacheInner::Lfu(lfu) => lfu.check_invariants(),
            CacheInner::Arc(arc) => arc.check_invariants(),
        }
    }
}

impl<K, V> ReadOnlyCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
            CacheInner::Arc(arc) => arc.contains(key),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
            CacheInner::Arc(arc) => arc.len(),
        }
    }

    fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
            CacheInner::Arc(arc) => arc.capacity(),
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.insert(key, value),
            CacheInner::Lfu(lfu) => lfu.insert(key, value),
            CacheInner::Arc(arc) => arc.insert(key, value),
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::Lfu(lfu) => lfu.get(key),
            CacheInner::Arc(arc) => arc.get(key),
        }
    }

    fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
            CacheInner::Arc(arc) => arc.clear(),
        }
    }
}

impl<K, V> MutableCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.remove(key),
            CacheInner::Lfu(lfu) => lfu.remove(key),
            CacheInner::Arc(arc) => arc.remove(key),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            CacheInner::Lru(lru) => fmt::Debug::fmt(lru, f),
            CacheInner::Lfu(lfu) => fmt::Debug::fmt(lfu, f),
            CacheInner::Arc(arc) => fmt::Debug::fmt(arc, f),
        }
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy.
    ///
    /// A capacity of 0 is accepted and yields a cache that retains nothing;
    /// use [`try_build`](Self::try_build) to reject it instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use arcache::builder::{CacheBuilder, CachePolicy};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
    /// let lfu = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lfu);
    /// let arc = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Arc);
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::new(self.capacity)),
            CachePolicy::Arc => CacheInner::Arc(ArcCache::new(self.capacity)),
        };
        Cache { inner }
    }

    /// Like [`build`](Self::build) but rejects a zero capacity.
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::try_new(self.capacity)?),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::try_new(self.capacity)?),
            CachePolicy::Arc => CacheInner::Arc(ArcCache::try_new(self.capacity)?),
        };
        Ok(Cache { inner })
    }
}
