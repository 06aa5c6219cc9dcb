//! Thread-safe wrapper around any single-threaded policy.
//!
//! Every policy records accesses on `get`, so reads need exclusive access as
//! well; the wrapper therefore uses one `parking_lot::Mutex` rather than a
//! read/write lock. Each call takes the lock for its own duration only. Use
//! [`SharedCache::with`] when several calls must observe the same state.
//!
//! ## Example
//!
//! ```
//! use std::thread;
//!
//! use arcache::policy::arc::ArcCache;
//! use arcache::sync::SharedCache;
//!
//! let cache = SharedCache::new(ArcCache::new(64));
//! let handles: Vec<_> = (0..4u64)
//!     .map(|t| {
//!         let cache = cache.clone();
//!         thread::spawn(move || {
//!             for k in 0..16 {
//!                 cache.insert(t * 100 + k, k);
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 64);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::traits::CoreCache;

/// Cloneable, lock-protected handle to a cache.
pub struct SharedCache<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> Clone for SharedCache<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> SharedCache<C> {
    pub fn new(cache: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Runs `f` with the lock held for its whole duration.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut cache)
    }

    pub fn insert<K, V>(&self, key: K, value: V) -> Option<V>
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().insert(key, value)
    }

    /// Records the access and returns a clone of the value.
    pub fn get_cloned<K, V>(&self, key: &K) -> Option<V>
    where
        C: CoreCache<K, V>,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn contains<K, V>(&self, key: &K) -> bool
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().contains(key)
    }

    pub fn len<K, V>(&self) -> usize
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().len()
    }

    pub fn is_empty<K, V>(&self) -> bool
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().is_empty()
    }

    pub fn capacity<K, V>(&self) -> usize
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().capacity()
    }

    pub fn clear<K, V>(&self)
    where
        C: CoreCache<K, V>,
    {
        self.inner.lock().clear();
    }
}

impl<C: fmt::Debug> fmt::Debug for SharedCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_tuple("SharedCache").field(&*cache).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::policy::arc::ArcCache;
    use crate::policy::lfu::LfuCache;
    use crate::policy::lru::LruCache;

    #[test]
    fn shared_cache_basic_ops() {
        let cache = SharedCache::new(LruCache::new(2));
        assert_eq!(cache.insert(1, "a"), None);
        assert_eq!(cache.insert(2, "b"), None);
        assert_eq!(cache.get_cloned(&1), Some("a"));
        cache.insert(3, "c");

        assert!(!cache.contains(&2));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn shared_cache_with_holds_lock_across_calls() {
        let cache = SharedCache::new(ArcCache::new(1));
        let p = cache.with(|arc| {
            arc.insert(1, 1);
            arc.insert(2, 2);
            arc.insert(1, 3);
            arc.p_value()
        });
        assert_eq!(p, 1);
        assert_eq!(cache.get_cloned(&1), Some(3));
    }

    #[test]
    fn shared_cache_concurrent_inserts_respect_capacity() {
        let cache = SharedCache::new(LfuCache::new(32));
        let handles: Vec<_> = (0..8u32)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for k in 0..200u32 {
                        cache.insert(t * 1_000 + k, k);
                        cache.get_cloned(&(t * 1_000 + k / 2));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 32);
        assert!(cache.with(|lfu| lfu.check_invariants()).is_ok());
    }
}
