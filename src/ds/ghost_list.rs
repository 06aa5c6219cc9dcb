//! Bounded recency list of keys for ghost tracking.
//!
//! ARC remembers keys it evicted from T1 and T2 in two ghost lists (B1, B2).
//! Ghosts carry no value; their only job is to turn a later miss on the same
//! key into a signal for the adaptation parameter.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>        list: IntrusiveList<K>
//!   ┌─────────┬─────────┐              head ─► [C] ◄──► [B] ◄──► [A] ◄── tail
//!   │  key A  │  id_1   │                 MRU                       oldest
//!   │  key B  │  id_2   │
//!   └─────────┴─────────┘
//! ```
//!
//! ## Behavior
//! - `record(k)`: moves key to MRU, then trims the oldest ghost while the list
//!   is over capacity
//! - `pop_oldest()`: drops the oldest ghost explicitly
//! - `remove(k)`: deletes from list and index
//!
//! `debug_validate_invariants()` is available in debug/test builds.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;

/// Bounded recency list of keys (no values).
#[derive(Debug)]
pub struct GhostList<K> {
    list: IntrusiveList<K>,
    index: FxHashMap<K, SlotId>,
    capacity: usize,
}

impl<K> GhostList<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a ghost list holding at most `capacity` keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity.saturating_add(1)),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Records `key` as the most recent ghost.
    ///
    /// Returns the oldest ghost if the list grew past capacity and had to
    /// drop it. With zero capacity the key itself is returned.
    pub fn record(&mut self, key: K) -> Option<K> {
        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_front(id);
            return None;
        }

        let id = self.list.push_front(key.clone());
        self.index.insert(key, id);

        if self.list.len() > self.capacity {
            self.pop_oldest()
        } else {
            None
        }
    }

    /// Drops and returns the oldest ghost.
    pub fn pop_oldest(&mut self) -> Option<K> {
        let key = self.list.pop_back()?;
        self.index.remove(&key);
        Some(key)
    }

    /// Removes `key`; returns `true` if it was tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => {
                self.list.remove(id);
                true
            },
            None => false,
        }
    }

    /// Iterates ghosts from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.list.iter()
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.list.len(), self.index.len());
        assert!(self.list.len() <= self.capacity);
        for &id in self.index.values() {
            assert!(self.list.contains(id));
        }
        self.list.debug_validate_invariants();
    }
}
