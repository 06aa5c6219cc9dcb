//! Insertion-ordered hash map with O(1) move-to-MRU.
//!
//! Every resident container of the cache policies is a `LinkedMap`: LRU's
//! single recency list, each LFU frequency bucket, and ARC's T1/T2 lists.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>         list: IntrusiveList<(K, V)>
//!   ┌─────────┬─────────┐
//!   │  key A  │  id_0   │──────┐        head ─► [C,v] ◄──► [A,v] ◄──► [B,v] ◄── tail
//!   │  key B  │  id_1   │      │                 MRU                    oldest
//!   │  key C  │  id_2   │      └──────────────────────────────┘
//!   └─────────┴─────────┘
//! ```
//!
//! Keys are stored twice (index and node) so that popping the oldest entry
//! can clean the index without a reverse lookup.
//!
//! | Operation      | Time |
//! |----------------|------|
//! | `insert`       | O(1) |
//! | `get`          | O(1) |
//! | `move_to_mru`  | O(1) |
//! | `pop_oldest`   | O(1) |
//! | `remove`       | O(1) |
//! | `iter`         | O(n) |

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;

/// Hash map that remembers access order, oldest first out.
#[derive(Debug)]
pub struct LinkedMap<K, V> {
    index: FxHashMap<K, SlotId>,
    list: IntrusiveList<(K, V)>,
}

impl<K, V> LinkedMap<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: IntrusiveList::with_capacity(capacity),
        }
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

    /// Looks up `key` without touching its position.
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.list.get_mut(id).map(|(_, v)| v)
    }

    /// Places `key` at the MRU end with `value`.
    ///
    /// An existing entry is unlinked and re-linked at the MRU end even when
    /// the value is unchanged; its previous value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_front(id);
            let slot = self.list.get_mut(id)?;
            return Some(std::mem::replace(&mut slot.1, value));
        }
        let id = self.list.push_front((key.clone(), value));
        self.index.insert(key, id);
        None
    }

    /// Moves `key` to the MRU end and returns its value.
    pub fn move_to_mru(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.move_to_front(id);
        self.list.get(id).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.list.remove(id).map(|(_, v)| v)
    }

    /// Removes `key`, handing back the owned key stored in the node.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let id = self.index.remove(key)?;
        self.list.remove(id)
    }

    /// The entry that would be evicted next.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.list.back().map(|(k, v)| (k, v))
    }

    pub fn pop_oldest(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.index.remove(&key);
        Some((key, value))
    }

    /// Position of `key` counted from the MRU end (0 = most recent).
    pub fn rank(&self, key: &K) -> Option<usize> {
        self.index.get(key)?;
        self.list.iter().position(|(k, _)| k == key)
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }

    /// Iterates entries from the MRU end to the oldest.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|(k, v)| (k, v))
    }

    /// Iterates keys from the MRU end to the oldest.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.list.iter().map(|(k, _)| k)
    }

    /// Verifies that the index and the list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} nodes",
                self.index.len(),
                self.list.len()
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some((node_key, _)) if node_key == key => {},
                Some(_) => {
                    return Err(InvariantError::new("index points at a node with another key"));
                },
                None => return Err(InvariantError::new("index points at a freed node")),
            }
        }
        if self.list.iter().count() != self.list.len() {
            return Err(InvariantError::new("list links do not reach every node"));
        }
        Ok(())
    }
}

impl<K, V> Default for LinkedMap<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
