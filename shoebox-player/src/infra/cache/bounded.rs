use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;

/// Fixed-capacity map with least-recently-used eviction.
///
/// `has` and `peek` never touch recency; `get` and `set` promote the key to
/// most-recently-used. The cache stores values (handles) only and never
/// disposes of what they point at: owners that hold live resources must
/// release them explicitly.
#[derive(Debug)]
pub struct BoundedCache<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
}

impl<K: Hash + Eq, V> BoundedCache<K, V> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Membership test. Does not affect recency.
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains(key)
    }

    /// Look up a value and promote it to most-recently-used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Look up a value without promoting it.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.peek(key)
    }

    /// Insert or replace `key`, returning the entry evicted to make room.
    ///
    /// Replacing an existing key refreshes its recency and never evicts.
    /// Inserting a new key into a full cache evicts exactly one entry, the
    /// least recently used, before the insert.
    pub fn set(&mut self, key: K, value: V) -> Option<(K, V)> {
        let evicted = if self.entries.contains(&key) {
            self.entries.put(key, value);
            None
        } else {
            let evicted = if self.entries.len() >= self.capacity() {
                self.entries.pop_lru()
            } else {
                None
            };
            self.entries.put(key, value);
            evicted
        };

        debug_assert!(self.entries.len() <= self.capacity());
        evicted
    }

    /// Drop every entry. Values are dropped, not disposed.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Remove every entry and hand them back, least recently used first.
    pub fn drain(&mut self) -> Vec<(K, V)> {
        let mut drained = Vec::with_capacity(self.entries.len());
        while let Some(entry) = self.entries.pop_lru() {
            drained.push(entry);
        }
        drained
    }

    /// Keys ordered from least to most recently used.
    pub fn keys_lru_order(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().rev().map(|(key, _)| key)
    }
}
