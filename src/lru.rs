//! Byte-Budgeted Least Recently Used (LRU) Cache
//!
//! This module provides an LRU cache whose capacity is a byte budget rather than
//! an entry count. Every entry is charged `key.len() + value.byte_size()`; once
//! the running total exceeds the budget, the least recently used entries are
//! evicted one by one until it fits again.
//!
//! # Algorithm
//!
//! Two structures are kept in lockstep:
//!
//! - an intrusive doubly linked list of entries, front = most recently used,
//!   back = least recently used. The list owns the entries.
//! - a hash map from key to the entry's list node, for O(1) lookup and O(1)
//!   reordering.
//!
//! Both `add` and `get` count as a use and move the entry to the front. After
//! every `add` the cache evicts from the back while it is over budget:
//!
//! ```text
//! while max_bytes != 0 && current_bytes > max_bytes {
//!     remove_oldest();
//! }
//! ```
//!
//! This is a loop because one large value can displace several small ones.
//! `remove_oldest` on an empty cache does nothing, so the loop always ends. An
//! entry that is larger than the whole budget on its own therefore evicts every
//! other entry and then itself: the add is observable only through the eviction
//! callback.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Add: O(1) amortized, plus O(k) for k evictions it forces
//!   - Get: O(1)
//!   - RemoveOldest: O(1)
//!   - Len: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) entries; roughly 80 bytes of bookkeeping per entry on top of the
//!     key and value
//!
//! # Eviction Callback
//!
//! An optional callback is told about every entry removed by
//! [`remove_oldest`](LruCache::remove_oldest), whether called directly or forced
//! by the budget. It runs synchronously on the calling thread, after the entry has
//! been fully unlinked and the byte total updated. A panic inside the callback
//! propagates to the caller of `add`/`remove_oldest`; the cache is already in a
//! consistent state at that point. Explicit [`remove`](LruCache::remove) and
//! [`clear`](LruCache::clear) are not evictions and do not invoke it.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. Note that `get` **mutates** recency
//! order and takes `&mut self`: any lock wrapped around the cache must treat
//! reads as writes, so use `Mutex` rather than `RwLock`. For a sharded
//! thread-safe variant see `ConcurrentLruCache` (feature `concurrent`).

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::entry::CacheEntry;
use crate::list::{self, List, Node};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use crate::size::ByteSize;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::hash::BuildHasher;
use tracing::{debug, trace, warn};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Callback invoked with the key and value of every evicted entry.
pub type EvictionCallback<V> = Box<dyn FnMut(&str, &V) + Send>;

/// Internal LRU segment containing the actual cache algorithm.
///
/// This is shared between `LruCache` (single-threaded) and
/// `ConcurrentLruCache` (multi-threaded). The segment does not own an eviction
/// callback; callers pass one into each operation that can evict, so the
/// single-threaded and concurrent wrappers can store theirs differently.
///
/// # Safety
///
/// This struct contains raw pointers in the `map` field.
/// These pointers are always valid as long as:
/// - The pointer was obtained from the list's `push_front()` call
/// - The node has not been removed from the list
/// - The segment has not been dropped
pub(crate) struct LruSegment<V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<CacheEntry<V>>,
    map: HashMap<String, *mut Node<CacheEntry<V>>, S>,
    metrics: LruCacheMetrics,
}

// SAFETY: LruSegment owns all data and raw pointers point only to nodes owned by `list`.
// Concurrent access is safe when wrapped in proper synchronization primitives.
unsafe impl<V: Send, S: Send> Send for LruSegment<V, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause data races.
unsafe impl<V: Sync, S: Sync> Sync for LruSegment<V, S> {}

impl<V: ByteSize, S: BuildHasher> LruSegment<V, S> {
    pub(crate) fn with_hasher(config: LruCacheConfig, hash_builder: S) -> Self {
        LruSegment {
            config,
            list: List::new(),
            map: HashMap::with_hasher(hash_builder),
            metrics: LruCacheMetrics::new(config.max_bytes),
        }
    }

    #[inline]
    pub(crate) fn max_bytes(&self) -> u64 {
        self.config.max_bytes
    }

    #[inline]
    pub(crate) fn current_bytes(&self) -> u64 {
        self.metrics.core.cache_size_bytes
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    #[inline]
    fn over_budget(&self) -> bool {
        self.config.is_bounded() && self.current_bytes() > self.config.max_bytes
    }

    pub(crate) fn get(&mut self, key: &str) -> Option<&V> {
        let Some(node) = self.map.get(key).copied() else {
            self.metrics.core.record_miss();
            return None;
        };
        // SAFETY: node comes from our map
        unsafe {
            self.list.move_to_front(node);
            let entry = (*node).value();
            self.metrics.core.record_hit(entry.charge());
            Some(entry.value())
        }
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let Some(node) = self.map.get(key).copied() else {
            self.metrics.core.record_miss();
            return None;
        };
        // SAFETY: node comes from our map
        unsafe {
            self.list.move_to_front(node);
            let entry = (*node).value_mut();
            self.metrics.core.record_hit(entry.charge());
            Some(entry.value_mut())
        }
    }

    pub(crate) fn peek(&self, key: &str) -> Option<&V> {
        let node = self.map.get(key).copied()?;
        // SAFETY: node comes from our map
        unsafe { Some((*node).value().value()) }
    }

    #[inline]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub(crate) fn peek_oldest(&self) -> Option<(&str, &V)> {
        self.list.back().map(|entry| (entry.key(), entry.value()))
    }

    /// Inserts or updates `key`, then evicts from the back until within budget.
    pub(crate) fn add<F>(&mut self, key: String, value: V, mut on_evicted: F)
    where
        F: FnMut(&str, &V),
    {
        let charge = if let Some(node) = self.map.get(key.as_str()).copied() {
            // SAFETY: node comes from our map
            unsafe {
                self.list.move_to_front(node);
                let entry = (*node).value_mut();
                let (_old_value, old_charge) = entry.replace_value(value);
                self.metrics
                    .core
                    .record_size_change(old_charge, entry.charge());
                entry.charge()
            }
        } else {
            let entry = CacheEntry::new(key.clone(), value);
            let charge = entry.charge();
            let node = self.list.push_front(entry);
            self.map.insert(key, node);
            self.metrics.core.record_insertion(charge);
            charge
        };

        if self.config.is_bounded() && charge > self.config.max_bytes {
            warn!(
                charge,
                max_bytes = self.config.max_bytes,
                "entry exceeds the whole cache budget and will be evicted immediately"
            );
            self.metrics.record_oversized_insertion();
        }

        while self.over_budget() {
            if self.remove_oldest(&mut on_evicted).is_none() {
                break;
            }
        }
    }

    /// Unlinks the least recently used entry and reports it to `on_evicted`.
    pub(crate) fn remove_oldest<F>(&mut self, mut on_evicted: F) -> Option<(String, V)>
    where
        F: FnMut(&str, &V),
    {
        let entry = self.list.pop_back()?;
        self.map.remove(entry.key());
        self.metrics.core.record_eviction(entry.charge());
        trace!(
            key = entry.key(),
            charge = entry.charge(),
            current_bytes = self.current_bytes(),
            "evicted least recently used entry"
        );
        on_evicted(entry.key(), entry.value());
        Some(entry.into_parts())
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        let node = self.map.remove(key)?;
        // SAFETY: node comes from our map and has just been unregistered from it
        let entry = unsafe { self.list.remove(node) };
        self.metrics.core.record_removal(entry.charge());
        Some(entry.into_parts().1)
    }

    pub(crate) fn clear(&mut self) {
        debug!(
            entries = self.len(),
            bytes = self.current_bytes(),
            "clearing cache"
        );
        self.map.clear();
        self.list.clear();
        self.metrics.core.record_clear();
    }

    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.list.iter(),
        }
    }
}

impl<V, S> fmt::Debug for LruSegment<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSegment")
            .field("max_bytes", &self.config.max_bytes)
            .field("current_bytes", &self.metrics.core.cache_size_bytes)
            .field("len", &self.list.len())
            .finish()
    }
}

/// A least recently used cache bounded by the total byte size of its entries.
///
/// Keys are strings; values are any type implementing [`ByteSize`]. A budget
/// of `0` means unbounded.
///
/// # Examples
///
/// ```
/// use sized_lru::LruCache;
///
/// // "k1"+"v1" = 4 bytes per entry; 10 bytes fit two of them
/// let mut cache = LruCache::new(10);
///
/// cache.add("k1", "v1");
/// cache.add("k2", "v2");
///
/// // Accessing an entry makes it the most recently used
/// assert_eq!(cache.get("k1"), Some(&"v1"));
///
/// // Going over budget evicts the least recently used entry, k2
/// cache.add("k3", "v3");
/// assert_eq!(cache.get("k2"), None);
/// assert_eq!(cache.len(), 2);
/// assert_eq!(cache.current_bytes(), 8);
/// ```
pub struct LruCache<V, S = DefaultHashBuilder> {
    segment: LruSegment<V, S>,
    on_evicted: Option<EvictionCallback<V>>,
}

impl<V: ByteSize> LruCache<V> {
    /// Creates a cache holding at most `max_bytes` of keys and values.
    ///
    /// `0` disables the limit.
    pub fn new(max_bytes: u64) -> LruCache<V> {
        LruCache::init(LruCacheConfig { max_bytes }, None)
    }

    /// Creates a cache that reports each evicted entry to `on_evicted`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sized_lru::LruCache;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let evicted = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&evicted);
    /// let mut cache = LruCache::with_eviction_callback(5, move |key: &str, value: &String| {
    ///     sink.lock().unwrap().push((key.to_string(), value.clone()));
    /// });
    ///
    /// cache.add("ab", "x".to_string());
    /// cache.add("cd", "y".to_string());
    ///
    /// assert_eq!(*evicted.lock().unwrap(), [("ab".to_string(), "x".to_string())]);
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn with_eviction_callback<F>(max_bytes: u64, on_evicted: F) -> LruCache<V>
    where
        F: FnMut(&str, &V) + Send + 'static,
    {
        LruCache::init(LruCacheConfig { max_bytes }, Some(Box::new(on_evicted)))
    }

    /// Creates a cache from a configuration and an optional eviction callback.
    ///
    /// # Examples
    ///
    /// ```
    /// use sized_lru::config::LruCacheConfig;
    /// use sized_lru::LruCache;
    ///
    /// let config = LruCacheConfig { max_bytes: 1024 };
    /// let cache: LruCache<String> = LruCache::init(config, None);
    /// assert_eq!(cache.max_bytes(), 1024);
    /// ```
    pub fn init(config: LruCacheConfig, on_evicted: Option<EvictionCallback<V>>) -> LruCache<V> {
        LruCache::with_hasher(config, on_evicted, DefaultHashBuilder::default())
    }
}

impl<V: ByteSize, S: BuildHasher> LruCache<V, S> {
    /// Creates a cache that hashes keys with `hash_builder`.
    pub fn with_hasher(
        config: LruCacheConfig,
        on_evicted: Option<EvictionCallback<V>>,
        hash_builder: S,
    ) -> Self {
        Self {
            segment: LruSegment::with_hasher(config, hash_builder),
            on_evicted,
        }
    }

    /// The configured byte budget; `0` when unbounded.
    #[inline]
    pub fn max_bytes(&self) -> u64 {
        self.segment.max_bytes()
    }

    /// Returns `true` when a byte budget is enforced.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.segment.max_bytes() != 0
    }

    /// Sum of `key.len() + value.byte_size()` over every held entry.
    #[inline]
    pub fn current_bytes(&self) -> u64 {
        self.segment.current_bytes()
    }

    /// Number of entries currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Inserts `value` under `key`, or replaces the value already there.
    ///
    /// Either way the entry becomes the most recently used. If the cache is then
    /// over budget, least recently used entries are evicted, oldest first, until
    /// it fits; each eviction is reported to the callback.
    #[inline]
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let on_evicted = &mut self.on_evicted;
        self.segment.add(key.into(), value, |k, v| {
            if let Some(callback) = on_evicted.as_mut() {
                callback(k, v);
            }
        });
    }

    /// Looks up `key`, marking it as the most recently used entry on a hit.
    ///
    /// Returns `None` and leaves the cache untouched on a miss.
    #[inline]
    pub fn get(&mut self, key: &str) -> Option<&V> {
        self.segment.get(key)
    }

    /// Like [`get`](Self::get), but hands out a mutable reference.
    ///
    /// The entry's byte charge is not recomputed when the value is mutated in
    /// place; re-[`add`](Self::add) the value if its size changes.
    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.segment.get_mut(key)
    }

    /// Looks up `key` without changing recency order or metrics.
    #[inline]
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.segment.peek(key)
    }

    /// Returns `true` if `key` is present, without changing recency order.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.segment.contains(key)
    }

    /// The entry that the next eviction would remove.
    #[inline]
    pub fn peek_oldest(&self) -> Option<(&str, &V)> {
        self.segment.peek_oldest()
    }

    /// Evicts the least recently used entry.
    ///
    /// Does nothing and returns `None` on an empty cache. Otherwise the entry is
    /// unlinked, its bytes released, the eviction callback invoked, and the key
    /// and value are handed back.
    pub fn remove_oldest(&mut self) -> Option<(String, V)> {
        let on_evicted = &mut self.on_evicted;
        self.segment.remove_oldest(|k, v| {
            if let Some(callback) = on_evicted.as_mut() {
                callback(k, v);
            }
        })
    }

    /// Removes `key` and returns its value. Does not invoke the eviction callback.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.segment.remove(key)
    }

    /// Drops every entry. Does not invoke the eviction callback.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Iterates entries from most to least recently used without touching them.
    pub fn iter(&self) -> Iter<'_, V> {
        self.segment.iter()
    }
}

impl<V: ByteSize, S: BuildHasher> CacheMetrics for LruCache<V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}

impl<V, S> fmt::Debug for LruCache<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("segment", &self.segment)
            .field("has_eviction_callback", &self.on_evicted.is_some())
            .finish()
    }
}

impl<'a, V: ByteSize, S: BuildHasher> IntoIterator for &'a LruCache<V, S> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

/// Iterator over `(key, value)` pairs from most to least recently used.
pub struct Iter<'a, V> {
    inner: list::Iter<'a, CacheEntry<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|entry| (entry.key(), entry.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("inner", &self.inner).finish()
    }
}
