//! Concurrent LRU Cache Implementation
//!
//! A thread-safe, byte-budgeted LRU cache using lock striping. This is the
//! multi-threaded counterpart to [`LruCache`](crate::LruCache).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                      ConcurrentLruCache                              │
//! │                                                                      │
//! │  hash(key)  ──▶  Segment Selection                                   │
//! │                                                                      │
//! │  ┌──────────────┐ ┌──────────────┐     ┌──────────────┐              │
//! │  │  Segment 0   │ │  Segment 1   │ ... │  Segment N-1 │              │
//! │  │  Mutex       │ │  Mutex       │     │  Mutex       │              │
//! │  │  LruSegment  │ │  LruSegment  │     │  LruSegment  │              │
//! │  │  max/N bytes │ │  max/N bytes │     │  max/N bytes │              │
//! │  └──────────────┘ └──────────────┘     └──────────────┘              │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trade-offs
//!
//! - **Pros**: Near-linear scaling with thread count, no global lock
//! - **Cons**: LRU ordering and the byte budget are per-segment. An entry can be
//!   evicted from one segment while another holds older entries, and a value
//!   larger than its segment's share of `max_bytes` never stays cached even if
//!   the cache as a whole has room.
//!
//! A bounded budget smaller than the requested segment count builds one
//! segment per byte instead.
//!
//! # Eviction Callback
//!
//! The callback is shared by all segments and runs on the thread that caused
//! the eviction **while that segment's lock is held**. It must not call back
//! into the same cache through any method that locks a segment. The `Debug`
//! impl and [`ConcurrentLruCache::max_bytes`] take no locks.

extern crate alloc;

use crate::config::{ConcurrentCacheConfig, ConcurrentLruCacheConfig, LruCacheConfig};
use crate::lru::LruSegment;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use crate::size::ByteSize;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::BuildHasher;
use core::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Eviction callback shared between the segments of a concurrent cache.
pub type SharedEvictionCallback<V> = Arc<dyn Fn(&str, &V) + Send + Sync>;

/// A thread-safe LRU cache with segmented storage for high concurrency.
///
/// # Example
///
/// ```rust
/// use sized_lru::concurrent::ConcurrentLruCache;
/// use sized_lru::config::{ConcurrentCacheConfig, LruCacheConfig};
///
/// // one segment: exact global LRU order
/// let cache = ConcurrentLruCache::init(
///     ConcurrentCacheConfig {
///         base: LruCacheConfig { max_bytes: 10 },
///         segments: 1,
///     },
///     None,
/// );
///
/// cache.add("k1", "v1");
/// cache.add("k2", "v2");
/// assert_eq!(cache.get("k1"), Some("v1"));
/// cache.add("k3", "v3");
/// assert!(!cache.contains("k2"));
/// ```
pub struct ConcurrentLruCache<V, S = DefaultHashBuilder> {
    segments: Box<[Mutex<LruSegment<V, S>>]>,
    hash_builder: S,
    max_bytes: u64,
    on_evicted: Option<SharedEvictionCallback<V>>,
    next_victim: AtomicUsize,
}

impl<V> ConcurrentLruCache<V, DefaultHashBuilder>
where
    V: ByteSize + Send,
{
    /// Creates a cache with `max_bytes` split across the default segment count.
    ///
    /// `0` disables the limit.
    pub fn new(max_bytes: u64) -> Self {
        Self::with_segments(max_bytes, super::default_segment_count())
    }

    /// Creates a cache with `max_bytes` split across `segments` segments.
    ///
    /// A bounded `max_bytes` below `segments` gets `max_bytes` segments.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is 0.
    pub fn with_segments(max_bytes: u64, segments: usize) -> Self {
        let config: ConcurrentLruCacheConfig = ConcurrentCacheConfig {
            base: LruCacheConfig { max_bytes },
            segments,
        };
        Self::init(config, None)
    }

    /// Creates a cache from a configuration and an optional eviction callback.
    ///
    /// # Panics
    ///
    /// Panics if `config.segments` is 0.
    pub fn init(
        config: ConcurrentLruCacheConfig,
        on_evicted: Option<SharedEvictionCallback<V>>,
    ) -> Self {
        Self::init_with_hasher(config, on_evicted, DefaultHashBuilder::default())
    }
}

impl<V, S> ConcurrentLruCache<V, S>
where
    V: ByteSize + Send,
    S: BuildHasher + Clone + Send,
{
    /// Creates a concurrent cache with a custom hash builder.
    ///
    /// The builder is cloned into every segment.
    ///
    /// # Panics
    ///
    /// Panics if `config.segments` is 0.
    pub fn init_with_hasher(
        config: ConcurrentLruCacheConfig,
        on_evicted: Option<SharedEvictionCallback<V>>,
        hash_builder: S,
    ) -> Self {
        let segments: Vec<_> = (0..config.effective_segments())
            .map(|index| {
                let segment_config = LruCacheConfig {
                    max_bytes: config.segment_max_bytes(index),
                };
                Mutex::new(LruSegment::with_hasher(segment_config, hash_builder.clone()))
            })
            .collect();

        Self {
            segments: segments.into_boxed_slice(),
            hash_builder,
            max_bytes: config.base.max_bytes,
            on_evicted,
            next_victim: AtomicUsize::new(0),
        }
    }

    /// Returns the segment index for the given key.
    ///
    /// Uses the high bits of the hash; each segment's map indexes by the low bits.
    #[inline]
    fn segment_index(&self, key: &str) -> usize {
        let hash = self.hash_builder.hash_one(key);
        ((u128::from(hash) * self.segments.len() as u128) >> 64) as usize
    }

    #[inline]
    fn notify(&self) -> impl Fn(&str, &V) + '_ {
        move |k: &str, v: &V| {
            if let Some(callback) = &self.on_evicted {
                callback(k, v);
            }
        }
    }

    /// Returns the number of segments in the cache.
    ///
    /// Lower than the configured count when the budget could not feed every segment.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns the configured byte budget; `0` when unbounded.
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Returns the bytes currently held across all segments.
    ///
    /// Locks each segment in turn, so the total may be slightly stale under
    /// concurrent writes.
    pub fn current_bytes(&self) -> u64 {
        self.segments.iter().map(|s| s.lock().current_bytes()).sum()
    }

    /// Returns the total number of entries across all segments.
    ///
    /// Locks each segment in turn, so the count may be slightly stale under
    /// concurrent writes.
    pub fn len(&self) -> usize {
        self.segments.iter().map(|s| s.lock().len()).sum()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.lock().is_empty())
    }

    /// Inserts or updates `key`, evicting within its segment as needed.
    pub fn add(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let idx = self.segment_index(&key);
        let mut segment = self.segments[idx].lock();
        segment.add(key, value, self.notify());
    }

    /// Retrieves a **clone** of the value, marking the entry most recently used.
    ///
    /// For values that are expensive to clone use [`get_with`](Self::get_with).
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.get_with(key, V::clone)
    }

    /// Applies `f` to the value while holding the segment lock.
    ///
    /// Marks the entry most recently used. The lock is released after `f` returns.
    pub fn get_with<F, R>(&self, key: &str, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get(key).map(f)
    }

    /// Applies `f` to a mutable reference to the value while holding the lock.
    ///
    /// The entry's byte charge is not recomputed.
    pub fn get_mut_with<F, R>(&self, key: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut V) -> R,
    {
        let idx = self.segment_index(key);
        let mut segment = self.segments[idx].lock();
        segment.get_mut(key).map(f)
    }

    /// Returns `true` if the key is present, without touching recency order.
    pub fn contains(&self, key: &str) -> bool {
        let idx = self.segment_index(key);
        self.segments[idx].lock().contains(key)
    }

    /// Evicts the least recently used entry of one non-empty segment.
    ///
    /// Successive calls rotate through the segments, so this approximates
    /// global LRU. Returns `None` if every segment is empty.
    pub fn remove_oldest(&self) -> Option<(String, V)> {
        let n = self.segments.len();
        let start = self.next_victim.fetch_add(1, Ordering::Relaxed) % n;
        (0..n).find_map(|offset| {
            let mut segment = self.segments[(start + offset) % n].lock();
            segment.remove_oldest(self.notify())
        })
    }

    /// Removes a key from the cache without invoking the eviction callback.
    pub fn remove(&self, key: &str) -> Option<V> {
        let idx = self.segment_index(key);
        self.segments[idx].lock().remove(key)
    }

    /// Removes all entries from all segments.
    ///
    /// Acquires locks on each segment sequentially.
    pub fn clear(&self) {
        for segment in self.segments.iter() {
            segment.lock().clear();
        }
    }
}

impl<V, S> CacheMetrics for ConcurrentLruCache<V, S>
where
    V: ByteSize + Send,
    S: BuildHasher + Clone + Send,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut aggregated = LruCacheMetrics::new(0);
        for segment in self.segments.iter() {
            aggregated.merge(segment.lock().metrics());
        }
        aggregated.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "ConcurrentLRU"
    }
}

impl<V, S> fmt::Debug for ConcurrentLruCache<V, S>
where
    V: ByteSize + Send,
    S: BuildHasher + Clone + Send,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentLruCache")
            .field("segment_count", &self.segments.len())
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
