//! Concurrent Cache Implementations
//!
//! The core [`LruCache`](crate::LruCache) has no internal locking. This module
//! provides a separate thread-safe variant built from the same algorithm, for
//! callers that would otherwise wrap the cache in a single global lock.
//!
//! # Architecture
//!
//! - The key space is partitioned across multiple segments using hash-based sharding
//! - Each segment is an independent LRU with its own share of the byte budget,
//!   protected by its own `parking_lot::Mutex`
//! - Operations only lock the relevant segment, allowing concurrent access to
//!   different segments
//!
//! ## Why Mutex Instead of RwLock?
//!
//! An LRU `get()` moves the accessed entry to the front of the recency list, so
//! every read is a write. `RwLock` would buy nothing: every access would still
//! need the exclusive lock. Concurrency comes from **segmentation** instead:
//! different keys can be accessed in parallel as long as they hash to different
//! segments.
//!
//! # Default Segment Count
//!
//! [`default_segment_count`] segments are used unless configured otherwise. A
//! single segment gives exact global LRU order at the cost of one shared lock.
//!
//! # Example
//!
//! ```rust
//! use sized_lru::concurrent::ConcurrentLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache: Arc<ConcurrentLruCache<String>> = Arc::new(ConcurrentLruCache::new(1 << 20));
//!
//! let handles: Vec<_> = (0..4).map(|t| {
//!     let cache = Arc::clone(&cache);
//!     thread::spawn(move || {
//!         for i in 0..100 {
//!             let key = format!("key_{}_{}", t, i);
//!             cache.add(key.clone(), i.to_string());
//!             assert!(cache.get(&key).is_some());
//!         }
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 400);
//! ```

mod lru;

pub use self::lru::{ConcurrentLruCache, SharedEvictionCallback};

/// Returns the default number of segments.
///
/// Sixteen segments keep contention low on typical core counts without
/// fragmenting small budgets too much.
#[inline]
pub fn default_segment_count() -> usize {
    16
}
