#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How Much Does an Entry Cost?
//!
//! Every entry is charged `key.len() + value.byte_size()`. The charge is
//! computed once when the value is written and frozen with the entry, so the
//! running total always equals the sum over held entries:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  add("k1", "v1")                                             │
//! │                                                              │
//! │     key.len()  = 2 ─┐                                        │
//! │                     ├──▶ charge = 4 ──▶ current_bytes += 4   │
//! │  value.byte_size() = 2 ─┘                                    │
//! │                                                              │
//! │  while max_bytes != 0 && current_bytes > max_bytes:          │
//! │      remove_oldest()   // callback(key, value)               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Type | Description |
//! |------|-------------|
//! | [`LruCache`] | Single-threaded byte-budgeted LRU cache |
//! | [`ByteSize`] | How a value reports its size |
//! | [`CacheEntry`] | A key, its value and its frozen byte charge |
//! | `ConcurrentLruCache` | Lock-striped thread-safe variant (feature `concurrent`) |
//!
//! ## Performance Characteristics
//!
//! | Operation    | Time | Notes |
//! |--------------|------|-------|
//! | add          | O(1) | plus O(k) for k forced evictions |
//! | get          | O(1) | reorders the recency list |
//! | remove_oldest| O(1) | |
//! | len          | O(1) | |
//!
//! ## Eviction Callback
//!
//! ```rust
//! use sized_lru::LruCache;
//!
//! let mut cache = LruCache::with_eviction_callback(8, |key: &str, value: &Vec<u8>| {
//!     println!("evicted {key} ({} bytes)", value.len());
//! });
//!
//! cache.add("a", vec![0u8; 3]);
//! cache.add("b", vec![0u8; 3]);   // 4 + 4 = 8 bytes: fits exactly
//! cache.add("c", vec![0u8; 1]);   // 10 bytes: "a" is evicted
//! assert!(!cache.contains("a"));
//! assert_eq!(cache.current_bytes(), 6);
//! ```
//!
//! ## Concurrent Cache
//!
//! Enable the `concurrent` feature for the thread-safe version:
//!
//! ```toml
//! [dependencies]
//! sized-lru = { version = "0.1", features = ["concurrent"] }
//! ```
//!
//! The concurrent cache splits the key space and the byte budget across
//! independently locked segments. Recency order is exact only within a segment.
//!
//! ## Modules
//!
//! - [`lru`]: The byte-budgeted LRU cache
//! - [`size`]: The [`ByteSize`] trait and its implementations
//! - [`entry`]: Cache entries and their byte charge
//! - [`config`]: Configuration structures
//! - [`metrics`]: Metrics collection for cache performance monitoring
//! - `concurrent`: Thread-safe concurrent cache (requires `concurrent` feature)

#![no_std]

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Size accounting for cached values.
///
/// Provides the [`ByteSize`] trait the cache uses to charge each value against
/// its byte budget.
pub mod size;

/// Cache entry type.
///
/// A [`CacheEntry`] owns a key, its value and the byte charge computed when the
/// value was written.
pub mod entry;

/// Doubly linked list implementation with in-place editing capabilities.
///
/// **Note**: This module is internal infrastructure and should not be used directly
/// by library consumers. It exposes unsafe raw pointer operations that require
/// careful invariant maintenance.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Byte-budgeted Least Recently Used (LRU) cache implementation.
///
/// Evicts the least recently used entries once the total size of keys and
/// values exceeds the configured budget.
pub mod lru;

/// Cache metrics system.
///
/// Counters for hits, misses, evictions and bytes, reported through a common
/// [`CacheMetrics`](metrics::CacheMetrics) interface.
pub mod metrics;

/// Concurrent cache implementation.
///
/// Provides a thread-safe cache using segmented storage. The key space and the
/// byte budget are partitioned across segments, each protected by its own lock.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use entry::CacheEntry;
pub use lru::{EvictionCallback, LruCache};
pub use size::ByteSize;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentLruCache;
