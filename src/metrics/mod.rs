//! Cache Metrics System
//!
//! Counters describing how the cache is used, reported through the
//! [`CacheMetrics`] trait as a `BTreeMap<String, f64>`.
//!
//! BTreeMap is used instead of HashMap so that metrics always come out in the
//! same order, which keeps test assertions and log lines reproducible.
//!
//! The byte counters here are also the cache's running size total:
//! `cache_size_bytes` is what [`LruCache::current_bytes`](crate::LruCache::current_bytes)
//! returns.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters shared by every cache flavour in this crate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get`, `get_mut`)
    pub requests: u64,

    /// Lookups that found their key
    pub cache_hits: u64,

    /// Bytes charged by the entries returned on hits
    pub bytes_served_from_cache: u64,

    /// Bytes charged by every value written (inserts and overwrites)
    pub bytes_written_to_cache: u64,

    /// Entries evicted through `remove_oldest`, whether forced by the budget or called directly
    pub evictions: u64,

    /// Bytes released by evictions
    pub bytes_evicted: u64,

    /// Entries removed explicitly with `remove`
    pub removals: u64,

    /// Current sum of `key.len() + value.byte_size()` over held entries
    pub cache_size_bytes: u64,

    /// Configured budget; `0` when unbounded
    pub max_cache_size_bytes: u64,
}

impl CoreCacheMetrics {
    /// Creates an empty set of counters for a cache with the given budget.
    pub fn new(max_cache_size_bytes: u64) -> Self {
        Self {
            max_cache_size_bytes,
            ..Default::default()
        }
    }

    /// Records a lookup that found an entry charged `charge` bytes.
    pub fn record_hit(&mut self, charge: u64) {
        self.requests += 1;
        self.cache_hits += 1;
        self.bytes_served_from_cache += charge;
    }

    /// Records a lookup that found nothing.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a brand-new entry.
    pub fn record_insertion(&mut self, charge: u64) {
        self.cache_size_bytes += charge;
        self.bytes_written_to_cache += charge;
    }

    /// Records an existing entry whose value was replaced.
    pub fn record_size_change(&mut self, old_charge: u64, new_charge: u64) {
        self.cache_size_bytes = self.cache_size_bytes - old_charge + new_charge;
        self.bytes_written_to_cache += new_charge;
    }

    /// Records the least recently used entry leaving the cache.
    pub fn record_eviction(&mut self, charge: u64) {
        self.evictions += 1;
        self.bytes_evicted += charge;
        self.cache_size_bytes -= charge;
    }

    /// Records an explicit removal.
    pub fn record_removal(&mut self, charge: u64) {
        self.removals += 1;
        self.cache_size_bytes -= charge;
    }

    /// Forgets every held byte; counters of past activity are kept.
    pub fn record_clear(&mut self) {
        self.cache_size_bytes = 0;
    }

    /// Lookups that found nothing.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, or 0.0 before the first lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// How full the cache is relative to its budget, or 0.0 when unbounded.
    pub fn cache_utilization(&self) -> f64 {
        if self.max_cache_size_bytes > 0 {
            self.cache_size_bytes as f64 / self.max_cache_size_bytes as f64
        } else {
            0.0
        }
    }

    /// Adds another set of counters into this one.
    ///
    /// Used to aggregate the segments of a concurrent cache.
    pub fn merge(&mut self, other: &CoreCacheMetrics) {
        self.requests += other.requests;
        self.cache_hits += other.cache_hits;
        self.bytes_served_from_cache += other.bytes_served_from_cache;
        self.bytes_written_to_cache += other.bytes_written_to_cache;
        self.evictions += other.evictions;
        self.bytes_evicted += other.bytes_evicted;
        self.removals += other.removals;
        self.cache_size_bytes += other.cache_size_bytes;
        self.max_cache_size_bytes += other.max_cache_size_bytes;
    }

    /// Converts the counters and derived rates to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);

        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        metrics.insert(
            "bytes_served_from_cache".to_string(),
            self.bytes_served_from_cache as f64,
        );
        metrics.insert(
            "bytes_written_to_cache".to_string(),
            self.bytes_written_to_cache as f64,
        );
        metrics.insert("bytes_evicted".to_string(), self.bytes_evicted as f64);

        metrics.insert("cache_size_bytes".to_string(), self.cache_size_bytes as f64);
        metrics.insert(
            "max_cache_size_bytes".to_string(),
            self.max_cache_size_bytes as f64,
        );
        metrics.insert("cache_utilization".to_string(), self.cache_utilization());

        metrics
    }
}

/// Uniform metrics reporting for every cache type in this crate.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}
