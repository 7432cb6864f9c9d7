//! LRU Cache Metrics
//!
//! Metrics specific to the LRU cache.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Clone)]
pub struct LruCacheMetrics {
    /// Core metrics common to all caches
    pub core: CoreCacheMetrics,

    /// Adds whose entry alone was larger than the whole budget
    pub oversized_insertions: u64,
}

impl LruCacheMetrics {
    /// Creates empty metrics for a cache with the given budget.
    pub fn new(max_cache_size_bytes: u64) -> Self {
        Self {
            core: CoreCacheMetrics::new(max_cache_size_bytes),
            oversized_insertions: 0,
        }
    }

    /// Records an add whose entry alone exceeded the budget.
    pub fn record_oversized_insertion(&mut self) {
        self.oversized_insertions += 1;
    }

    /// Adds another set of LRU counters into this one.
    pub fn merge(&mut self, other: &LruCacheMetrics) {
        self.core.merge(&other.core);
        self.oversized_insertions += other.oversized_insertions;
    }

    /// Converts LRU metrics to a BTreeMap for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert(
            "oversized_insertions".to_string(),
            self.oversized_insertions as f64,
        );
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
