//! Stress Tests for the Concurrent Cache
//!
//! These tests verify thread safety and size accounting under high contention.

#![cfg(feature = "concurrent")]

use scoped_threadpool::Pool;
use sized_lru::config::{ConcurrentCacheConfig, ConcurrentLruCacheConfig, LruCacheConfig};
use sized_lru::ConcurrentLruCache;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const NUM_THREADS: u32 = 16;
const OPS_PER_THREAD: usize = 10_000;

fn lru_config(max_bytes: u64, segments: usize) -> ConcurrentLruCacheConfig {
    ConcurrentCacheConfig {
        base: LruCacheConfig { max_bytes },
        segments,
    }
}

#[test]
fn stress_lru_high_contention() {
    let cache: ConcurrentLruCache<String> = ConcurrentLruCache::init(lru_config(8 * 1024, 16), None);
    let mut pool = Pool::new(NUM_THREADS);

    // Every thread hammers the same small key space
    pool.scoped(|scope| {
        for t in 0..NUM_THREADS {
            let cache = &cache;
            scope.execute(move || {
                for i in 0..OPS_PER_THREAD {
                    let key = format!("key{}", i % 200);
                    if i % 3 == 0 {
                        let _ = cache.get(&key);
                    } else {
                        cache.add(key, format!("{t}:{i}"));
                    }
                }
            });
        }
    });

    assert!(cache.current_bytes() <= 8 * 1024);
    assert!(cache.len() <= 200);
}

#[test]
fn stress_segment_counts() {
    for segments in [1, 2, 4, 8, 32] {
        let cache: ConcurrentLruCache<Vec<u8>> =
            ConcurrentLruCache::init(lru_config(4096, segments), None);
        let mut pool = Pool::new(4);

        pool.scoped(|scope| {
            for t in 0..4 {
                let cache = &cache;
                scope.execute(move || {
                    for i in 0..1_000 {
                        cache.add(format!("s{t}_{i}"), vec![0u8; i % 24]);
                    }
                });
            }
        });

        assert_eq!(cache.segment_count(), segments);
        assert!(
            cache.current_bytes() <= 4096,
            "{segments} segments exceeded budget"
        );
    }
}

#[test]
fn stress_empty_cache() {
    let cache: ConcurrentLruCache<String> = ConcurrentLruCache::init(lru_config(1024, 8), None);
    let mut pool = Pool::new(NUM_THREADS);

    pool.scoped(|scope| {
        for _ in 0..NUM_THREADS {
            let cache = &cache;
            scope.execute(move || {
                for i in 0..1_000 {
                    assert!(cache.get(&format!("missing{i}")).is_none());
                    assert!(cache.remove_oldest().is_none());
                    assert!(cache.remove("missing").is_none());
                }
            });
        }
    });

    assert!(cache.is_empty());
    assert_eq!(cache.current_bytes(), 0);
}

#[test]
fn stress_concurrent_removes() {
    let cache: ConcurrentLruCache<String> = ConcurrentLruCache::init(lru_config(0, 16), None);
    for i in 0..4_000 {
        cache.add(format!("key{i}"), "v".to_string());
    }
    let removed = AtomicUsize::new(0);
    let mut pool = Pool::new(8);

    // Overlapping ranges: each key can only be removed once
    pool.scoped(|scope| {
        for t in 0..8 {
            let cache = &cache;
            let removed = &removed;
            scope.execute(move || {
                for i in (t * 250)..(t * 250 + 1_000) {
                    if cache.remove(&format!("key{}", i % 4_000)).is_some() {
                        removed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    assert_eq!(removed.load(Ordering::Relaxed) + cache.len(), 4_000);
}

#[test]
fn stress_concurrent_clear() {
    let cache = Arc::new(ConcurrentLruCache::init(lru_config(1 << 20, 8), None));
    let mut pool = Pool::new(8);

    pool.scoped(|scope| {
        for t in 0..8 {
            let cache = Arc::clone(&cache);
            scope.execute(move || {
                for i in 0..2_000 {
                    if t == 0 && i % 100 == 0 {
                        cache.clear();
                    } else {
                        cache.add(format!("t{t}_{i}"), "payload".to_string());
                    }
                }
            });
        }
    });

    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.current_bytes(), 0);
}
