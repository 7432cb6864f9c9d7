//! Correctness Tests for the Byte-Budgeted LRU Cache
//!
//! This module validates the eviction policy using simple, predictable access
//! patterns. Each test explicitly validates which key gets evicted when an add
//! pushes the cache over its byte budget.
//!
//! ## Test Strategy
//! - Tiny budgets (a handful of entries) for predictable behavior
//! - Short string keys and values so every charge is easy to compute by hand
//! - Explicit checks for which key was evicted, and in what order

use sized_lru::config::LruCacheConfig;
use sized_lru::metrics::CacheMetrics;
use sized_lru::{ByteSize, EvictionCallback, LruCache};
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<(String, String)>>>;

// ============================================================================
// HELPER FUNCTIONS FOR CACHE CREATION
// ============================================================================

/// Helper to create a cache whose evictions are recorded in order
fn make_recording(max_bytes: u64) -> (LruCache<String>, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let callback: EvictionCallback<String> = Box::new(move |k: &str, v: &String| {
        sink.lock().unwrap().push((k.to_string(), v.clone()));
    });
    let cache = LruCache::init(LruCacheConfig { max_bytes }, Some(callback));
    (cache, log)
}

fn evicted_keys(log: &Log) -> Vec<String> {
    log.lock().unwrap().iter().map(|(k, _)| k.clone()).collect()
}

fn order<V: ByteSize>(cache: &LruCache<V>) -> Vec<String> {
    cache.iter().map(|(k, _)| k.to_string()).collect()
}

fn sum_of_charges<V: ByteSize>(cache: &LruCache<V>) -> u64 {
    cache
        .iter()
        .map(|(k, v)| (k.len() + v.byte_size()) as u64)
        .sum()
}

// ============================================================================
// BASIC SCENARIOS
// ============================================================================

#[test]
fn test_get_protects_entry_from_eviction() {
    let mut cache = LruCache::new(10);
    cache.add("k1", "v1".to_string());
    cache.add("k2", "v2".to_string());
    assert_eq!(cache.current_bytes(), 8);

    assert_eq!(cache.get("k1").map(String::as_str), Some("v1"));

    cache.add("k3", "v3".to_string());
    assert_eq!(cache.len(), 2);
    assert!(cache.contains("k1"));
    assert!(cache.contains("k3"));
    assert!(!cache.contains("k2"), "k2 should be evicted (LRU)");
    assert_eq!(order(&cache), ["k3", "k1"]);
}

#[test]
fn test_unbounded_cache_never_evicts() {
    let (mut cache, log) = make_recording(0);
    for i in 0..100 {
        cache.add(format!("key{i}"), format!("value{i}"));
    }
    assert_eq!(cache.len(), 100);
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(cache.current_bytes(), sum_of_charges(&cache));
}

#[test]
fn test_callback_fires_once_for_single_eviction() {
    let (mut cache, log) = make_recording(5);
    cache.add("ab", "x".to_string());
    cache.add("cd", "y".to_string());

    assert_eq!(
        *log.lock().unwrap(),
        [("ab".to_string(), "x".to_string())]
    );
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.current_bytes(), 3);
}

#[test]
fn test_remove_oldest_on_empty_cache() {
    let (mut cache, log) = make_recording(10);
    assert_eq!(cache.remove_oldest(), None);
    assert_eq!(cache.remove_oldest(), None);
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.current_bytes(), 0);
}

#[test]
fn test_get_missing_on_empty_cache() {
    let mut cache: LruCache<String> = LruCache::new(10);
    assert_eq!(cache.get("missing"), None);
    assert!(cache.is_empty());
}

#[test]
fn test_readd_with_larger_value_cascades() {
    let (mut cache, log) = make_recording(20);
    cache.add("a", "1111".to_string());
    cache.add("b", "2222".to_string());
    cache.add("c", "3333".to_string());
    cache.add("d", "4444".to_string());
    assert_eq!(cache.current_bytes(), 20);
    assert!(log.lock().unwrap().is_empty());

    // d: 5 -> 13 bytes, total 28; a then b go (oldest first)
    cache.add("d", "444444444444".to_string());
    assert_eq!(evicted_keys(&log), ["a", "b"]);
    assert_eq!(order(&cache), ["d", "c"]);
    assert_eq!(cache.current_bytes(), 18);
    assert_eq!(cache.current_bytes(), sum_of_charges(&cache));
}

#[test]
fn test_readd_with_smaller_value_shrinks_total() {
    let (mut cache, log) = make_recording(20);
    cache.add("a", "123456789".to_string());
    cache.add("b", "1".to_string());
    cache.add("a", "1".to_string());
    assert_eq!(cache.current_bytes(), 4);
    assert_eq!(cache.len(), 2);
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(order(&cache), ["a", "b"]);
}

// ============================================================================
// RECENCY AND EVICTION ORDER
// ============================================================================

#[test]
fn test_readd_touches_recency() {
    let (mut cache, log) = make_recording(6);
    cache.add("a", "1".to_string());
    cache.add("b", "2".to_string());
    cache.add("c", "3".to_string());

    // overwrite a with the same size: a becomes most recent
    cache.add("a", "9".to_string());
    cache.add("d", "4".to_string());

    assert_eq!(evicted_keys(&log), ["b"]);
    assert_eq!(order(&cache), ["d", "a", "c"]);
}

#[test]
fn test_multiple_evictions_fire_oldest_first() {
    let (mut cache, log) = make_recording(12);
    for key in ["a", "b", "c", "d", "e", "f"] {
        cache.add(key, "x".to_string());
    }
    assert_eq!(cache.current_bytes(), 12);

    // "g" + 7 bytes = 8; total 20, four entries have to go
    cache.add("g", "1234567".to_string());
    assert_eq!(evicted_keys(&log), ["a", "b", "c", "d"]);
    assert_eq!(order(&cache), ["g", "f", "e"]);
    assert_eq!(cache.current_bytes(), 12);
}

#[test]
fn test_remove_oldest_follows_access_order() {
    let mut cache = LruCache::new(0);
    for key in ["a", "b", "c"] {
        cache.add(key, key.to_string());
    }
    cache.get("a");

    let drained: Vec<String> =
        std::iter::from_fn(|| cache.remove_oldest().map(|(k, _)| k)).collect();
    assert_eq!(drained, ["b", "c", "a"]);
    assert_eq!(cache.current_bytes(), 0);
}

#[test]
fn test_peek_does_not_protect_entry() {
    let (mut cache, log) = make_recording(6);
    cache.add("a", "1".to_string());
    cache.add("b", "2".to_string());
    cache.add("c", "3".to_string());

    assert!(cache.peek("a").is_some());
    cache.add("d", "4".to_string());

    assert_eq!(evicted_keys(&log), ["a"]);
}

// ============================================================================
// SIZE BOUNDARIES
// ============================================================================

#[test]
fn test_exactly_at_budget_does_not_evict() {
    let (mut cache, log) = make_recording(8);
    cache.add("k1", "v1".to_string());
    cache.add("k2", "v2".to_string());
    assert_eq!(cache.current_bytes(), 8);
    assert!(log.lock().unwrap().is_empty());

    cache.add("k", String::new());
    assert_eq!(evicted_keys(&log), ["k1"]);
}

#[test]
fn test_entry_larger_than_budget_is_evicted_with_everything_else() {
    let (mut cache, log) = make_recording(10);
    cache.add("a", "1".to_string());
    cache.add("b", "2".to_string());
    cache.add("huge", "0123456789".to_string());

    assert_eq!(evicted_keys(&log), ["a", "b", "huge"]);
    assert!(cache.is_empty());
    assert_eq!(cache.current_bytes(), 0);
    assert_eq!(cache.metrics().get("oversized_insertions"), Some(&1.0));
}

#[test]
fn test_empty_key_and_value() {
    let mut cache = LruCache::new(1);
    cache.add("", String::new());
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.current_bytes(), 0);
    assert_eq!(cache.get("").map(String::as_str), Some(""));
}

#[test]
fn test_multibyte_keys_are_charged_in_bytes() {
    let mut cache = LruCache::new(0);
    cache.add("ключ", "значение".to_string());
    assert_eq!(cache.current_bytes(), 8 + 16);
}

// ============================================================================
// EXPLICIT REMOVAL
// ============================================================================

#[test]
fn test_remove_and_clear_are_not_evictions() {
    let (mut cache, log) = make_recording(100);
    cache.add("a", "1".to_string());
    cache.add("b", "2".to_string());
    cache.add("c", "3".to_string());

    assert_eq!(cache.remove("b"), Some("2".to_string()));
    assert_eq!(cache.current_bytes(), 4);
    cache.clear();
    assert!(cache.is_empty());
    assert!(log.lock().unwrap().is_empty());

    let metrics = cache.metrics();
    assert_eq!(metrics.get("removals"), Some(&1.0));
    assert_eq!(metrics.get("evictions"), Some(&0.0));
}

#[test]
fn test_borrowed_and_shared_values() {
    let shared: Arc<[u8]> = Arc::from(&[1u8, 2, 3, 4][..]);
    let mut cache: LruCache<Arc<[u8]>> = LruCache::new(0);
    cache.add("blob", Arc::clone(&shared));
    assert_eq!(cache.current_bytes(), 8);

    let mut boxed: LruCache<Box<str>> = LruCache::new(0);
    boxed.add("s", Box::from("hello"));
    assert_eq!(boxed.current_bytes(), 6);
}
