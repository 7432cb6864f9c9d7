//! Cache Configuration Module
//!
//! Configuration structures for the LRU cache and its concurrent variant.
//! Config structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: All parameters must be provided at construction
//! - **No boilerplate**: No builder needed
//!
//! # Sizing Guidelines
//!
//! `max_bytes` bounds the sum of `key.len() + value.byte_size()` over all
//! entries. It does not include per-entry bookkeeping (list node pointers, hash
//! table slots, the `String` header), which adds roughly 80 bytes per entry:
//!
//! ```text
//! Total Memory ≈ max_bytes + (entries × ~80 bytes)
//! ```
//!
//! A `max_bytes` of `0` disables the limit entirely: nothing is ever evicted
//! for capacity reasons.
//!
//! # Concurrent Cache Configs (requires `concurrent` feature)
//!
//! Use `ConcurrentCacheConfig<C>` wrapper around the base config:
//!
//! | Type Alias | Base Config | Description |
//! |------------|-------------|-------------|
//! | `ConcurrentLruCacheConfig` | `LruCacheConfig` | Thread-safe, sharded LRU |
//!
//! # Examples
//!
//! ```
//! use sized_lru::config::LruCacheConfig;
//! use sized_lru::LruCache;
//!
//! // 10MB of keys and values
//! let config = LruCacheConfig {
//!     max_bytes: 10 * 1024 * 1024,
//! };
//! let cache: LruCache<Vec<u8>> = LruCache::init(config, None);
//! assert_eq!(cache.max_bytes(), 10 * 1024 * 1024);
//! ```

pub mod lru;

pub use lru::LruCacheConfig;

/// Generic configuration wrapper for concurrent caches.
///
/// Wraps the base cache configuration and adds the `segments` field
/// for controlling the number of independent segments used for sharding.
///
/// # Sizing Note
///
/// `max_bytes` in the base config applies to the **entire cache**. Each segment
/// gets `max_bytes / segments`, and the first `max_bytes % segments` segments
/// get one extra byte, so the shares add up to `max_bytes` exactly. A bounded
/// budget smaller than `segments` builds only `max_bytes` segments of one byte
/// each, since a 0-byte segment would be unbounded. An unbounded base config
/// gives unbounded segments.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "concurrent")]
/// # {
/// use sized_lru::config::{ConcurrentCacheConfig, ConcurrentLruCacheConfig, LruCacheConfig};
///
/// // 64MB concurrent cache with 16 segments of 4MB each
/// let config: ConcurrentLruCacheConfig = ConcurrentCacheConfig {
///     base: LruCacheConfig {
///         max_bytes: 64 * 1024 * 1024,
///     },
///     segments: 16,
/// };
/// assert_eq!(config.segment_max_bytes(0), 4 * 1024 * 1024);
///
/// // 10 bytes cannot feed 16 segments
/// let tiny: ConcurrentLruCacheConfig = ConcurrentCacheConfig {
///     base: LruCacheConfig { max_bytes: 10 },
///     segments: 16,
/// };
/// assert_eq!(tiny.effective_segments(), 10);
/// # }
/// ```
#[cfg(feature = "concurrent")]
#[derive(Clone, Copy)]
pub struct ConcurrentCacheConfig<C> {
    /// Base configuration for the underlying cache.
    pub base: C,
    /// Number of segments for sharding (more segments = less contention).
    /// Must be at least 1.
    pub segments: usize,
}

#[cfg(feature = "concurrent")]
impl<C: core::fmt::Debug> core::fmt::Debug for ConcurrentCacheConfig<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConcurrentCacheConfig")
            .field("base", &self.base)
            .field("segments", &self.segments)
            .finish()
    }
}

/// Configuration for a concurrent LRU cache.
/// Type alias for `ConcurrentCacheConfig<LruCacheConfig>`.
#[cfg(feature = "concurrent")]
pub type ConcurrentLruCacheConfig = ConcurrentCacheConfig<LruCacheConfig>;

#[cfg(feature = "concurrent")]
impl ConcurrentLruCacheConfig {
    /// Number of segments a cache built from this config has.
    ///
    /// Equal to `segments`, capped at `max_bytes` when the budget is bounded.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is 0.
    pub fn effective_segments(&self) -> usize {
        assert!(self.segments > 0, "segments must be > 0");
        match self.base.max_bytes {
            0 => self.segments,
            max => self
                .segments
                .min(usize::try_from(max).unwrap_or(usize::MAX)),
        }
    }

    /// Byte budget handed to segment `index`.
    ///
    /// Never 0 for a bounded config. Summed over
    /// `0..effective_segments()` the shares equal `base.max_bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is 0.
    pub fn segment_max_bytes(&self, index: usize) -> u64 {
        let n = self.effective_segments() as u64;
        let share = self.base.max_bytes / n;
        let remainder = self.base.max_bytes % n;
        share + u64::from((index as u64) < remainder)
    }
}
