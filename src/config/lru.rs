//! Configuration for the byte-budgeted LRU cache.
//!
//! # Sizing Guidelines
//!
//! `max_bytes` is charged with `key.len() + value.byte_size()` per entry. Set
//! it to the memory you want the cached keys and values to occupy; bookkeeping
//! overhead comes on top (see the [`config`](crate::config) module docs).
//!
//! **Example**: a 100MB page cache with ~8KB pages holds roughly 12,800 pages:
//! - `max_bytes = 100 * 1024 * 1024`
//!
//! # Examples
//!
//! ```
//! use sized_lru::config::LruCacheConfig;
//! use sized_lru::LruCache;
//!
//! // Bounded: 50MB budget
//! let config = LruCacheConfig {
//!     max_bytes: 50 * 1024 * 1024,
//! };
//! let cache: LruCache<Vec<u8>> = LruCache::init(config, None);
//!
//! // Unbounded: never evicts for capacity
//! let cache: LruCache<String> = LruCache::init(LruCacheConfig::unbounded(), None);
//! assert!(!cache.is_bounded());
//! ```

use core::fmt;

/// Configuration for a byte-budgeted LRU cache.
///
/// # Fields
///
/// - `max_bytes`: Maximum total of `key.len() + value.byte_size()` over all
///   entries. `0` means unbounded.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum total size in bytes of cached keys and values; `0` disables the limit.
    pub max_bytes: u64,
}

impl LruCacheConfig {
    /// A configuration that never evicts for capacity reasons.
    #[inline]
    pub const fn unbounded() -> Self {
        Self { max_bytes: 0 }
    }

    /// Returns `true` when a byte limit is in force.
    #[inline]
    pub const fn is_bounded(&self) -> bool {
        self.max_bytes != 0
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_config_creation() {
        let config = LruCacheConfig {
            max_bytes: 10 * 1024 * 1024,
        };
        assert_eq!(config.max_bytes, 10 * 1024 * 1024);
        assert!(config.is_bounded());
    }

    #[test]
    fn test_lru_config_unbounded() {
        let config = LruCacheConfig::unbounded();
        assert_eq!(config.max_bytes, 0);
        assert!(!config.is_bounded());
        assert_eq!(config, LruCacheConfig::default());
    }
}
