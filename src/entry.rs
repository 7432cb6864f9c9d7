//! Cache Entry Type
//!
//! A `CacheEntry<V>` is one stored key/value pair together with the number of
//! bytes it is charged against the cache budget. The charge is computed once,
//! when the entry is created or its value replaced:
//!
//! ```text
//! charge = key.len() + value.byte_size()
//! ```
//!
//! Keeping the charge on the entry means removal always subtracts exactly what
//! was added, even if a value later reports a different size.
//!
//! # Memory Layout
//!
//! - `key: String` - 24 bytes + key bytes on the heap
//! - `value: V` - user's value type
//! - `charge: u64` - 8 bytes
//!
//! Entries live inside list nodes, which add two pointers (16 bytes) on top.

extern crate alloc;

use crate::size::ByteSize;
use alloc::string::String;
use core::fmt;
use core::mem;

/// One stored key/value pair plus its byte charge.
///
/// # Examples
///
/// ```
/// use sized_lru::CacheEntry;
///
/// let entry = CacheEntry::new("k1".to_string(), "v1");
/// assert_eq!(entry.key(), "k1");
/// assert_eq!(*entry.value(), "v1");
/// assert_eq!(entry.charge(), 4);
/// ```
pub struct CacheEntry<V> {
    key: String,
    value: V,
    charge: u64,
}

impl<V: ByteSize> CacheEntry<V> {
    /// Creates an entry and computes its charge from the key and value.
    #[inline]
    pub fn new(key: String, value: V) -> Self {
        let charge = Self::charge_of(&key, &value);
        Self { key, value, charge }
    }

    /// Swaps in a new value, recomputing the charge.
    ///
    /// Returns the previous value and the previous charge.
    #[inline]
    pub(crate) fn replace_value(&mut self, value: V) -> (V, u64) {
        let new_charge = Self::charge_of(&self.key, &value);
        let old_charge = mem::replace(&mut self.charge, new_charge);
        let old_value = mem::replace(&mut self.value, value);
        (old_value, old_charge)
    }

    #[inline]
    fn charge_of(key: &str, value: &V) -> u64 {
        key.len() as u64 + value.byte_size() as u64
    }
}

impl<V> CacheEntry<V> {
    /// The entry's key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The entry's value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Bytes this entry is charged against the cache budget.
    #[inline]
    pub fn charge(&self) -> u64 {
        self.charge
    }

    /// Splits the entry into its key and value.
    #[inline]
    pub fn into_parts(self) -> (String, V) {
        (self.key, self.value)
    }
}

impl<V: Clone> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            charge: self.charge,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for CacheEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("charge", &self.charge)
            .finish()
    }
}
