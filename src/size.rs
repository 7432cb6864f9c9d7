//! Byte Size Capability
//!
//! Every value stored in an [`LruCache`](crate::LruCache) must be able to report
//! how many bytes it accounts for. The cache charges each entry
//! `key.len() + value.byte_size()` against its budget.
//!
//! Implementations are provided for the usual owned and borrowed byte and string
//! containers, and for smart pointers that delegate to their pointee. Implement
//! the trait for your own types when the cached value is a structure:
//!
//! ```
//! use sized_lru::ByteSize;
//!
//! struct Blob {
//!     header: [u8; 16],
//!     body: Vec<u8>,
//! }
//!
//! impl ByteSize for Blob {
//!     fn byte_size(&self) -> usize {
//!         self.header.len() + self.body.len()
//!     }
//! }
//!
//! let blob = Blob { header: [0; 16], body: vec![1, 2, 3] };
//! assert_eq!(blob.byte_size(), 19);
//! ```
//!
//! The reported size should stay stable while the value sits in the cache. The
//! cache records the size at insertion time and subtracts that recorded amount
//! when the entry leaves, so a value whose size drifts cannot corrupt the
//! running total.

extern crate alloc;

use alloc::borrow::{Cow, ToOwned};
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// A value that knows how many bytes it occupies.
pub trait ByteSize {
    /// Returns the number of bytes this value accounts for.
    fn byte_size(&self) -> usize;
}

impl ByteSize for str {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for String {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for [u8] {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Vec<u8> {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl<const N: usize> ByteSize for [u8; N] {
    #[inline]
    fn byte_size(&self) -> usize {
        N
    }
}

impl<T: ByteSize + ?Sized> ByteSize for &T {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for Box<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for Rc<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for Arc<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

impl<T> ByteSize for Cow<'_, T>
where
    T: ByteSize + ToOwned + ?Sized,
{
    #[inline]
    fn byte_size(&self) -> usize {
        self.as_ref().byte_size()
    }
}
