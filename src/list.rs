extern crate alloc;

use alloc::boxed::Box;
use alloc::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr;

/// A node in the doubly linked list.
///
/// Contains a value and pointers to the previous and next nodes.
/// This structure is not meant to be used directly by users of the `List`.
pub struct Node<T> {
    /// The value stored in this node. Uses MaybeUninit to allow for sigil nodes.
    val: mem::MaybeUninit<T>,
    /// Pointer to the previous node in the list.
    prev: *mut Node<T>,
    /// Pointer to the next node in the list.
    next: *mut Node<T>,
}

impl<T> Node<T> {
    fn new(val: T) -> Self {
        Node {
            val: mem::MaybeUninit::new(val),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Creates a new sigil (sentinel) node without initializing the value.
    ///
    /// Sigil nodes are used as head and tail markers in the list.
    fn new_sigil() -> Self {
        Node {
            val: mem::MaybeUninit::uninit(),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Returns a reference to the value held by this node.
    ///
    /// # Safety
    ///
    /// The value must be initialized, i.e. this must not be a sigil node.
    pub unsafe fn value(&self) -> &T {
        // SAFETY: caller guarantees the node is not a sigil
        unsafe { self.val.assume_init_ref() }
    }

    /// Returns a mutable reference to the value held by this node.
    ///
    /// # Safety
    ///
    /// The value must be initialized, i.e. this must not be a sigil node.
    pub unsafe fn value_mut(&mut self) -> &mut T {
        // SAFETY: caller guarantees the node is not a sigil
        unsafe { self.val.assume_init_mut() }
    }

    /// Consumes a detached node and returns its value.
    ///
    /// # Safety
    ///
    /// The value must be initialized, i.e. this must not be a sigil node.
    unsafe fn into_value(self: Box<Self>) -> T {
        let Node { val, .. } = *self;
        // SAFETY: caller guarantees the node is not a sigil
        unsafe { val.assume_init() }
    }
}

/// An unbounded doubly linked list ordered from front (most recently touched)
/// to back (least recently touched).
///
/// Sentinel nodes at both ends keep every link operation branch-free. Nodes are
/// heap allocated and never move, so the raw pointer returned by
/// [`push_front`](List::push_front) stays valid until the node is removed or
/// the list is dropped.
pub struct List<T> {
    len: usize,
    head: *mut Node<T>,
    tail: *mut Node<T>,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub fn new() -> List<T> {
        let head = Box::into_raw(Box::new(Node::new_sigil()));
        let tail = Box::into_raw(Box::new(Node::new_sigil()));

        // SAFETY: head and tail are newly allocated and valid pointers
        unsafe {
            (*head).next = tail;
            (*tail).prev = head;
        }

        List { len: 0, head, tail }
    }

    /// Returns the current number of items in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocates a node for `v` and links it at the front.
    ///
    /// Returns the node handle the caller can later pass to
    /// [`move_to_front`](List::move_to_front) or [`remove`](List::remove).
    pub fn push_front(&mut self, v: T) -> *mut Node<T> {
        let node = Box::into_raw(Box::new(Node::new(v)));
        // SAFETY: node is a newly allocated node that is not part of any list yet
        unsafe { self.attach(node) };
        self.len += 1;
        node
    }

    /// Moves a node to the front of the list (after the head sentinel).
    ///
    /// # Safety
    ///
    /// `node` must be a live, non-sigil node of this list.
    pub unsafe fn move_to_front(&mut self, node: *mut Node<T>) {
        // SAFETY: head is valid for the lifetime of the list
        if unsafe { (*self.head).next } == node {
            return;
        }
        // SAFETY: caller guarantees node belongs to this list
        unsafe {
            self.detach(node);
            self.attach(node);
        }
    }

    /// Unlinks `node`, frees it and returns its value.
    ///
    /// # Safety
    ///
    /// `node` must be a live, non-sigil node of this list. The handle is dangling
    /// after this call.
    pub unsafe fn remove(&mut self, node: *mut Node<T>) -> T {
        // SAFETY: caller guarantees node belongs to this list and was allocated
        // by `push_front`
        unsafe {
            self.detach(node);
            self.len -= 1;
            Box::from_raw(node).into_value()
        }
    }

    /// Unlinks and returns the back-most (least recently touched) value.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so tail.prev is a value node
        unsafe {
            let last = (*self.tail).prev;
            Some(self.remove(last))
        }
    }

    /// Returns the back-most value without unlinking it.
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty, so tail.prev is a value node
        unsafe { Some((*(*self.tail).prev).value()) }
    }

    /// Iterates values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            // SAFETY: head is valid for the lifetime of the list
            next: unsafe { (*self.head).next },
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Removes and drops every value.
    pub fn clear(&mut self) {
        while self.pop_back().is_some() {}
    }

    /// Unlinks a node from its neighbours without freeing it.
    ///
    /// # Safety
    ///
    /// `node` must be a live, non-sigil node of this list.
    unsafe fn detach(&mut self, node: *mut Node<T>) {
        // SAFETY: a linked node always has valid prev and next pointers
        unsafe {
            (*(*node).prev).next = (*node).next;
            (*(*node).next).prev = (*node).prev;
        }
    }

    /// Links a node right after the head sentinel.
    ///
    /// # Safety
    ///
    /// `node` must be valid and not currently linked into any list.
    unsafe fn attach(&mut self, node: *mut Node<T>) {
        // SAFETY: head is valid and its next is either a value node or the tail
        unsafe {
            (*node).next = (*self.head).next;
            (*node).prev = self.head;
            (*self.head).next = node;
            (*(*node).next).prev = node;
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();

        // SAFETY: head and tail were allocated in `new` and are freed exactly once here
        unsafe {
            drop(Box::from_raw(self.head));
            drop(Box::from_raw(self.tail));
        }
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List").field("length", &self.len).finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub struct Iter<'a, T> {
    next: *mut Node<T>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        // SAFETY: `remaining` bounds the walk to value nodes; the list is
        // borrowed for 'a so none of them can be freed meanwhile
        unsafe {
            let node = self.next;
            self.next = (*node).next;
            self.remaining -= 1;
            Some((*node).value())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
