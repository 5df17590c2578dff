//! Common traits for mergeable heap data structures
//!
//! This module provides the two-tier trait hierarchy every heap in the crate
//! implements:
//!
//! - [`Heap`]: Base trait for push / peek / pop / merge
//! - [`DecreaseKeyHeap`]: Adds handle-based operations (`decrease_key`,
//!   `delete`, lookup by item) needed by Dijkstra's relaxation loop
//!
//! Both heaps are min-heaps storing `(priority, item)` pairs. In the
//! shortest-path engine the item is a vertex index and the priority is the
//! tentative distance.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Error type for heap operations
///
/// A failed operation never mutates the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The new priority is greater than the current priority
    PriorityIncreased,
    /// The handle is no longer valid (element was removed) or belongs to another heap
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::PriorityIncreased => {
                write!(f, "new priority is greater than current priority")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid for this heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for decrease_key and delete
///
/// Handles are small `Copy` values: an arena key plus the id of the heap
/// that issued it. A handle stays valid until its element is popped or
/// deleted. Handles issued by a heap that was merged into another one are
/// no longer valid.
pub trait Handle: Copy + PartialEq + Eq + fmt::Debug {}

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a process-unique id used to tag handles with their owning heap.
pub(crate) fn next_heap_id() -> u64 {
    NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed)
}

/// Base trait for heap/priority queue data structures
///
/// # Example
///
/// ```rust
/// use dijkstra_heaps::Heap;
/// use dijkstra_heaps::binomial::BinomialHeap;
///
/// let mut heap = BinomialHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    ///
    /// # Time Complexity
    /// O(1) for the Fibonacci heap, O(log n) root scan for the binomial heap.
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// # Time Complexity
    /// O(log n) (amortized for the Fibonacci heap).
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    ///
    /// Every node of `other` moves into this heap's arena, so handles issued
    /// by `other` are invalidated.
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use dijkstra_heaps::{DecreaseKeyHeap, Heap};
/// use dijkstra_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    ///
    /// # Time Complexity
    /// - Fibonacci Heap: O(1)
    /// - Binomial Heap: O(log n)
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Lowers the priority of the element identified by `handle`
    ///
    /// Setting the same priority again is accepted and changes nothing.
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the element is gone or the handle is foreign
    /// - `HeapError::PriorityIncreased` if `new_priority` is greater than the current one
    ///
    /// # Time Complexity
    /// - Fibonacci Heap: O(1) amortized
    /// - Binomial Heap: O(log n)
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;

    /// Removes the element identified by `handle`, returning it
    ///
    /// Behaves like lowering the priority to negative infinity followed by
    /// `pop`, without needing such a value in `P`.
    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError>;

    /// Returns the current priority and item of a live handle
    fn get(&self, handle: &Self::Handle) -> Option<(&P, &T)>;

    /// Finds the handle of an element by item, searching every tree
    ///
    /// # Time Complexity
    /// O(n). Callers that know their items ahead of time should keep the
    /// handles returned by `push_with_handle` instead.
    fn find(&self, item: &T) -> Option<Self::Handle>
    where
        T: PartialEq;
}
