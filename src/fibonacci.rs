//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, decrease_key, and union of root lists
//! - O(log n) amortized delete_min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list and the heap caches the minimum root.
//! Restructuring is deferred to `delete_min`, which consolidates the roots so
//! that no two share a degree. `decrease_key` cuts a node loose instead of
//! bubbling it, and a per-node mark bounds how many children a node may lose
//! before it is cut as well (cascading cut). That discipline keeps a node of
//! degree d at the root of at least F(d+2) nodes, so degrees stay O(log n).

use crate::traits::{next_heap_id, DecreaseKeyHeap, Handle, Heap, HeapError};
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use smallvec::SmallVec;

const PHI: f64 = 1.618_033_988_749_895;

new_key_type! {
    /// Arena key of a heap node
    struct NodeKey;
}

/// Handle to an element in a Fibonacci heap
///
/// Nodes never exchange contents, so the handle names the node directly.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    heap: u64,
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

struct Node<T, P> {
    item: T,
    priority: P,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    left: NodeKey,
    right: NodeKey,
    degree: usize,
    /// Lost a child since it last became a child itself
    marked: bool,
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use dijkstra_heaps::fibonacci::FibonacciHeap;
/// use dijkstra_heaps::{DecreaseKeyHeap, Heap};
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(5, "item");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.peek(), Some((&1, &"item")));
/// ```
pub struct FibonacciHeap<T, P: Ord> {
    nodes: SlotMap<NodeKey, Node<T, P>>,
    min: Option<NodeKey>,
    id: u64,
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> Heap<T, P> for FibonacciHeap<T, P> {
    fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            min: None,
            id: next_heap_id(),
        }
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, priority: P, item: T) {
        self.push_with_handle(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        let node = &self.nodes[self.min?];
        Some((&node.priority, &node.item))
    }

    /// Removes and returns the minimum element
    ///
    /// The children of the minimum join the root list, the minimum leaves
    /// it, and if any roots remain they are consolidated.
    fn pop(&mut self) -> Option<(P, T)> {
        let z = self.min?;

        let mut child = self.nodes[z].child;
        while let Some(c) = child {
            let next = self.nodes[c].right;
            self.unlink(c);
            child = (next != c).then_some(next);
            let node = &mut self.nodes[c];
            node.parent = None;
            node.marked = false;
            self.splice_root(c);
        }

        let right = self.nodes[z].right;
        self.unlink(z);
        self.min = None;
        if right != z {
            self.consolidate(right);
        }

        let node = self.nodes.remove(z).expect("min belongs to this heap");
        Some((node.priority, node.item))
    }

    /// Merges another heap into this one
    ///
    /// The other heap's nodes are moved into this arena (O(m)); splicing the
    /// two circular root lists is then O(1).
    fn merge(&mut self, other: Self) {
        let FibonacciHeap { nodes, min, .. } = other;
        let Some(other_min) = min else {
            return;
        };

        let mut remap: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::with_capacity(nodes.len());
        let mut moved = Vec::with_capacity(nodes.len());
        for (old, node) in nodes {
            let new = self.nodes.insert(node);
            remap.insert(old, new);
            moved.push(new);
        }
        for key in moved {
            let node = &mut self.nodes[key];
            node.parent = node.parent.map(|k| remap[k]);
            node.child = node.child.map(|k| remap[k]);
            node.left = remap[node.left];
            node.right = remap[node.right];
        }

        let other_min = remap[other_min];
        match self.min {
            None => self.min = Some(other_min),
            Some(self_min) => {
                let self_left = self.nodes[self_min].left;
                let other_left = self.nodes[other_min].left;
                self.nodes[self_left].right = other_min;
                self.nodes[other_min].left = self_left;
                self.nodes[other_left].right = self_min;
                self.nodes[self_min].left = other_left;

                if self.nodes[other_min].priority < self.nodes[self_min].priority {
                    self.min = Some(other_min);
                }
            }
        }
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for FibonacciHeap<T, P> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        let node = self.nodes.insert_with_key(|key| Node {
            item,
            priority,
            parent: None,
            child: None,
            left: key,
            right: key,
            degree: 0,
            marked: false,
        });
        self.splice_root(node);

        FibonacciHandle {
            heap: self.id,
            node,
        }
    }

    /// Decreases the priority of an element
    ///
    /// A root only needs the min pointer checked. A child whose new priority
    /// breaks heap order is cut into the root list, and its former parent is
    /// handed to `cascading_cut`.
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        let node = self.resolve(handle)?;
        if new_priority > self.nodes[node].priority {
            return Err(HeapError::PriorityIncreased);
        }

        self.nodes[node].priority = new_priority;

        if let Some(parent) = self.nodes[node].parent {
            if self.nodes[node].priority < self.nodes[parent].priority {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if self.nodes[node].priority < self.nodes[min].priority {
                self.min = Some(node);
            }
        }

        Ok(())
    }

    /// Deletes an element by moving it to the root list and popping it as
    /// if its priority were negative infinity
    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError> {
        let node = self.resolve(handle)?;
        if let Some(parent) = self.nodes[node].parent {
            self.cut(node, parent);
            self.cascading_cut(parent);
        }
        self.min = Some(node);
        self.pop().ok_or(HeapError::InvalidHandle)
    }

    fn get(&self, handle: &Self::Handle) -> Option<(&P, &T)> {
        let node = &self.nodes[self.resolve(handle).ok()?];
        Some((&node.priority, &node.item))
    }

    /// Traverses every circular list with an explicit stack
    fn find(&self, item: &T) -> Option<Self::Handle>
    where
        T: PartialEq,
    {
        let mut stack: Vec<NodeKey> = self.min.into_iter().collect();

        while let Some(start) = stack.pop() {
            let mut key = start;
            loop {
                let node = &self.nodes[key];
                if node.item == *item {
                    return Some(FibonacciHandle {
                        heap: self.id,
                        node: key,
                    });
                }
                stack.extend(node.child);
                key = node.right;
                if key == start {
                    break;
                }
            }
        }

        None
    }
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        if handle.heap == self.id && self.nodes.contains_key(handle.node) {
            Ok(handle.node)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    /// Removes a node from whatever circular list it is in, leaving it a singleton
    fn unlink(&mut self, key: NodeKey) {
        let (left, right) = (self.nodes[key].left, self.nodes[key].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        let node = &mut self.nodes[key];
        node.left = key;
        node.right = key;
    }

    /// Splices a singleton node into the root list to the left of `min`
    fn splice_root(&mut self, key: NodeKey) {
        match self.min {
            None => self.min = Some(key),
            Some(min) => {
                let min_left = self.nodes[min].left;
                self.nodes[key].right = min;
                self.nodes[key].left = min_left;
                self.nodes[min_left].right = key;
                self.nodes[min].left = key;

                if self.nodes[key].priority < self.nodes[min].priority {
                    self.min = Some(key);
                }
            }
        }
    }

    /// Makes root `child` a child of root `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        self.unlink(child);
        {
            let node = &mut self.nodes[child];
            node.parent = Some(parent);
            node.marked = false;
        }

        match self.nodes[parent].child {
            Some(first) => {
                let first_left = self.nodes[first].left;
                self.nodes[child].right = first;
                self.nodes[child].left = first_left;
                self.nodes[first_left].right = child;
                self.nodes[first].left = child;
            }
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[parent].degree += 1;
    }

    /// Links roots of equal degree until every degree is unique, then
    /// rebuilds the root list from the degree table and finds the new min
    ///
    /// `start` is any remaining root; `self.min` must be `None` on entry.
    fn consolidate(&mut self, start: NodeKey) {
        // Max degree is bounded by log_φ(n)
        let bound = (self.nodes.len() as f64).ln() / PHI.ln();
        let mut by_degree: SmallVec<[Option<NodeKey>; 32]> =
            SmallVec::from_elem(None, bound as usize + 2);

        let mut roots = vec![start];
        let mut key = self.nodes[start].right;
        while key != start {
            roots.push(key);
            key = self.nodes[key].right;
        }

        for root in roots {
            let mut x = root;
            let mut degree = self.nodes[x].degree;

            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                let Some(mut y) = by_degree[degree].take() else {
                    break;
                };
                // Ties keep the root seen first as parent
                if self.nodes[y].priority <= self.nodes[x].priority {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                degree += 1;
            }

            by_degree[degree] = Some(x);
        }

        for root in by_degree.into_iter().flatten() {
            self.unlink(root);
            self.splice_root(root);
        }
    }

    /// Cuts `node` from `parent` and moves it to the root list
    fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        let right = self.nodes[node].right;
        if self.nodes[parent].child == Some(node) {
            self.nodes[parent].child = (right != node).then_some(right);
        }
        self.unlink(node);
        self.nodes[parent].degree -= 1;

        {
            let n = &mut self.nodes[node];
            n.parent = None;
            n.marked = false;
        }
        self.splice_root(node);
    }

    /// Walks up from a node that just lost a child
    ///
    /// An unmarked non-root gets marked and the walk stops. A marked one is
    /// cut and the walk continues at its parent. Roots end the walk.
    fn cascading_cut(&mut self, mut node: NodeKey) {
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                return;
            }
            self.cut(node, parent);
            node = parent;
        }
    }
}
