//! Binomial Heap implementation
//!
//! A binomial heap is a collection of binomial trees with:
//! - O(log n) insert and delete_min
//! - O(log n) decrease_key
//! - O(log n) merge of root lists
//!
//! # Algorithm Overview
//!
//! A binomial heap maintains a forest of binomial trees, where:
//! - Each tree satisfies the min-heap property
//! - The roots form a single list sorted by strictly increasing degree
//! - At most one tree of each degree exists after every union
//!
//! **Binomial Tree Bₖ**: Recursively defined:
//! - B₀ is a single node
//! - Bₖ is formed by linking two B_{k-1} trees, one becoming the leftmost
//!   child of the other
//! - Bₖ has exactly 2ᵏ nodes and its root has children of degree k-1, ..., 0
//!
//! **Key Operations**:
//! - **Insert**: union with a one-node root list
//! - **Find-min**: linear scan of the O(log n) roots
//! - **Delete-min**: unlink the minimum root, reverse its child list and union
//!   it back in
//! - **Decrease-key**: bubble the element up by swapping contents with its parent
//!
//! # Storage
//!
//! Nodes live in a [`SlotMap`] arena and link to each other through
//! generational keys. Because decrease-key moves *contents* between nodes, a
//! handle does not name a node directly: it names an entry in a second arena
//! that always records which node currently holds the element. Every content
//! swap updates the two entries involved, so handles follow their element.

use crate::traits::{next_heap_id, DecreaseKeyHeap, Handle, Heap, HeapError};
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use std::mem;

new_key_type! {
    /// Arena key of a heap node
    struct NodeKey;
    /// Arena key of a handle entry
    struct EntryKey;
}

/// Handle to an element in a Binomial heap
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BinomialHandle {
    heap: u64,
    entry: EntryKey,
}

impl Handle for BinomialHandle {}

/// Internal node structure for binomial heap
///
/// - `parent`: None for roots
/// - `child`: leftmost child, the one with the highest degree
/// - `sibling`: next root in the root list, or next child in the parent's child list
/// - `degree`: number of children
struct Node<T, P> {
    item: T,
    priority: P,
    entry: EntryKey,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    sibling: Option<NodeKey>,
    degree: usize,
}

/// Binomial Heap
///
/// # Example
///
/// ```rust
/// use dijkstra_heaps::binomial::BinomialHeap;
/// use dijkstra_heaps::{DecreaseKeyHeap, Heap};
///
/// let mut heap = BinomialHeap::new();
/// let handle = heap.push_with_handle(5, "item");
/// heap.push(3, "other");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.peek(), Some((&1, &"item")));
/// ```
pub struct BinomialHeap<T, P: Ord> {
    nodes: SlotMap<NodeKey, Node<T, P>>,
    entries: SlotMap<EntryKey, NodeKey>,
    /// First root of the root list (lowest degree)
    head: Option<NodeKey>,
    id: u64,
}

impl<T, P: Ord> Default for BinomialHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> Heap<T, P> for BinomialHeap<T, P> {
    fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            entries: SlotMap::with_key(),
            head: None,
            id: next_heap_id(),
        }
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, priority: P, item: T) {
        self.push_with_handle(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        let node = &self.nodes[self.find_min_root()?];
        Some((&node.priority, &node.item))
    }

    /// Removes and returns the minimum element
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// **Algorithm**:
    /// 1. Scan the root list for the minimum root
    /// 2. Unlink it from the root list
    /// 3. Its children are B_{k-1}, ..., B₀ from left to right; reversing the
    ///    list gives a valid root list in increasing degree order
    /// 4. Union that list back into the heap
    fn pop(&mut self) -> Option<(P, T)> {
        let min = self.find_min_root()?;
        Some(self.remove_root(min))
    }

    /// Merges another heap into this heap
    ///
    /// **Time Complexity**: O(m) to move the other heap's m nodes into this
    /// arena, plus O(log n) for the union of the root lists.
    fn merge(&mut self, other: Self) {
        if other.is_empty() {
            return;
        }

        let BinomialHeap { nodes, head, .. } = other;
        let mut remap: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::with_capacity(nodes.len());
        let mut moved = Vec::with_capacity(nodes.len());

        for (old, node) in nodes {
            let entry = self.entries.insert(NodeKey::default());
            let new = self.nodes.insert(Node { entry, ..node });
            self.entries[entry] = new;
            remap.insert(old, new);
            moved.push(new);
        }

        // Links still point into the donor's arena
        for key in moved {
            let node = &mut self.nodes[key];
            node.parent = node.parent.map(|k| remap[k]);
            node.child = node.child.map(|k| remap[k]);
            node.sibling = node.sibling.map(|k| remap[k]);
        }

        self.union_roots(head.map(|k| remap[k]));
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for BinomialHeap<T, P> {
    type Handle = BinomialHandle;

    /// Inserts a new element into the heap
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// The new node forms a one-node root list that is unioned in, which is
    /// binary addition of 1 to the degree pattern of the root list.
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        let entry = self.entries.insert(NodeKey::default());
        let node = self.nodes.insert(Node {
            item,
            priority,
            entry,
            parent: None,
            child: None,
            sibling: None,
            degree: 0,
        });
        self.entries[entry] = node;

        self.union_roots(Some(node));

        BinomialHandle {
            heap: self.id,
            entry,
        }
    }

    /// Decreases the priority of an element
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// Binomial heaps bubble up instead of cutting: while the node is smaller
    /// than its parent, the `(item, priority)` contents of the two nodes are
    /// swapped. The tree shape never changes.
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        let node = self.resolve(handle)?;
        if new_priority > self.nodes[node].priority {
            return Err(HeapError::PriorityIncreased);
        }

        self.nodes[node].priority = new_priority;
        self.sift_up(node, false);
        Ok(())
    }

    /// Deletes an element by bubbling it to the root of its tree and
    /// removing that root
    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError> {
        let node = self.resolve(handle)?;
        let root = self.sift_up(node, true);
        Ok(self.remove_root(root))
    }

    fn get(&self, handle: &Self::Handle) -> Option<(&P, &T)> {
        let node = &self.nodes[self.resolve(handle).ok()?];
        Some((&node.priority, &node.item))
    }

    /// Depth-first search through child and sibling links
    fn find(&self, item: &T) -> Option<Self::Handle>
    where
        T: PartialEq,
    {
        let mut stack: Vec<NodeKey> = self.head.into_iter().collect();

        while let Some(key) = stack.pop() {
            let node = &self.nodes[key];
            if node.item == *item {
                return Some(BinomialHandle {
                    heap: self.id,
                    entry: node.entry,
                });
            }
            stack.extend(node.sibling);
            stack.extend(node.child);
        }

        None
    }
}

impl<T, P: Ord> BinomialHeap<T, P> {
    /// Degrees of the roots in root-list order
    ///
    /// Strictly increasing whenever the heap is observed from outside.
    pub fn root_degrees(&self) -> Vec<usize> {
        self.roots().map(|key| self.nodes[key].degree).collect()
    }

    fn roots(&self) -> impl Iterator<Item = NodeKey> + '_ {
        std::iter::successors(self.head, move |&key| self.nodes[key].sibling)
    }

    fn resolve(&self, handle: &BinomialHandle) -> Result<NodeKey, HeapError> {
        if handle.heap != self.id {
            return Err(HeapError::InvalidHandle);
        }
        self.entries
            .get(handle.entry)
            .copied()
            .ok_or(HeapError::InvalidHandle)
    }

    /// Linear scan of the root list; the first of equal minima wins
    fn find_min_root(&self) -> Option<NodeKey> {
        let mut best: Option<NodeKey> = None;
        for key in self.roots() {
            match best {
                Some(b) if self.nodes[key].priority >= self.nodes[b].priority => {}
                _ => best = Some(key),
            }
        }
        best
    }

    /// Links two roots of equal degree: `child` becomes the leftmost child of `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        let first_child = self.nodes[parent].child;
        {
            let node = &mut self.nodes[child];
            node.parent = Some(parent);
            node.sibling = first_child;
        }
        let node = &mut self.nodes[parent];
        node.child = Some(child);
        node.degree += 1;
    }

    /// Splices two root lists into one sorted by non-decreasing degree
    ///
    /// Pure list merge: equal degrees are left adjacent for `union_roots`.
    fn merge_root_lists(&mut self, a: Option<NodeKey>, b: Option<NodeKey>) -> Option<NodeKey> {
        let (mut a, mut b) = (a, b);
        let mut head: Option<NodeKey> = None;
        let mut tail: Option<NodeKey> = None;

        loop {
            let next = match (a, b) {
                (Some(x), Some(y)) => {
                    if self.nodes[x].degree <= self.nodes[y].degree {
                        a = self.nodes[x].sibling;
                        x
                    } else {
                        b = self.nodes[y].sibling;
                        y
                    }
                }
                (Some(rest), None) | (None, Some(rest)) => {
                    match tail {
                        Some(t) => self.nodes[t].sibling = Some(rest),
                        None => head = Some(rest),
                    }
                    return head;
                }
                (None, None) => return head,
            };

            match tail {
                Some(t) => self.nodes[t].sibling = Some(next),
                None => head = Some(next),
            }
            tail = Some(next);
        }
    }

    /// Merges `other` into the root list, then links equal-degree neighbours
    ///
    /// One left-to-right sweep suffices: after the merge degrees are sorted,
    /// so at most three roots of one degree can meet (two from the lists and
    /// one carried from the previous degree). When three are adjacent the
    /// first is skipped and the later two are linked.
    fn union_roots(&mut self, other: Option<NodeKey>) {
        self.head = self.merge_root_lists(self.head, other);

        let Some(mut x) = self.head else {
            return;
        };
        let mut prev: Option<NodeKey> = None;
        let mut next = self.nodes[x].sibling;

        while let Some(nx) = next {
            let degree = self.nodes[x].degree;
            let after = self.nodes[nx].sibling;
            let three_in_a_row = after.is_some_and(|k| self.nodes[k].degree == degree);

            if self.nodes[nx].degree != degree || three_in_a_row {
                prev = Some(x);
                x = nx;
            } else if self.nodes[x].priority <= self.nodes[nx].priority {
                self.nodes[x].sibling = after;
                self.link(nx, x);
            } else {
                match prev {
                    Some(p) => self.nodes[p].sibling = Some(nx),
                    None => self.head = Some(nx),
                }
                self.link(x, nx);
                x = nx;
            }

            next = self.nodes[x].sibling;
        }
    }

    /// Removes a root from the root list and unions its children back in
    fn remove_root(&mut self, root: NodeKey) -> (P, T) {
        let after = self.nodes[root].sibling;
        if self.head == Some(root) {
            self.head = after;
        } else {
            let mut cur = self.head;
            while let Some(key) = cur {
                if self.nodes[key].sibling == Some(root) {
                    self.nodes[key].sibling = after;
                    break;
                }
                cur = self.nodes[key].sibling;
            }
        }

        // Children run from highest to lowest degree; the root list needs the reverse
        let mut reversed: Option<NodeKey> = None;
        let mut cur = self.nodes[root].child;
        while let Some(key) = cur {
            let node = &mut self.nodes[key];
            cur = node.sibling;
            node.parent = None;
            node.sibling = reversed;
            reversed = Some(key);
        }

        let node = self.nodes.remove(root).expect("root belongs to this heap");
        self.entries.remove(node.entry);
        self.union_roots(reversed);

        (node.priority, node.item)
    }

    /// Bubbles the contents of `node` upward
    ///
    /// Stops once the parent is not larger, unless `to_root` is set, in which
    /// case the contents travel all the way to the tree root. Returns the
    /// node now holding the contents.
    fn sift_up(&mut self, mut node: NodeKey, to_root: bool) -> NodeKey {
        while let Some(parent) = self.nodes[node].parent {
            if !to_root && self.nodes[node].priority >= self.nodes[parent].priority {
                break;
            }
            self.swap_contents(node, parent);
            node = parent;
        }
        node
    }

    /// Swaps item, priority and handle entry of two nodes
    fn swap_contents(&mut self, a: NodeKey, b: NodeKey) {
        if let Some([x, y]) = self.nodes.get_disjoint_mut([a, b]) {
            mem::swap(&mut x.item, &mut y.item);
            mem::swap(&mut x.priority, &mut y.priority);
            mem::swap(&mut x.entry, &mut y.entry);
            self.entries[x.entry] = a;
            self.entries[y.entry] = b;
        }
    }
}
