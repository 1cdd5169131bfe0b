//! Circular doubly-linked list implementation.
//!
//! This module provides the core [`CircularList`] type. Nodes form a
//! cycle: every node's `next` chain eventually leads back to itself, and
//! any node's [`NodeRef`] is a valid entry point into the whole structure.
//! There is no distinguished head — the empty list is simply the absence
//! of an anchor (`None`).
//!
//! Nodes are stored in a generational arena, so a `NodeRef` stays valid
//! across unrelated insertions and removals, and becomes *detectably*
//! stale when its own node is removed.
//!
//! # Examples
//!
//! ```
//! use carousel::CircularList;
//!
//! let (list, anchor) = CircularList::from_values(["a", "b", "c"]);
//! let values: Vec<_> = list.values(anchor).copied().collect();
//! assert_eq!(values, ["a", "b", "c"]);
//! ```

mod iter;

pub use iter::Nodes;
pub use iter::Values;

use crate::arena::stale_node_ref;
use crate::arena::Arena;
use crate::arena::Node;
use crate::NodeRef;

/// A circular doubly-linked list addressed by stable [`NodeRef`] handles.
///
/// The container owns the storage; positions within it are named by
/// `NodeRef`s that callers hold on to. An absent anchor
/// (`None::<NodeRef>`) denotes an empty ring and is accepted everywhere a
/// possibly-empty list makes sense, so a freshly created list needs no
/// special-casing:
///
/// ```
/// use carousel::CircularList;
///
/// let mut list = CircularList::new();
/// let a = list.insert_before(None, 1); // ring of one
/// list.insert_after(Some(a), 2); // ring of two
/// assert_eq!(list.values(Some(a)).copied().collect::<Vec<_>>(), [1, 2]);
/// ```
///
/// One list may hold several independent rings: inserting with a `None`
/// anchor while other nodes exist starts a fresh ring that shares the
/// arena but not the cycle. Traversal only ever visits the ring its
/// starting node belongs to.
///
/// Every operation is O(1) except the bulk splices, traversal, and
/// [`clear`](CircularList::clear), which are linear.
#[derive(Debug, Clone)]
pub struct CircularList<T> {
    nodes: Arena<T>,
}

impl<T> Default for CircularList<T> {
    fn default() -> Self {
        CircularList::new()
    }
}

impl<T> CircularList<T> {
    /// Creates a new, empty list.
    ///
    /// Does not allocate until the first insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let list: CircularList<i32> = CircularList::new();
    /// assert!(list.is_empty());
    /// ```
    pub fn new() -> Self {
        CircularList {
            nodes: Arena::new(),
        }
    }

    /// Creates a new, empty list with space for at least `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        CircularList {
            nodes: Arena::with_capacity(capacity),
        }
    }

    /// Creates a list containing `values` as one ring, in order, and
    /// returns it along with the ring's anchor (the node holding the
    /// first value, or `None` when `values` is empty).
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let (list, anchor) = CircularList::from_values([1, 2, 3]);
    /// assert_eq!(list.len(), 3);
    /// assert_eq!(list.get(anchor.unwrap()), Some(&1));
    /// ```
    pub fn from_values(values: impl IntoIterator<Item = T>) -> (Self, Option<NodeRef>) {
        let mut list = CircularList::new();
        let anchor = list.splice_before(None, values);
        (list, anchor)
    }

    /// Returns the number of live nodes, across all rings.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }

    /// Returns `true` if `node` refers to a live node of this list.
    ///
    /// A handle stops being live when its node is removed or the list is
    /// cleared; slot reuse cannot revive it.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let mut list = CircularList::new();
    /// let node = list.insert_before(None, 1);
    /// assert!(list.contains(node));
    ///
    /// list.remove(node);
    /// assert!(!list.contains(node));
    /// ```
    pub fn contains(&self, node: NodeRef) -> bool {
        self.nodes.is_occupied(node)
    }

    /// Returns the value stored at `node`, or `None` if the handle is
    /// stale.
    pub fn get(&self, node: NodeRef) -> Option<&T> {
        self.nodes.get(node).map(|data| &data.value)
    }

    /// Returns a mutable reference to the value stored at `node`, or
    /// `None` if the handle is stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let mut list = CircularList::new();
    /// let node = list.insert_before(None, 1);
    /// *list.get_mut(node).unwrap() += 10;
    /// assert_eq!(list.get(node), Some(&11));
    /// ```
    pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut T> {
        self.nodes.get_mut(node).map(|data| &mut data.value)
    }

    /// Returns the node after `node` in its ring, or `None` if the
    /// handle is stale.
    ///
    /// In a ring of one, a node is its own successor.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let mut list = CircularList::new();
    /// let a = list.insert_before(None, "a");
    /// assert_eq!(list.next(a), Some(a));
    ///
    /// let b = list.insert_after(Some(a), "b");
    /// assert_eq!(list.next(a), Some(b));
    /// assert_eq!(list.next(b), Some(a));
    /// ```
    pub fn next(&self, node: NodeRef) -> Option<NodeRef> {
        self.nodes.get(node).map(|data| data.next)
    }

    /// Returns the node before `node` in its ring, or `None` if the
    /// handle is stale.
    ///
    /// In a ring of one, a node is its own predecessor.
    pub fn prev(&self, node: NodeRef) -> Option<NodeRef> {
        self.nodes.get(node).map(|data| data.prev)
    }

    /// Inserts `value` as a new node immediately before `anchor`, i.e.
    /// between `anchor`'s predecessor and `anchor`, and returns the new
    /// node's handle. With a `None` anchor the new node forms a ring of
    /// one (it is its own predecessor and successor).
    ///
    /// Existing handles, `anchor` included, stay valid.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is a stale handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let mut list = CircularList::new();
    /// let c = list.insert_before(None, "c");
    /// let a = list.insert_before(Some(c), "a");
    /// list.insert_before(Some(c), "b");
    ///
    /// let values: Vec<_> = list.values(Some(a)).copied().collect();
    /// assert_eq!(values, ["a", "b", "c"]);
    /// ```
    pub fn insert_before(&mut self, anchor: Option<NodeRef>, value: T) -> NodeRef {
        match anchor {
            Some(anchor) => {
                if !self.nodes.is_occupied(anchor) {
                    stale_node_ref();
                }
                let prev = self.nodes.node(anchor).prev;
                let node = self.nodes.alloc(value, prev, anchor);
                self.nodes.node_mut(anchor).prev = node;
                self.nodes.node_mut(prev).next = node;
                node
            }
            None => {
                let node = self.nodes.next_ref();
                self.nodes.alloc(value, node, node)
            }
        }
    }

    /// Inserts `value` as a new node immediately after `anchor` and
    /// returns the new node's handle. With a `None` anchor the new node
    /// forms a ring of one.
    ///
    /// Existing handles, `anchor` included, stay valid.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is a stale handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let mut list = CircularList::new();
    /// let a = list.insert_after(None, "a");
    /// list.insert_after(Some(a), "b");
    /// let values: Vec<_> = list.values(Some(a)).copied().collect();
    /// assert_eq!(values, ["a", "b"]);
    /// ```
    pub fn insert_after(&mut self, anchor: Option<NodeRef>, value: T) -> NodeRef {
        match anchor {
            Some(anchor) => {
                if !self.nodes.is_occupied(anchor) {
                    stale_node_ref();
                }
                let next = self.nodes.node(anchor).next;
                let node = self.nodes.alloc(value, anchor, next);
                self.nodes.node_mut(anchor).next = node;
                self.nodes.node_mut(next).prev = node;
                node
            }
            None => {
                let node = self.nodes.next_ref();
                self.nodes.alloc(value, node, node)
            }
        }
    }

    /// Removes `node` from its ring, returning its value and a
    /// replacement anchor: the node that was `node`'s predecessor, or
    /// `None` when `node` was the sole member of its ring (the ring is
    /// now empty).
    ///
    /// `node` (and every copy of it) is stale afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `node` is a stale handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let (mut list, anchor) = CircularList::from_values([1, 2, 3]);
    /// let a = anchor.unwrap();
    /// let b = list.next(a).unwrap();
    ///
    /// let (value, replacement) = list.remove(b);
    /// assert_eq!(value, 2);
    /// assert_eq!(replacement, Some(a));
    /// assert_eq!(list.values(Some(a)).copied().collect::<Vec<_>>(), [1, 3]);
    ///
    /// // Removing the last node of a ring reports emptiness.
    /// list.remove(list.next(a).unwrap());
    /// let (_, replacement) = list.remove(a);
    /// assert_eq!(replacement, None);
    /// assert!(list.is_empty());
    /// ```
    pub fn remove(&mut self, node: NodeRef) -> (T, Option<NodeRef>) {
        let Node { prev, next, value } = self.nodes.free(node);
        if prev == node {
            return (value, None);
        }
        self.nodes.node_mut(prev).next = next;
        self.nodes.node_mut(next).prev = prev;
        (value, Some(prev))
    }

    /// Inserts every value yielded by `values` before `anchor`,
    /// preserving their order, and returns the ring's anchor: `anchor`
    /// itself if it was `Some`, otherwise the node holding the first
    /// value, or `None` when both are absent.
    ///
    /// Equivalent to repeated [`insert_before`](Self::insert_before)
    /// calls.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is a stale handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let mut list = CircularList::new();
    /// let tail = list.insert_before(None, 99);
    /// list.splice_before(Some(tail), [1, 2, 3]);
    ///
    /// let values: Vec<_> = list.values(Some(tail)).copied().collect();
    /// assert_eq!(values, [99, 1, 2, 3]);
    /// ```
    pub fn splice_before(
        &mut self,
        anchor: Option<NodeRef>,
        values: impl IntoIterator<Item = T>,
    ) -> Option<NodeRef> {
        let mut anchor = anchor;
        for value in values {
            let node = self.insert_before(anchor, value);
            if anchor.is_none() {
                anchor = Some(node);
            }
        }
        anchor
    }

    /// Inserts every value yielded by `values` after `anchor`,
    /// preserving their order, and returns the ring's anchor: `anchor`
    /// itself if it was `Some`, otherwise the node holding the first
    /// value, or `None` when both are absent.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` is a stale handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let mut list = CircularList::new();
    /// let head = list.insert_before(None, 0);
    /// list.splice_after(Some(head), [1, 2, 3]);
    ///
    /// let values: Vec<_> = list.values(Some(head)).copied().collect();
    /// assert_eq!(values, [0, 1, 2, 3]);
    /// ```
    pub fn splice_after(
        &mut self,
        anchor: Option<NodeRef>,
        values: impl IntoIterator<Item = T>,
    ) -> Option<NodeRef> {
        let mut anchor = anchor;
        let mut tail = anchor;
        for value in values {
            let node = self.insert_after(tail, value);
            tail = Some(node);
            if anchor.is_none() {
                anchor = Some(node);
            }
        }
        anchor
    }

    /// Removes every node, invalidating all outstanding handles. Keeps
    /// the allocation for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let (mut list, anchor) = CircularList::from_values([1, 2, 3]);
    /// list.clear();
    /// assert!(list.is_empty());
    /// assert_eq!(list.get(anchor.unwrap()), None);
    /// ```
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Returns an iterator over the [`NodeRef`]s of `start`'s ring,
    /// beginning with `start` itself and following `next` links exactly
    /// once around.
    ///
    /// The iterator is lazy: stopping early costs nothing. A `None` or
    /// stale `start` yields an empty iterator.
    ///
    /// For most situations, [`values`](Self::values) is more convenient.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let (list, anchor) = CircularList::from_values([1, 2, 3]);
    /// assert_eq!(list.iter(anchor).count(), 3);
    ///
    /// // Starting elsewhere still visits every node exactly once.
    /// let second = list.next(anchor.unwrap());
    /// assert_eq!(list.iter(second).count(), 3);
    /// ```
    pub fn iter(&self, start: Option<NodeRef>) -> Nodes<'_, T> {
        Nodes::new(self, start, false)
    }

    /// Returns an iterator like [`iter`](Self::iter), but following
    /// `prev` links: `start` first, then its predecessor, and so on once
    /// around the ring.
    pub fn iter_backward(&self, start: Option<NodeRef>) -> Nodes<'_, T> {
        Nodes::new(self, start, true)
    }

    /// Returns an iterator over the values of `start`'s ring, in `next`
    /// order, beginning with `start`'s own value.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let (list, anchor) = CircularList::from_values(["a", "b", "c"]);
    /// let values: Vec<_> = list.values(anchor).copied().collect();
    /// assert_eq!(values, ["a", "b", "c"]);
    /// ```
    pub fn values(&self, start: Option<NodeRef>) -> Values<'_, T> {
        Values::new(self.iter(start))
    }

    /// Returns an iterator over the values of `start`'s ring, in `prev`
    /// order, beginning with `start`'s own value.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::CircularList;
    ///
    /// let (list, anchor) = CircularList::from_values(["a", "b", "c"]);
    /// let values: Vec<_> = list.values_backward(anchor).copied().collect();
    /// assert_eq!(values, ["a", "c", "b"]);
    /// ```
    pub fn values_backward(&self, start: Option<NodeRef>) -> Values<'_, T> {
        Values::new(self.iter_backward(start))
    }
}
