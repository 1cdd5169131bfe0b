use core::iter::FusedIterator;

use crate::CircularList;
use crate::NodeRef;

/// An iterator over the [`NodeRef`]s of one ring of a [`CircularList`].
///
/// Created by [`CircularList::iter`] and [`CircularList::iter_backward`].
/// Yields the starting node first, then each neighbor in turn, exactly
/// once around the cycle. Does no work beyond what the consumer pulls.
///
/// # Examples
///
/// ```
/// use carousel::CircularList;
///
/// let (list, anchor) = CircularList::from_values([1, 2, 3]);
/// for node in list.iter(anchor) {
///     println!("{:?} = {}", node, list.get(node).unwrap());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Nodes<'a, T> {
    pub(crate) list: &'a CircularList<T>,
    cursor: Option<NodeRef>,
    start: NodeRef,
    backward: bool,
}

impl<'a, T> Nodes<'a, T> {
    pub(crate) fn new(list: &'a CircularList<T>, start: Option<NodeRef>, backward: bool) -> Self {
        // A stale starting handle degrades to the empty iterator; reads
        // never panic.
        let cursor = start.filter(|&node| list.contains(node));
        Nodes {
            list,
            cursor,
            start: cursor.unwrap_or_else(|| NodeRef::unchecked_from(0, 0)),
            backward,
        }
    }
}

impl<T> Iterator for Nodes<'_, T> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        let step = if self.backward {
            self.list.prev(current)
        } else {
            self.list.next(current)
        };
        self.cursor = match step {
            Some(node) if node != self.start => Some(node),
            _ => None,
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Some(_) => (1, Some(self.list.len())),
            None => (0, Some(0)),
        }
    }
}

impl<T> FusedIterator for Nodes<'_, T> {}

/// An iterator over the values of one ring of a [`CircularList`].
///
/// Created by [`CircularList::values`] and
/// [`CircularList::values_backward`].
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
#[derive(Debug, Clone)]
pub struct Values<'a, T> {
    nodes: Nodes<'a, T>,
}

impl<'a, T> Values<'a, T> {
    pub(crate) fn new(nodes: Nodes<'a, T>) -> Self {
        Values { nodes }
    }
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.next()?;
        self.nodes.list.get(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<T> FusedIterator for Values<'_, T> {}
