use core::iter::FusedIterator;

use crate::circular_list;
use crate::CircularList;
use crate::NodeRef;

use super::Entry;

/// An iterator over the entries of an
/// [`OrderedMap`](super::OrderedMap), in insertion order.
///
/// Created by [`OrderedMap::iter`](super::OrderedMap::iter).
///
/// # Examples
///
/// ```
/// use carousel::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// for (key, value) in map.iter() {
///     println!("{key}: {value}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    inner: circular_list::Values<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(inner: circular_list::Values<'a, Entry<K, V>>, remaining: usize) -> Self {
        Iter { inner, remaining }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over the keys of an [`OrderedMap`](super::OrderedMap), in
/// insertion order.
///
/// Created by [`OrderedMap::keys`](super::OrderedMap::keys).
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(iter: Iter<'a, K, V>) -> Self {
        Keys { iter }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of an [`OrderedMap`](super::OrderedMap),
/// in insertion order.
///
/// Created by [`OrderedMap::values`](super::OrderedMap::values).
#[derive(Debug, Clone)]
pub struct Values<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(iter: Iter<'a, K, V>) -> Self {
        Values { iter }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// An owning iterator over the entries of an
/// [`OrderedMap`](super::OrderedMap), in insertion order.
///
/// Created by the [`IntoIterator`] impl on
/// [`OrderedMap`](super::OrderedMap).
///
/// # Examples
///
/// ```
/// use carousel::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// let entries: Vec<_> = map.into_iter().collect();
/// assert_eq!(entries, [("a", 1), ("b", 2)]);
/// ```
#[derive(Debug, Clone)]
pub struct IntoIter<K, V> {
    entries: CircularList<Entry<K, V>>,
    head: Option<NodeRef>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(entries: CircularList<Entry<K, V>>, head: Option<NodeRef>) -> Self {
        IntoIter { entries, head }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.head?;
        let successor = self.entries.next(head);
        let (entry, _) = self.entries.remove(head);
        self.head = successor.filter(|&node| node != head);
        Some((entry.key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.entries.len(), Some(self.entries.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
