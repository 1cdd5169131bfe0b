//! Insertion-ordered hash map implementation.
//!
//! This module provides the core [`OrderedMap`] type: a hash map whose
//! iteration order is the order in which keys were first inserted.
//! Updating the value of an existing key does not move it.
//!
//! The map is a thin composition of two parts: a
//! [`CircularList`](crate::CircularList) holding the entries as one ring
//! (the oldest entry is the ring anchor, the newest sits just before it),
//! and a [`hashbrown::HashTable`] mapping each key's hash to the
//! [`NodeRef`] of its entry. The map drives the list exclusively through
//! its public operations.
//!
//! # Examples
//!
//! ```
//! use carousel::ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert("first", 1);
//! map.insert("second", 2);
//!
//! // Iteration preserves insertion order
//! let entries: Vec<_> = map.iter().collect();
//! assert_eq!(entries, [(&"first", &1), (&"second", &2)]);
//! ```

mod iter;

pub use iter::IntoIter;
pub use iter::Iter;
pub use iter::Keys;
pub use iter::Values;

use core::hash::BuildHasher;
use core::hash::Hash;
use core::ops::Index;
use core::ops::IndexMut;

use hashbrown::HashTable;

use crate::CircularList;
use crate::NodeRef;
use crate::RandomState;

/// One key/value pair stored as the payload of a list node. The hash is
/// cached so the table can rehash on resize without touching `K`.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
}

/// A hash map that iterates in insertion order.
///
/// Lookup, insertion, and removal are O(1) average. Re-inserting an
/// existing key updates its value in place without changing its position;
/// a new key always lands at the end of the iteration order.
///
/// The generic parameters are:
/// - `K`: Key type, must implement `Hash + Eq`
/// - `V`: Value type, unconstrained
/// - `S`: Hash builder type, defaults to the standard hasher
///
/// # Examples
///
/// ```
/// use carousel::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("apple", 5);
/// map.insert("banana", 3);
/// map.insert("cherry", 8);
///
/// map.remove(&"banana");
/// let keys: Vec<_> = map.keys().collect();
/// assert_eq!(keys, [&"apple", &"cherry"]);
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V, S = RandomState> {
    entries: CircularList<Entry<K, V>>,
    table: HashTable<NodeRef>,
    head: Option<NodeRef>,
    hasher: S,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new, empty map.
    ///
    /// Does not allocate until the first insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// map.insert("key", 42);
    /// assert!(!map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new map with space for at least `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::default())
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    /// Creates a new, empty map using `hasher` to hash keys.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    /// Creates a new map with the given capacity and hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hashbrown::DefaultHashBuilder as RandomState;
    /// use carousel::ordered_map::OrderedMap;
    ///
    /// let hasher = RandomState::default();
    /// let mut map: OrderedMap<&str, i32, _> = OrderedMap::with_capacity_and_hasher(10, hasher);
    /// map.insert("key", 42);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        OrderedMap {
            entries: CircularList::with_capacity(capacity),
            table: HashTable::with_capacity(capacity),
            head: None,
            hasher,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Removes every entry. The map stays usable and keeps its
    /// allocations.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("a", 1);
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.keys().count(), 0);
    ///
    /// map.insert("b", 2);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn clear(&mut self) {
        self.entries.clear();
        self.table.clear();
        self.head = None;
    }

    /// Returns an iterator over `(&key, &value)` pairs in insertion
    /// order.
    ///
    /// The iterator is lazy; dropping it early does no extra work.
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
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.entries.values(self.head), self.len())
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> OrderedMap<K, V, S> {
    fn find_node(&self, hash: u64, key: &K) -> Option<NodeRef> {
        let entries = &self.entries;
        self.table
            .find(hash, |&node| {
                entries
                    .get(node)
                    .map_or(false, |entry| entry.hash == hash && entry.key == *key)
            })
            .copied()
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present.
    ///
    /// An existing key keeps its position in the iteration order; a new
    /// key is appended at the end (spliced into the entry ring just
    /// before the oldest entry).
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert("a", 1), None);
    /// assert_eq!(map.insert("b", 2), None);
    /// assert_eq!(map.insert("a", 3), Some(1));
    ///
    /// // "a" kept its original position.
    /// let keys: Vec<_> = map.keys().collect();
    /// assert_eq!(keys, [&"a", &"b"]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash_one(&key);
        if let Some(node) = self.find_node(hash, &key) {
            let Some(entry) = self.entries.get_mut(node) else {
                unreachable!("index and entry ring are kept in sync");
            };
            return Some(core::mem::replace(&mut entry.value, value));
        }

        let node = self
            .entries
            .insert_before(self.head, Entry { hash, key, value });
        if self.head.is_none() {
            self.head = Some(node);
        }
        let Self { entries, table, .. } = self;
        table.insert_unique(hash, node, |&n| {
            entries.get(n).map_or(0, |entry| entry.hash)
        });
        None
    }

    /// Returns a reference to the value associated with `key`.
    ///
    /// A missing key is reported as `None`, never as an error. Lookup
    /// does not affect iteration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("key", 42);
    /// assert_eq!(map.get(&"key"), Some(&42));
    /// assert_eq!(map.get(&"missing"), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hasher.hash_one(key);
        let node = self.find_node(hash, key)?;
        self.entries.get(node).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hasher.hash_one(key);
        let node = self.find_node(hash, key)?;
        self.entries.get_mut(node).map(|entry| &mut entry.value)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        let hash = self.hasher.hash_one(key);
        self.find_node(hash, key).is_some()
    }

    /// Removes `key` from the map, returning its value. A missing key is
    /// a no-op returning `None`.
    ///
    /// The surviving entries keep their relative order.
    ///
    /// # Examples
    ///
    /// ```
    /// use carousel::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("key", 42);
    /// assert_eq!(map.remove(&"key"), Some(42));
    /// assert_eq!(map.remove(&"key"), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` from the map, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hasher.hash_one(key);
        let entries = &self.entries;
        let node = match self.table.find_entry(hash, |&node| {
            entries
                .get(node)
                .map_or(false, |entry| entry.hash == hash && entry.key == *key)
        }) {
            Ok(occupied) => occupied.remove().0,
            Err(_) => return None,
        };

        // The successor has to be read before the node is unlinked; it is
        // the node itself exactly when the map is about to become empty.
        let successor = self.entries.next(node);
        let (entry, _) = self.entries.remove(node);
        if self.head == Some(node) {
            self.head = successor.filter(|&n| n != node);
        }
        Some((entry.key, entry.value))
    }
}

impl<K, V, S: BuildHasher + Default> Default for OrderedMap<K, V, S> {
    fn default() -> Self {
        OrderedMap::with_capacity_and_hasher(0, S::default())
    }
}

impl<K: core::fmt::Debug, V: core::fmt::Debug, S> core::fmt::Debug for OrderedMap<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V: PartialEq, S: BuildHasher> PartialEq for OrderedMap<K, V, S> {
    /// Order-sensitive equality: two maps are equal when they hold the
    /// same entries in the same iteration order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Hash + Eq, V: Eq, S: BuildHasher> Eq for OrderedMap<K, V, S> {}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for OrderedMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::default();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for OrderedMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K: Hash + Eq + Copy, V: Copy, S: BuildHasher> Extend<(&'a K, &'a V)>
    for OrderedMap<K, V, S>
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        for (&key, &value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Index<&K> for OrderedMap<K, V, S> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> IndexMut<&K> for OrderedMap<K, V, S> {
    /// # Panics
    ///
    /// Panics if the key is not present.
    fn index_mut(&mut self, key: &K) -> &mut V {
        self.get_mut(key).expect("no entry found for key")
    }
}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.entries, self.head)
    }
}
