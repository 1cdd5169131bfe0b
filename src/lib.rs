#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod arena;
pub mod circular_list;
pub mod ordered_map;

extern crate alloc;

#[cfg(feature = "std")]
type RandomState = std::hash::RandomState;
#[cfg(not(feature = "std"))]
type RandomState = hashbrown::DefaultHashBuilder;

use core::num::NonZeroU32;

pub use circular_list::CircularList;
pub use circular_list::Nodes;
pub use circular_list::Values;

/// An insertion-ordered hash map using the default hasher.
///
/// This is the main map alias. For custom hashers, use
/// [`ordered_map::OrderedMap`] directly.
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
/// let entries: Vec<_> = map.iter().collect();
/// assert_eq!(entries, [(&"a", &1), (&"b", &2)]);
/// ```
pub type OrderedMap<K, V> = crate::ordered_map::OrderedMap<K, V, RandomState>;

/// A handle identifying one node of a [`CircularList`].
///
/// Handles are stable: inserting or removing *other* nodes never
/// invalidates them. They are **generational** — once the node they name
/// is removed (or the list is cleared), the handle becomes stale and every
/// read through it reports `None`, even if the underlying slot has been
/// reused for a new node.
///
/// A `NodeRef` is only meaningful with the list that produced it; handing
/// it to an unrelated list yields `None` or an arbitrary (but memory-safe)
/// node of that list.
///
/// # Examples
///
/// ```
/// use carousel::CircularList;
///
/// let mut list = CircularList::new();
/// let node = list.insert_before(None, 7);
/// assert_eq!(list.get(node), Some(&7));
///
/// list.remove(node);
/// assert_eq!(list.get(node), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef {
    slot: NonZeroU32,
    generation: u32,
}

impl core::fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "NodeRef({}v{})", self.slot.get() - 1, self.generation)
    }
}

impl NodeRef {
    pub(crate) fn unchecked_from(index: usize, generation: u32) -> Self {
        debug_assert!(
            index < u32::MAX as usize,
            "Index too large to fit in NodeRef: {index}"
        );
        NodeRef {
            slot: NonZeroU32::new((index as u32).saturating_add(1)).unwrap(),
            generation,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.slot.get() as usize - 1
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}
