use alloc::vec::Vec;
use core::panic;

use crate::NodeRef;

#[cold]
#[inline(never)]
pub(crate) fn stale_node_ref() -> ! {
    panic!("Stale NodeRef: the node it refers to has been removed");
}

/// One linked node. `prev`/`next` always refer to occupied slots of the
/// same arena whose generation matches, forming a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node<T> {
    pub(crate) prev: NodeRef,
    pub(crate) next: NodeRef,
    pub(crate) value: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState<T> {
    Free { next_free: Option<u32> },
    Occupied(Node<T>),
}

#[derive(Debug, Clone, Copy)]
struct Slot<T> {
    // Bumped every time the slot is freed. Wraps after u32::MAX removals
    // of the same slot, at which point a handle from 2^32 removals ago
    // would revalidate; accepted.
    generation: u32,
    state: SlotState<T>,
}

/// Slab of nodes addressed by generational [`NodeRef`] handles. Freed
/// slots are chained into a free list and reused by later allocations.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// The handle the next call to [`alloc`](Self::alloc) will return.
    pub(crate) fn next_ref(&self) -> NodeRef {
        match self.free_head {
            Some(index) => {
                NodeRef::unchecked_from(index as usize, self.slots[index as usize].generation)
            }
            None => NodeRef::unchecked_from(self.slots.len(), 0),
        }
    }

    pub(crate) fn alloc(&mut self, value: T, prev: NodeRef, next: NodeRef) -> NodeRef {
        self.len += 1;
        let node = Node { prev, next, value };
        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            match slot.state {
                SlotState::Free { next_free } => self.free_head = next_free,
                SlotState::Occupied(_) => unreachable!("free list points at occupied slot"),
            }
            slot.state = SlotState::Occupied(node);
            NodeRef::unchecked_from(index as usize, slot.generation)
        } else {
            let index = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                state: SlotState::Occupied(node),
            });
            NodeRef::unchecked_from(index, 0)
        }
    }

    pub(crate) fn is_occupied(&self, node: NodeRef) -> bool {
        match self.slots.get(node.index()) {
            Some(slot) => {
                slot.generation == node.generation() && matches!(slot.state, SlotState::Occupied(_))
            }
            None => false,
        }
    }

    pub(crate) fn get(&self, node: NodeRef) -> Option<&Node<T>> {
        let slot = self.slots.get(node.index())?;
        if slot.generation != node.generation() {
            return None;
        }
        match &slot.state {
            SlotState::Occupied(data) => Some(data),
            SlotState::Free { .. } => None,
        }
    }

    pub(crate) fn get_mut(&mut self, node: NodeRef) -> Option<&mut Node<T>> {
        let slot = self.slots.get_mut(node.index())?;
        if slot.generation != node.generation() {
            return None;
        }
        match &mut slot.state {
            SlotState::Occupied(data) => Some(data),
            SlotState::Free { .. } => None,
        }
    }

    /// Panicking accessor for handles already known to be live.
    pub(crate) fn node(&self, node: NodeRef) -> &Node<T> {
        match self.get(node) {
            Some(data) => data,
            None => stale_node_ref(),
        }
    }

    pub(crate) fn node_mut(&mut self, node: NodeRef) -> &mut Node<T> {
        match self.get_mut(node) {
            Some(data) => data,
            None => stale_node_ref(),
        }
    }

    /// Frees the slot, returning its node. The slot's generation is
    /// bumped so `node` (and every copy of it) is stale afterwards.
    pub(crate) fn free(&mut self, node: NodeRef) -> Node<T> {
        if !self.is_occupied(node) {
            stale_node_ref();
        }
        let index = node.index();
        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        let state = core::mem::replace(
            &mut slot.state,
            SlotState::Free {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(index as u32);
        self.len -= 1;
        match state {
            SlotState::Occupied(data) => data,
            SlotState::Free { .. } => unreachable!("occupancy checked above"),
        }
    }

    /// Frees every occupied slot without touching links, bumping each
    /// generation so outstanding handles cannot revalidate against
    /// whatever reuses the slots. Keeps the allocation.
    pub(crate) fn clear(&mut self) {
        self.free_head = None;
        self.len = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if matches!(slot.state, SlotState::Occupied(_)) {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.state = SlotState::Free {
                next_free: self.free_head,
            };
            self.free_head = Some(index as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::assert_eq;

    use super::*;

    fn null() -> NodeRef {
        NodeRef::unchecked_from(u32::MAX as usize - 1, u32::MAX)
    }

    #[test]
    fn test_node_ref_round_trip() {
        let node = NodeRef::unchecked_from(42, 7);
        assert_eq!(node.index(), 42);
        assert_eq!(node.generation(), 7);
    }

    #[test]
    fn test_node_ref_debug() {
        let node = NodeRef::unchecked_from(42, 0);
        assert_eq!(alloc::format!("{:?}", node), "NodeRef(42v0)");
    }

    #[test]
    fn test_node_ref_equality() {
        let a = NodeRef::unchecked_from(42, 0);
        let b = NodeRef::unchecked_from(42, 0);
        let c = NodeRef::unchecked_from(42, 1);
        let d = NodeRef::unchecked_from(43, 0);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_arena_new() {
        let arena: Arena<i32> = Arena::new();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.free_head, None);
    }

    #[test]
    fn test_arena_with_capacity() {
        let arena: Arena<i32> = Arena::with_capacity(10);
        assert_eq!(arena.slots.capacity(), 10);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn test_arena_alloc_single() {
        let mut arena = Arena::new();
        let node = arena.alloc("hello".to_string(), null(), null());

        assert!(arena.is_occupied(node));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.node(node).value, "hello");
    }

    #[test]
    fn test_arena_alloc_multiple() {
        let mut arena = Arena::new();
        let a = arena.alloc(1, null(), null());
        let b = arena.alloc(2, null(), null());
        let c = arena.alloc(3, null(), null());

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.node(a).value, 1);
        assert_eq!(arena.node(b).value, 2);
        assert_eq!(arena.node(c).value, 3);
    }

    #[test]
    fn test_arena_next_ref_predicts_alloc() {
        let mut arena = Arena::new();
        let predicted = arena.next_ref();
        let actual = arena.alloc(1, null(), null());
        assert_eq!(predicted, actual);

        arena.free(actual);
        let predicted = arena.next_ref();
        let actual = arena.alloc(2, null(), null());
        assert_eq!(predicted, actual);
    }

    #[test]
    fn test_arena_free_invalidates_handle() {
        let mut arena = Arena::new();
        let node = arena.alloc(1, null(), null());

        let data = arena.free(node);
        assert_eq!(data.value, 1);
        assert_eq!(arena.len(), 0);
        assert!(!arena.is_occupied(node));
        assert_eq!(arena.get(node), None);
    }

    #[test]
    fn test_arena_reuse_bumps_generation() {
        let mut arena = Arena::new();
        let old = arena.alloc(1, null(), null());
        arena.free(old);

        let new = arena.alloc(2, null(), null());
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());

        // The stale handle must not see the new occupant.
        assert_eq!(arena.get(old), None);
        assert_eq!(arena.node(new).value, 2);
    }

    #[test]
    fn test_arena_free_list_order() {
        let mut arena = Arena::new();
        let a = arena.alloc(1, null(), null());
        let b = arena.alloc(2, null(), null());
        let c = arena.alloc(3, null(), null());

        arena.free(a);
        arena.free(c);

        // Most recently freed slot is reused first.
        assert_eq!(arena.alloc(4, null(), null()).index(), c.index());
        assert_eq!(arena.alloc(5, null(), null()).index(), a.index());
        assert_eq!(arena.node(b).value, 2);
    }

    #[test]
    fn test_arena_get_mut() {
        let mut arena = Arena::new();
        let node = arena.alloc("hello".to_string(), null(), null());

        arena.get_mut(node).unwrap().value = "world".to_string();
        assert_eq!(arena.node(node).value, "world");
    }

    #[test]
    fn test_arena_clear() {
        let mut arena = Arena::new();
        let a = arena.alloc(1, null(), null());
        let b = arena.alloc(2, null(), null());

        arena.clear();

        assert_eq!(arena.len(), 0);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), None);

        // Pre-clear handles must not revalidate against reused slots.
        let c = arena.alloc(3, null(), null());
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), None);
        assert_eq!(arena.node(c).value, 3);
    }

    #[test]
    fn test_arena_clone() {
        let mut arena = Arena::new();
        let a = arena.alloc(1, null(), null());
        let b = arena.alloc(2, null(), null());

        let cloned = arena.clone();
        assert_eq!(cloned.len(), arena.len());
        assert_eq!(cloned.node(a).value, 1);
        assert_eq!(cloned.node(b).value, 2);
    }

    #[test]
    fn test_arena_clone_with_free_slots() {
        let mut arena = Arena::new();
        let a = arena.alloc(1, null(), null());
        let b = arena.alloc(2, null(), null());
        let c = arena.alloc(3, null(), null());
        arena.free(b);

        let cloned = arena.clone();
        assert!(cloned.is_occupied(a));
        assert!(!cloned.is_occupied(b));
        assert!(cloned.is_occupied(c));
        assert_eq!(cloned.free_head, arena.free_head);
    }

    #[test]
    #[should_panic(expected = "Stale NodeRef")]
    fn test_arena_node_stale_handle() {
        let mut arena = Arena::new();
        let node = arena.alloc(1, null(), null());
        arena.free(node);
        let _ = arena.node(node);
    }

    #[test]
    #[should_panic(expected = "Stale NodeRef")]
    fn test_arena_free_stale_handle() {
        let mut arena = Arena::new();
        let node = arena.alloc(1, null(), null());
        arena.free(node);
        arena.free(node);
    }

    #[test]
    #[should_panic(expected = "Stale NodeRef")]
    fn test_arena_free_foreign_handle() {
        let mut arena: Arena<i32> = Arena::new();
        arena.free(null());
    }

    #[test]
    fn test_arena_out_of_range_handle() {
        let arena: Arena<i32> = Arena::new();
        assert_eq!(arena.get(null()), None);
        assert!(!arena.is_occupied(null()));
    }

    #[test]
    fn test_arena_len_tracks_alloc_free() {
        let mut arena = Arena::new();
        let nodes: Vec<_> = (0..10).map(|i| arena.alloc(i, null(), null())).collect();
        assert_eq!(arena.len(), 10);

        for (i, node) in nodes.into_iter().enumerate() {
            arena.free(node);
            assert_eq!(arena.len(), 10 - i - 1);
        }
    }
}
