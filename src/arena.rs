use std::fmt;

/// Handle to a node slot. Only meaningful for the arena that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIdx(pub(crate) usize);

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
enum Slot<T> {
    Live(T),
    // next free slot
    TombStone(Option<usize>),
}

impl<T> Slot<T> {
    fn value(&self) -> Option<&T> {
        match self {
            Slot::Live(t) => Some(t),
            Slot::TombStone(_) => None,
        }
    }

    fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Live(t) => Some(t),
            Slot::TombStone(_) => None,
        }
    }

    fn next_free_exn(&self) -> Option<usize> {
        match self {
            Slot::TombStone(next) => *next,
            Slot::Live(_) => panic!("expected tombstone on the free list"),
        }
    }
}

/// Owns every node of a tree. Freed slots are threaded into a free list and
/// reused before the backing vector grows.
#[derive(Clone, Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    first_free: Option<usize>,
    live: usize,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            first_free: None,
            live: 0,
        }
    }

    pub fn alloc(&mut self, t: T) -> NodeIdx {
        self.live += 1;
        match self.first_free {
            Some(idx) => {
                self.first_free = self.slots[idx].next_free_exn();
                self.slots[idx] = Slot::Live(t);
                NodeIdx(idx)
            }
            None => {
                self.slots.push(Slot::Live(t));
                NodeIdx(self.slots.len() - 1)
            }
        }
    }

    /// Releases the slot and hands back what it held.
    pub fn free(&mut self, idx: NodeIdx) -> T {
        let slot = std::mem::replace(&mut self.slots[idx.0], Slot::TombStone(self.first_free));
        match slot {
            Slot::Live(t) => {
                self.first_free = Some(idx.0);
                self.live -= 1;
                t
            }
            Slot::TombStone(_) => panic!("double free of arena slot {}", idx),
        }
    }

    pub fn get(&self, idx: NodeIdx) -> Option<&T> {
        self.slots.get(idx.0).and_then(Slot::value)
    }

    pub fn get_mut(&mut self, idx: NodeIdx) -> Option<&mut T> {
        self.slots.get_mut(idx.0).and_then(Slot::value_mut)
    }

    pub fn get_exn(&self, idx: NodeIdx) -> &T {
        match self.get(idx) {
            Some(t) => t,
            None => panic!("stale arena handle {}", idx),
        }
    }

    pub fn get_mut_exn(&mut self, idx: NodeIdx) -> &mut T {
        match self.get_mut(idx) {
            Some(t) => t,
            None => panic!("stale arena handle {}", idx),
        }
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.first_free = None;
        self.live = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slots_are_reused_lifo() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        let c = arena.alloc("c");
        assert_eq!(arena.free(a), "a");
        assert_eq!(arena.free(c), "c");
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(a), None);

        assert_eq!(arena.alloc("d"), c);
        assert_eq!(arena.alloc("e"), a);
        assert_eq!(arena.alloc("f"), NodeIdx(3));
        assert_eq!(arena.get_exn(b), &"b");
        assert_eq!(arena.len(), 4);
    }

    #[test]
    #[should_panic(expected = "double free")]
    fn double_free_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        arena.free(a);
        arena.free(a);
    }

    #[test]
    fn clear_resets_handles() {
        let mut arena = Arena::new();
        arena.alloc(1);
        arena.alloc(2);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.alloc(3), NodeIdx(0));
    }
}
