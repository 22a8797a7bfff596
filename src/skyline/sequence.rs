//! Ordered chain of skyline segments.
//!
//! Segments live in a slot arena and link to their neighbours by
//! [`SegmentId`]. Freed slots are recycled through a free list, so ids stay
//! small and never dangle into reallocated memory.

use alloc::vec::Vec;

use super::heap::EntryHandle;

/// Stable index of a segment slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SegmentId(u32);

impl SegmentId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One horizontal run of the skyline. Its height lives in the heap entry.
#[derive(Clone, Debug)]
pub(crate) struct Segment<T> {
    pub x: T,
    pub width: T,
    pub entry: EntryHandle,
    prev: Option<SegmentId>,
    next: Option<SegmentId>,
    live: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct Sequence<T> {
    slots: Vec<Segment<T>>,
    free: Vec<SegmentId>,
    head: Option<SegmentId>,
    tail: Option<SegmentId>,
    len: usize,
}

impl<T: Copy> Sequence<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn head(&self) -> Option<SegmentId> {
        self.head
    }

    #[inline]
    pub fn tail(&self) -> Option<SegmentId> {
        self.tail
    }

    #[inline]
    pub fn get(&self, id: SegmentId) -> &Segment<T> {
        let seg = &self.slots[id.index()];
        debug_assert!(seg.live, "stale segment id {id:?}");
        seg
    }

    #[inline]
    pub fn get_mut(&mut self, id: SegmentId) -> &mut Segment<T> {
        let seg = &mut self.slots[id.index()];
        debug_assert!(seg.live, "stale segment id {id:?}");
        seg
    }

    #[inline]
    pub fn next(&self, id: SegmentId) -> Option<SegmentId> {
        self.get(id).next
    }

    #[inline]
    pub fn prev(&self, id: SegmentId) -> Option<SegmentId> {
        self.get(id).prev
    }

    /// The id the next `push_back` or `insert_after` will hand out.
    ///
    /// Lets the caller register the heap entry before the segment exists.
    #[inline]
    pub fn vacant_id(&self) -> SegmentId {
        match self.free.last() {
            Some(&id) => id,
            None => SegmentId(self.slots.len() as u32),
        }
    }

    fn alloc(&mut self, seg: Segment<T>) -> SegmentId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = seg;
                id
            }
            None => {
                let id = SegmentId(self.slots.len() as u32);
                self.slots.push(seg);
                id
            }
        }
    }

    /// Append a segment after the current tail.
    pub fn push_back(&mut self, x: T, width: T, entry: EntryHandle) -> SegmentId {
        let id = self.alloc(Segment {
            x,
            width,
            entry,
            prev: self.tail,
            next: None,
            live: true,
        });
        match self.tail {
            Some(tail) => self.slots[tail.index()].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    /// Link a new segment directly after `at`.
    pub fn insert_after(&mut self, at: SegmentId, x: T, width: T, entry: EntryHandle) -> SegmentId {
        let next = self.next(at);
        let id = self.alloc(Segment {
            x,
            width,
            entry,
            prev: Some(at),
            next,
            live: true,
        });
        self.slots[at.index()].next = Some(id);
        match next {
            Some(n) => self.slots[n.index()].prev = Some(id),
            None => self.tail = Some(id),
        }
        self.len += 1;
        id
    }

    /// Unlink `id` and release its slot. Returns the removed segment's entry.
    pub fn detach(&mut self, id: SegmentId) -> EntryHandle {
        let (prev, next, entry) = {
            let seg = self.get(id);
            (seg.prev, seg.next, seg.entry)
        };
        match prev {
            Some(p) => self.slots[p.index()].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n.index()].prev = prev,
            None => self.tail = prev,
        }
        let seg = &mut self.slots[id.index()];
        seg.prev = None;
        seg.next = None;
        seg.live = false;
        self.free.push(id);
        self.len -= 1;
        entry
    }

    /// Segments from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            seq: self,
            cursor: self.head,
        }
    }
}

pub(crate) struct Iter<'a, T> {
    seq: &'a Sequence<T>,
    cursor: Option<SegmentId>,
}

impl<'a, T: Copy> Iterator for Iter<'a, T> {
    type Item = (SegmentId, &'a Segment<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let seg = self.seq.get(id);
        self.cursor = seg.next;
        Some((id, seg))
    }
}
