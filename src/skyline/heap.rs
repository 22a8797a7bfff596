//! Addressable binary min-heap over segment heights.
//!
//! Entries are stored in a plain array laid out as an implicit binary tree.
//! A position map from [`EntryHandle`] to array index is updated on every
//! swap, so any entry can be raised or removed in O(log n) without a search.
//!
//! ```text
//!     level 0:            [0]
//!     level 1:        [1]       [2]
//!     level 2:      [3] [4]   [5] [6]
//!
//!     parent(i) = (i - 1) / 2      children(i) = 2i + 1, 2i + 2
//! ```

use alloc::vec::Vec;

use super::sequence::SegmentId;
use crate::dimension::Dimension;

/// Stable handle to a heap entry. Survives sifting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct EntryHandle(u32);

impl EntryHandle {
    #[cfg(test)]
    pub(crate) fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Entry<T> {
    pub key: T,
    pub segment: SegmentId,
    handle: EntryHandle,
}

#[derive(Clone, Debug)]
pub(crate) struct HeightIndex<T> {
    heap: Vec<Entry<T>>,
    /// Array position of each handle. Stale for freed handles.
    positions: Vec<usize>,
    free: Vec<EntryHandle>,
}

impl<T: Dimension> HeightIndex<T> {
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            positions: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
        self.free.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn key(&self, handle: EntryHandle) -> T {
        self.heap[self.positions[handle.index()]].key
    }

    #[cfg(test)]
    pub fn segment(&self, handle: EntryHandle) -> SegmentId {
        self.heap[self.positions[handle.index()]].segment
    }

    /// Insert `segment` at height `key`.
    pub fn push(&mut self, key: T, segment: SegmentId) -> EntryHandle {
        let pos = self.heap.len();
        let handle = match self.free.pop() {
            Some(h) => {
                self.positions[h.index()] = pos;
                h
            }
            None => {
                self.positions.push(pos);
                EntryHandle(self.positions.len() as u32 - 1)
            }
        };
        self.heap.push(Entry {
            key,
            segment,
            handle,
        });
        self.sift_up(pos);
        handle
    }

    /// Evict an arbitrary entry.
    pub fn remove(&mut self, handle: EntryHandle) -> Option<Entry<T>> {
        debug_assert!(!self.heap.is_empty(), "remove from empty height index");
        let pos = self.positions[handle.index()];
        let last = self.heap.len().checked_sub(1)?;
        self.swap(pos, last);
        let entry = self.heap.pop()?;
        debug_assert_eq!(entry.handle, handle);
        self.free.push(handle);
        if pos < self.heap.len() {
            let pos = self.sift_up(pos);
            self.sift_down(pos);
        }
        Some(entry)
    }

    /// Raise an entry's key by `delta`. Heights never shrink.
    ///
    /// A zero delta is legal: a float key can absorb a tiny increment.
    pub fn increase_key(&mut self, handle: EntryHandle, delta: T) {
        debug_assert!(delta >= T::zero(), "increase_key needs a non-negative delta");
        let pos = self.positions[handle.index()];
        self.heap[pos].key = self.heap[pos].key + delta;
        self.sift_down(pos);
    }

    /// The array split into tree levels `[2^i - 1, 2^(i+1) - 2]`, root first.
    pub fn levels(&self) -> Levels<'_, T> {
        Levels {
            rest: &self.heap,
            width: 1,
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].handle.index()] = a;
        self.positions[self.heap[b].handle.index()] = b;
    }

    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[pos].key < self.heap[parent].key {
                self.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.heap[right].key < self.heap[left].key {
                right
            } else {
                left
            };
            if self.heap[child].key < self.heap[pos].key {
                self.swap(pos, child);
                pos = child;
            } else {
                break;
            }
        }
    }

    /// Panics if the tree order or the position map is broken.
    #[cfg(test)]
    pub fn assert_valid(&self) {
        for (i, e) in self.heap.iter().enumerate() {
            assert_eq!(self.positions[e.handle.index()], i, "position map out of sync");
            if i > 0 {
                let parent = &self.heap[(i - 1) / 2];
                assert!(parent.key <= e.key, "heap order broken at {i}");
            }
        }
        assert_eq!(self.heap.len() + self.free.len(), self.positions.len());
    }
}

/// Iterator over heap levels, see [`HeightIndex::levels`].
pub(crate) struct Levels<'a, T> {
    rest: &'a [Entry<T>],
    width: usize,
}

impl<'a, T> Iterator for Levels<'a, T> {
    type Item = &'a [Entry<T>];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let take = self.width.min(self.rest.len());
        let (level, rest) = self.rest.split_at(take);
        self.rest = rest;
        self.width *= 2;
        Some(level)
    }
}
