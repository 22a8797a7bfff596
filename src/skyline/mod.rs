//! Skyline: the upper boundary of everything packed so far.
//!
//! The boundary is a chain of horizontal segments ([`sequence`]) paired
//! one-to-one with entries in an addressable min-heap over their heights
//! ([`heap`]). Each segment holds the handle of its heap entry and each heap
//! entry holds the id of its segment; the pair is created and destroyed
//! together.
//!
//! ```text
//!      ┌───┐
//!      │   │       ┌──────┐
//!   ┌──┘   │       │      └──┐
//!   │      └───────┘         │
//!   0  s0   s1      s2    s3  s4 ─► packed width
//! ```
//!
//! Invariants after every public operation:
//! - segments tile `[0, packed_width)` left to right without gaps,
//! - adjacent segments have different heights,
//! - the heap holds exactly one entry per segment.

mod apply;
mod heap;
mod search;
mod sequence;

pub use search::SearchStrategy;

use heap::HeightIndex;
use sequence::{SegmentId, Sequence};

use crate::dimension::Dimension;

/// Read-only view of one skyline segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SkylineSegment<T> {
    /// Left edge.
    pub x: T,
    /// Horizontal extent.
    pub width: T,
    /// Current top of the strip over this run.
    pub height: T,
}

#[derive(Clone, Debug)]
pub(crate) struct Skyline<T> {
    sequence: Sequence<T>,
    index: HeightIndex<T>,
}

impl<T: Dimension> Skyline<T> {
    pub fn new() -> Self {
        Self {
            sequence: Sequence::new(),
            index: HeightIndex::new(),
        }
    }

    pub fn clear(&mut self) {
        self.sequence.clear();
        self.index.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.sequence.len(), self.index.len());
        self.sequence.len()
    }

    /// Right edge of the tail segment, zero when empty.
    pub fn right_edge(&self) -> T {
        match self.sequence.tail() {
            Some(tail) => {
                let seg = self.sequence.get(tail);
                seg.x + seg.width
            }
            None => T::zero(),
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = SkylineSegment<T>> + '_ {
        self.sequence.iter().map(|(_, seg)| SkylineSegment {
            x: seg.x,
            width: seg.width,
            height: self.index.key(seg.entry),
        })
    }

    #[inline]
    fn height(&self, id: SegmentId) -> T {
        self.index.key(self.sequence.get(id).entry)
    }

    #[inline]
    fn width(&self, id: SegmentId) -> T {
        self.sequence.get(id).width
    }

    #[inline]
    fn x(&self, id: SegmentId) -> T {
        self.sequence.get(id).x
    }

    /// Extend the tail with a run at `height`, widening the tail in place
    /// when it already sits at that height.
    pub fn push(&mut self, width: T, height: T) {
        if let Some(tail) = self.sequence.tail()
            && self.height(tail) == height
        {
            let widened = self.width(tail) + width;
            self.sequence.get_mut(tail).width = widened;
            return;
        }
        let x = self.right_edge();
        let id = self.sequence.vacant_id();
        let entry = self.index.push(height, id);
        let pushed = self.sequence.push_back(x, width, entry);
        debug_assert_eq!(pushed, id);
    }

    /// Cut `id` at offset `width`; the right part keeps the old height.
    fn split(&mut self, id: SegmentId, width: T) {
        let (x, old_width) = {
            let seg = self.sequence.get(id);
            (seg.x, seg.width)
        };
        debug_assert!(width < old_width);
        let height = self.height(id);
        let new_id = self.sequence.vacant_id();
        let entry = self.index.push(height, new_id);
        let inserted = self.sequence.insert_after(id, x + width, old_width - width, entry);
        debug_assert_eq!(inserted, new_id);
        self.sequence.get_mut(id).width = width;
    }

    /// Remove a segment together with its heap entry.
    fn detach(&mut self, id: SegmentId) {
        let entry = self.sequence.detach(id);
        let removed = self.index.remove(entry);
        debug_assert!(removed.is_some(), "segment without heap entry");
    }

    /// Detach every segment after `first`, up to and including `last`.
    fn detach_after(&mut self, first: SegmentId, last: SegmentId) {
        if first == last {
            return;
        }
        let mut cursor = self.sequence.next(first);
        while let Some(id) = cursor {
            cursor = if id == last { None } else { self.sequence.next(id) };
            self.detach(id);
        }
    }

    /// Raise a segment to an absolute height.
    fn raise_to(&mut self, id: SegmentId, height: T) {
        let entry = self.sequence.get(id).entry;
        let delta = height - self.index.key(entry);
        self.index.increase_key(entry, delta);
    }

    /// Fold equal-height neighbours together, walking from `from` until
    /// `to` has been compared with its predecessor.
    fn merge_equal(&mut self, from: SegmentId, to: SegmentId) {
        let mut node = from;
        while node != to {
            let Some(next) = self.sequence.next(node) else {
                break;
            };
            if self.height(node) == self.height(next) {
                let width = self.width(node) + self.width(next);
                self.sequence.get_mut(node).width = width;
                self.detach(next);
                if next == to {
                    break;
                }
            } else {
                node = next;
            }
        }
    }

    /// Panics if any skyline invariant is broken.
    #[cfg(test)]
    pub fn assert_valid(&self) {
        self.index.assert_valid();
        assert_eq!(self.sequence.len(), self.index.len());
        let mut expected_x = T::zero();
        let mut prev_height = None;
        for (id, seg) in self.sequence.iter() {
            assert!(seg.x == expected_x, "gap before segment at {}", seg.x);
            assert!(seg.width > T::zero(), "empty segment at {}", seg.x);
            assert_eq!(self.index.segment(seg.entry), id, "broken back-link");
            let height = self.index.key(seg.entry);
            assert!(prev_height != Some(height), "unmerged neighbours at {}", seg.x);
            prev_height = Some(height);
            expected_x = seg.x + seg.width;
        }
        assert!(expected_x == self.right_edge());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    pub(super) fn profile(skyline: &Skyline<u32>) -> Vec<(u32, u32, u32)> {
        skyline
            .segments()
            .map(|s| (s.x, s.width, s.height))
            .collect()
    }

    pub(super) fn build(runs: &[(u32, u32)]) -> Skyline<u32> {
        let mut skyline = Skyline::new();
        for &(w, h) in runs {
            skyline.push(w, h);
        }
        skyline.assert_valid();
        skyline
    }

    #[test]
    fn push_widens_tail_at_same_height() {
        let skyline = build(&[(2, 5), (3, 5), (1, 2)]);
        assert_eq!(profile(&skyline), [(0, 5, 5), (5, 1, 2)]);
        assert_eq!(skyline.right_edge(), 6);
        assert_eq!(skyline.len(), 2);
    }

    #[test]
    fn split_keeps_height_on_both_parts() {
        let mut skyline = build(&[(10, 4)]);
        let head = skyline.sequence.head().unwrap();
        skyline.split(head, 3);
        assert_eq!(profile(&skyline), [(0, 3, 4), (3, 7, 4)]);
        assert_eq!(skyline.index.len(), 2);
    }

    #[test]
    fn merge_folds_both_sides() {
        let mut skyline = build(&[(2, 3), (2, 1), (2, 3)]);
        let ids: Vec<_> = skyline.sequence.iter().map(|(id, _)| id).collect();
        skyline.raise_to(ids[1], 3);
        skyline.merge_equal(ids[0], ids[2]);
        skyline.assert_valid();
        assert_eq!(profile(&skyline), [(0, 6, 3)]);
    }

    #[test]
    fn detach_after_removes_inclusive_range() {
        let mut skyline = build(&[(1, 1), (1, 2), (1, 3), (1, 4)]);
        let ids: Vec<_> = skyline.sequence.iter().map(|(id, _)| id).collect();
        skyline.detach_after(ids[0], ids[2]);
        assert_eq!(skyline.len(), 2);
        assert_eq!(skyline.index.len(), 2);
        assert_eq!(
            skyline.segments().map(|s| s.height).collect::<Vec<_>>(),
            [1, 4]
        );
    }

    #[test]
    fn clear_empties_both_structures() {
        let mut skyline = build(&[(1, 1), (1, 2)]);
        skyline.clear();
        assert_eq!(skyline.len(), 0);
        assert_eq!(skyline.right_edge(), 0);
        assert_eq!(skyline.segments().count(), 0);
    }
}
