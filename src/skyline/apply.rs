//! Commit a [`FitPosition`] to the skyline.

use super::search::{FitAction, FitPosition};
use super::sequence::SegmentId;
use super::Skyline;
use crate::dimension::Dimension;

impl<T: Dimension> Skyline<T> {
    /// Place a `width` × `height` rectangle at `fit` and return its top edge.
    pub fn apply(&mut self, fit: &FitPosition<T>, width: T, height: T) -> T {
        let FitPosition {
            y,
            first,
            last,
            action,
            ..
        } = *fit;
        let top = y + height;

        match action {
            FitAction::FirstNodeOnly => {
                if width < self.width(first) {
                    self.split(first, width);
                }
                self.raise_to(first, top);
                self.merge_around(first, first);
            }
            FitAction::RemoveRestNodes => {
                self.detach_after(first, last);
                self.sequence.get_mut(first).width = width;
                self.raise_to(first, top);
                self.merge_around(first, first);
            }
            FitAction::LastNodeSplit => {
                let before_last = self.sequence.prev(last).unwrap_or(first);
                self.detach_after(first, before_last);
                self.sequence.get_mut(first).width = width;
                self.raise_to(first, top);

                let right = self.x(first) + width;
                let end = self.x(last) + self.width(last);
                let seg = self.sequence.get_mut(last);
                seg.x = right;
                seg.width = end - right;

                self.merge_around(first, last);
            }
        }
        top
    }

    /// Merge the range from the segment before `left` to the one after `right`.
    fn merge_around(&mut self, left: SegmentId, right: SegmentId) {
        let from = self.sequence.prev(left).unwrap_or(left);
        let to = self.sequence.next(right).unwrap_or(right);
        self.merge_equal(from, to);
    }
}
