//! Best-fit search over the skyline.
//!
//! Every heap entry low enough to beat the current best candidate anchors a
//! "valley": the run of segments reachable from the anchor without climbing
//! above its height, widened leftwards first and then rightwards until the
//! rectangle's width is covered. The lowest valley wins, then the leftmost.

use super::sequence::SegmentId;
use super::Skyline;
use crate::dimension::{self, Dimension};

/// How the search walks the height index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchStrategy {
    /// Visit the heap level by level and stop after the first level in which
    /// no entry is low enough to improve the candidate. Every deeper entry is
    /// at least as high as its ancestor in that level.
    #[default]
    LevelPruned,
    /// Filter every heap entry. Slower, same result.
    Linear,
}

/// How the skyline changes when a fit is applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum FitAction {
    /// The rectangle sits inside the first segment.
    FirstNodeOnly,
    /// The rectangle covers `first..=last` exactly, or runs past the tail
    /// into unused strip width.
    RemoveRestNodes,
    /// The rectangle covers `first..last` and ends inside `last`.
    LastNodeSplit,
}

/// Candidate placement produced by the search, consumed by `apply`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct FitPosition<T> {
    pub x: T,
    pub y: T,
    pub first: SegmentId,
    pub last: SegmentId,
    pub action: FitAction,
}

impl<T: Dimension> Skyline<T> {
    /// Lowest, then leftmost, position for a rectangle `width` wide.
    ///
    /// Starts from stacking on top of everything at `packed_height`, which is
    /// always valid. `None` only when the skyline is empty.
    pub fn find_best_fit(
        &self,
        width: T,
        strip_width: T,
        packed_height: T,
        strategy: SearchStrategy,
    ) -> Option<FitPosition<T>> {
        let mut best = FitPosition {
            x: T::zero(),
            y: packed_height,
            first: self.sequence.head()?,
            last: self.sequence.tail()?,
            action: FitAction::RemoveRestNodes,
        };

        for level in self.index.levels() {
            let mut any_low = false;
            for entry in level {
                if entry.key > best.y {
                    continue;
                }
                any_low = true;
                self.try_valley(entry.segment, entry.key, width, strip_width, &mut best);
            }
            if !any_low && strategy == SearchStrategy::LevelPruned {
                break;
            }
        }
        Some(best)
    }

    /// Search both orientations. The upright candidate wins ties.
    ///
    /// Returns the chosen position and whether it is the rotated one.
    pub fn find_best_fit_rotatable(
        &self,
        width: T,
        height: T,
        strip_width: T,
        packed_height: T,
        strategy: SearchStrategy,
    ) -> Option<(FitPosition<T>, bool)> {
        let upright = self.find_best_fit(width, strip_width, packed_height, strategy)?;
        let turned = self.find_best_fit(height, strip_width, packed_height, strategy)?;
        if upright.y + height <= turned.y + width {
            Some((upright, false))
        } else {
            Some((turned, true))
        }
    }

    fn try_valley(
        &self,
        anchor: SegmentId,
        level: T,
        width: T,
        strip_width: T,
        best: &mut FitPosition<T>,
    ) {
        let mut first = anchor;
        while let Some(prev) = self.sequence.prev(first) {
            if self.height(prev) > level {
                break;
            }
            first = prev;
        }

        let mut last = first;
        let mut top = self.height(first);
        let mut run = self.width(first);
        while run < width {
            let Some(next) = self.sequence.next(last) else {
                break;
            };
            let height = self.height(next);
            if height > level {
                break;
            }
            last = next;
            top = dimension::max(top, height);
            run = run + self.width(next);
        }

        self.offer(first, last, width, top, strip_width, best);
    }

    /// Replace `best` with the run `first..=last` at height `y` if it is at
    /// least as good and actually holds `width`.
    fn offer(
        &self,
        first: SegmentId,
        last: SegmentId,
        width: T,
        y: T,
        strip_width: T,
        best: &mut FitPosition<T>,
    ) {
        let x = self.x(first);
        if y > best.y || (y == best.y && x > best.x) {
            return;
        }

        let covered = self.x(last) + self.width(last) - x;
        let action = if width <= covered {
            if first == last {
                FitAction::FirstNodeOnly
            } else if width == covered {
                FitAction::RemoveRestNodes
            } else {
                FitAction::LastNodeSplit
            }
        } else if Some(last) == self.sequence.tail() && width <= strip_width - x {
            FitAction::RemoveRestNodes
        } else {
            return;
        };

        *best = FitPosition {
            x,
            y,
            first,
            last,
            action,
        };
    }
}
