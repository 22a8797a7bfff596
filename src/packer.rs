//! Fixed-orientation best-fit strip packer.

use crate::dimension::Dimension;
use crate::error::{self, PackError};
use crate::skyline::{SearchStrategy, SkylineSegment};
use crate::strip::Strip;
use crate::StripPack;

/// Bottom-left corner of a placed rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Placement<T> {
    pub x: T,
    pub y: T,
}

impl<T> Placement<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Online best-fit packer that never rotates rectangles.
///
/// Each [`insert`](Self::insert) commits immediately: first the bottom row
/// is filled left to right, then every rectangle goes wherever its top edge
/// ends lowest (leftmost on ties).
///
/// ```
/// use zenstrip::{Placement, StripPacker};
///
/// let mut strip = StripPacker::new(3).unwrap();
/// assert_eq!(strip.insert(1, 1).unwrap(), Placement::new(0, 0));
/// assert_eq!(strip.insert(1, 1).unwrap(), Placement::new(1, 0));
/// assert_eq!(strip.insert(1, 1).unwrap(), Placement::new(2, 0));
/// // The bottom row is full; the next one goes on top.
/// assert_eq!(strip.insert(1, 1).unwrap(), Placement::new(0, 1));
/// assert_eq!(strip.packed_height(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct StripPacker<T: Dimension = f64> {
    strip: Strip<T>,
}

impl<T: Dimension> StripPacker<T> {
    /// Create an empty packer for a strip `strip_width` wide.
    pub fn new(strip_width: T) -> Result<Self, PackError<T>> {
        error::validate_strip_width(strip_width)?;
        log::debug!("new strip packer, width {strip_width}");
        Ok(Self {
            strip: Strip::new(strip_width),
        })
    }

    /// Choose how the best-fit search walks the height index.
    pub fn search_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strip.set_strategy(strategy);
        self
    }

    /// Place a `width` × `height` rectangle and return its bottom-left corner.
    ///
    /// Fails without touching the packer when either dimension is not a
    /// positive number or `width` exceeds the strip. Height is unbounded.
    pub fn insert(&mut self, width: T, height: T) -> Result<Placement<T>, PackError<T>> {
        error::validate_dimensions(width, height, self.strip.strip_width())?;
        let (x, y) = if self.strip.fits_in_line(width) {
            self.strip.add_in_line(width, height)
        } else {
            self.strip.add_best_fit(width, height)
        };
        Ok(Placement { x, y })
    }

    /// Forget every placement. Strip width and search strategy are kept.
    pub fn reset(&mut self) {
        log::debug!("reset strip packer, width {}", self.strip.strip_width());
        self.strip.reset();
    }

    /// Highest top edge any placement has reached.
    pub fn packed_height(&self) -> T {
        self.strip.packed_height()
    }

    /// Right edge of the occupied part of the strip.
    pub fn packed_width(&self) -> T {
        self.strip.packed_width()
    }

    pub fn strip_width(&self) -> T {
        self.strip.strip_width()
    }

    /// Current skyline segments, left to right.
    pub fn skyline(&self) -> impl Iterator<Item = SkylineSegment<T>> + '_ {
        self.strip.segments()
    }

    pub fn segment_count(&self) -> usize {
        self.strip.segment_count()
    }
}

impl<T: Dimension> StripPack<T> for StripPacker<T> {
    type Placement = Placement<T>;

    fn insert(&mut self, width: T, height: T) -> Result<Placement<T>, PackError<T>> {
        StripPacker::insert(self, width, height)
    }

    fn reset(&mut self) {
        StripPacker::reset(self);
    }

    fn packed_height(&self) -> T {
        StripPacker::packed_height(self)
    }

    fn packed_width(&self) -> T {
        StripPacker::packed_width(self)
    }

    fn strip_width(&self) -> T {
        StripPacker::strip_width(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rejects_bad_strip_width() {
        assert_eq!(
            StripPacker::new(0).unwrap_err(),
            PackError::StripWidthNotPositive(0)
        );
        assert_eq!(
            StripPacker::new(f64::NAN).unwrap_err().kind(),
            ErrorKind::Type
        );
    }

    #[test]
    fn rejected_insert_leaves_state_untouched() {
        let mut strip = StripPacker::new(10).unwrap();
        strip.insert(4, 2).unwrap();
        assert!(strip.insert(11, 1).is_err());
        assert!(strip.insert(0, 1).is_err());
        assert!(strip.insert(3, -1).is_err());
        assert_eq!(strip.packed_width(), 4);
        assert_eq!(strip.packed_height(), 2);
        assert_eq!(strip.segment_count(), 1);
        strip.strip.assert_valid();
    }

    #[test]
    fn single_column_stacks() {
        let mut strip = StripPacker::new(1u32).unwrap();
        for i in 0..99 {
            assert_eq!(strip.insert(1, 1).unwrap(), Placement::new(0, i));
        }
        assert_eq!(strip.packed_height(), 99);
        assert_eq!(strip.segment_count(), 1);
    }

    #[test]
    fn tall_rectangle_stacks() {
        let mut strip = StripPacker::new(10.0).unwrap();
        strip.insert(10.0, 1.0).unwrap();
        assert_eq!(strip.insert(5.0, 250.0).unwrap(), Placement::new(0.0, 1.0));
        assert_eq!(strip.packed_height(), 251.0);
    }

    #[test]
    fn strategies_agree() {
        let dims = [(3, 7), (5, 2), (4, 4), (6, 1), (2, 9), (7, 3), (1, 1), (8, 2), (3, 3)];
        let mut pruned = StripPacker::new(10).unwrap();
        let mut linear = StripPacker::new(10)
            .unwrap()
            .search_strategy(SearchStrategy::Linear);
        for (w, h) in dims {
            assert_eq!(pruned.insert(w, h).unwrap(), linear.insert(w, h).unwrap());
            pruned.strip.assert_valid();
        }
        assert!(pruned.skyline().eq(linear.skyline()));
    }
}
