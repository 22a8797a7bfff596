//! Best-fit strip packer that may turn rectangles by 90°.

use crate::dimension::Dimension;
use crate::error::{self, PackError};
use crate::skyline::{SearchStrategy, SkylineSegment};
use crate::strip::Strip;
use crate::StripPack;

/// Bottom-left corner of a placed rectangle and whether it was turned.
///
/// When `rotated` is set the rectangle occupies `height` horizontally and
/// `width` vertically.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OrientedPlacement<T> {
    pub x: T,
    pub y: T,
    pub rotated: bool,
}

impl<T> OrientedPlacement<T> {
    pub const fn new(x: T, y: T, rotated: bool) -> Self {
        Self { x, y, rotated }
    }
}

/// Online best-fit packer that picks the better of both orientations.
///
/// A rectangle wider than the strip is always turned; one taller than the
/// strip is never turned. Otherwise the bottom row is filled first, trying
/// the wider-side-down orientation before the other, and once the row is
/// full both orientations are searched and the lower resulting top edge
/// wins. Equal outcomes keep the rectangle upright.
///
/// ```
/// use zenstrip::{OrientedPlacement, RotatableStripPacker};
///
/// let mut strip = RotatableStripPacker::new(1000).unwrap();
/// strip.insert(999, 1).unwrap();
/// // 1001 wide cannot go in upright.
/// assert_eq!(
///     strip.insert(1001, 3).unwrap(),
///     OrientedPlacement::new(0, 1, true)
/// );
/// assert_eq!(strip.packed_height(), 1002);
/// ```
#[derive(Clone, Debug)]
pub struct RotatableStripPacker<T: Dimension = f64> {
    strip: Strip<T>,
}

impl<T: Dimension> RotatableStripPacker<T> {
    /// Create an empty packer for a strip `strip_width` wide.
    pub fn new(strip_width: T) -> Result<Self, PackError<T>> {
        error::validate_strip_width(strip_width)?;
        log::debug!("new rotatable strip packer, width {strip_width}");
        Ok(Self {
            strip: Strip::new(strip_width),
        })
    }

    /// Choose how the best-fit search walks the height index.
    pub fn search_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strip.set_strategy(strategy);
        self
    }

    /// Place a `width` × `height` rectangle in whichever orientation ends
    /// lower.
    ///
    /// Fails without touching the packer when either dimension is not a
    /// positive number or both exceed the strip width.
    pub fn insert(&mut self, width: T, height: T) -> Result<OrientedPlacement<T>, PackError<T>> {
        let strip_width = self.strip.strip_width();
        error::validate_dimensions_rotatable(width, height, strip_width)?;

        let placement = if width > strip_width {
            self.place_fixed(height, width, true)
        } else if height > strip_width {
            self.place_fixed(width, height, false)
        } else if width >= height {
            self.place_either(width, height, false)
        } else {
            self.place_either(height, width, true)
        };
        Ok(placement)
    }

    /// Only one orientation fits; `(w, h)` is already that orientation.
    fn place_fixed(&mut self, w: T, h: T, rotated: bool) -> OrientedPlacement<T> {
        let (x, y) = if self.strip.fits_in_line(w) {
            self.strip.add_in_line(w, h)
        } else {
            self.strip.add_best_fit(w, h)
        };
        OrientedPlacement { x, y, rotated }
    }

    /// Both orientations fit. `(w, h)` is the preferred in-line orientation
    /// (wider side down) and `rotated` says whether that is the turned one.
    fn place_either(&mut self, w: T, h: T, rotated: bool) -> OrientedPlacement<T> {
        if self.strip.fits_in_line(w) {
            let (x, y) = self.strip.add_in_line(w, h);
            return OrientedPlacement { x, y, rotated };
        }
        if self.strip.fits_in_line(h) {
            let (x, y) = self.strip.add_in_line(h, w);
            return OrientedPlacement {
                x,
                y,
                rotated: !rotated,
            };
        }
        // Search always starts from the caller's upright orientation.
        let (width, height) = if rotated { (h, w) } else { (w, h) };
        let (x, y, rotated) = self.strip.add_best_fit_rotatable(width, height);
        OrientedPlacement { x, y, rotated }
    }

    /// Forget every placement. Strip width and search strategy are kept.
    pub fn reset(&mut self) {
        log::debug!(
            "reset rotatable strip packer, width {}",
            self.strip.strip_width()
        );
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

impl<T: Dimension> StripPack<T> for RotatableStripPacker<T> {
    type Placement = OrientedPlacement<T>;

    fn insert(&mut self, width: T, height: T) -> Result<OrientedPlacement<T>, PackError<T>> {
        RotatableStripPacker::insert(self, width, height)
    }

    fn reset(&mut self) {
        RotatableStripPacker::reset(self);
    }

    fn packed_height(&self) -> T {
        RotatableStripPacker::packed_height(self)
    }

    fn packed_width(&self) -> T {
        RotatableStripPacker::packed_width(self)
    }

    fn strip_width(&self) -> T {
        RotatableStripPacker::strip_width(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_wide_is_turned() {
        let mut strip = RotatableStripPacker::new(10).unwrap();
        assert_eq!(
            strip.insert(12, 3).unwrap(),
            OrientedPlacement::new(0, 0, true)
        );
        assert_eq!(strip.packed_width(), 3);
        assert_eq!(strip.packed_height(), 12);
    }

    #[test]
    fn too_tall_stays_upright() {
        let mut strip = RotatableStripPacker::new(10).unwrap();
        assert_eq!(
            strip.insert(3, 12).unwrap(),
            OrientedPlacement::new(0, 0, false)
        );
        assert_eq!(strip.packed_height(), 12);
    }

    #[test]
    fn too_tall_on_full_row_stacks_upright() {
        let mut strip = RotatableStripPacker::new(10).unwrap();
        strip.insert(10, 1).unwrap();
        assert_eq!(
            strip.insert(3, 12).unwrap(),
            OrientedPlacement::new(0, 1, false)
        );
        assert_eq!(strip.packed_height(), 13);
        assert_eq!(strip.packed_width(), 10);
        strip.strip.assert_valid();
    }

    #[test]
    fn in_line_prefers_wide_side_down() {
        let mut strip = RotatableStripPacker::new(10).unwrap();
        assert_eq!(
            strip.insert(2, 5).unwrap(),
            OrientedPlacement::new(0, 0, true)
        );
        assert_eq!(strip.packed_width(), 5);
        assert_eq!(
            strip.insert(4, 1).unwrap(),
            OrientedPlacement::new(5, 0, false)
        );
        assert_eq!(strip.packed_width(), 9);
    }

    #[test]
    fn in_line_falls_back_to_other_side() {
        let mut strip = RotatableStripPacker::new(10).unwrap();
        strip.insert(7, 1).unwrap();
        // 4 wide no longer fits the row, 2 wide does.
        assert_eq!(
            strip.insert(4, 2).unwrap(),
            OrientedPlacement::new(7, 0, true)
        );
        assert_eq!(strip.packed_width(), 9);
        assert_eq!(strip.packed_height(), 4);
    }

    #[test]
    fn full_row_searches_both_orientations() {
        let mut strip = RotatableStripPacker::new(10).unwrap();
        strip.insert(10, 1).unwrap();
        // Square: both orientations tie, upright wins.
        assert_eq!(
            strip.insert(3, 3).unwrap(),
            OrientedPlacement::new(0, 1, false)
        );
    }

    #[test]
    fn rejects_when_neither_side_fits() {
        let mut strip = RotatableStripPacker::new(10).unwrap();
        assert_eq!(
            strip.insert(11, 11).unwrap_err(),
            PackError::NoOrientationFits {
                width: 11,
                height: 11,
                strip_width: 10
            }
        );
        assert_eq!(strip.segment_count(), 0);
    }
}
