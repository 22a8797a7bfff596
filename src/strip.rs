//! Packer state shared by both packer variants.

use crate::dimension::{self, Dimension};
use crate::skyline::{SearchStrategy, Skyline, SkylineSegment};

/// One strip: fixed width, running packed dimensions, and the skyline.
#[derive(Clone, Debug)]
pub(crate) struct Strip<T> {
    strip_width: T,
    packed_width: T,
    packed_height: T,
    skyline: Skyline<T>,
    strategy: SearchStrategy,
}

impl<T: Dimension> Strip<T> {
    /// `strip_width` must already be validated.
    pub fn new(strip_width: T) -> Self {
        Self {
            strip_width,
            packed_width: T::zero(),
            packed_height: T::zero(),
            skyline: Skyline::new(),
            strategy: SearchStrategy::default(),
        }
    }

    pub fn set_strategy(&mut self, strategy: SearchStrategy) {
        self.strategy = strategy;
    }

    #[cfg(test)]
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    #[inline]
    pub fn strip_width(&self) -> T {
        self.strip_width
    }

    #[inline]
    pub fn packed_width(&self) -> T {
        self.packed_width
    }

    #[inline]
    pub fn packed_height(&self) -> T {
        self.packed_height
    }

    pub fn segments(&self) -> impl Iterator<Item = SkylineSegment<T>> + '_ {
        self.skyline.segments()
    }

    pub fn segment_count(&self) -> usize {
        self.skyline.len()
    }

    pub fn reset(&mut self) {
        self.skyline.clear();
        self.packed_width = T::zero();
        self.packed_height = T::zero();
    }

    /// Whether a rectangle `width` wide still fits right of everything packed.
    #[inline]
    pub fn fits_in_line(&self, width: T) -> bool {
        // packed_width <= strip_width, so this cannot underflow.
        width <= self.strip_width - self.packed_width
    }

    /// Append to the bottom row. Caller checks [`fits_in_line`](Self::fits_in_line).
    pub fn add_in_line(&mut self, width: T, height: T) -> (T, T) {
        debug_assert!(self.fits_in_line(width));
        let x = self.packed_width;
        self.skyline.push(width, height);
        self.update_packed(height);
        log::trace!("in-line {width}x{height} at ({x}, 0)");
        (x, T::zero())
    }

    /// Best-fit placement in the given orientation.
    pub fn add_best_fit(&mut self, width: T, height: T) -> (T, T) {
        let fit = self.skyline.find_best_fit(
            width,
            self.strip_width,
            self.packed_height,
            self.strategy,
        );
        let Some(fit) = fit else {
            return self.add_in_line(width, height);
        };
        let top = self.skyline.apply(&fit, width, height);
        self.update_packed(top);
        log::trace!(
            "best-fit {width}x{height} at ({}, {}) via {:?}",
            fit.x,
            fit.y,
            fit.action
        );
        (fit.x, fit.y)
    }

    /// Best-fit placement choosing the better orientation.
    ///
    /// Returns `(x, y, rotated)`.
    pub fn add_best_fit_rotatable(&mut self, width: T, height: T) -> (T, T, bool) {
        let found = self.skyline.find_best_fit_rotatable(
            width,
            height,
            self.strip_width,
            self.packed_height,
            self.strategy,
        );
        let Some((fit, rotated)) = found else {
            let (x, y) = self.add_in_line(width, height);
            return (x, y, false);
        };
        let (w, h) = if rotated { (height, width) } else { (width, height) };
        let top = self.skyline.apply(&fit, w, h);
        self.update_packed(top);
        log::trace!(
            "best-fit {w}x{h} (rotated: {rotated}) at ({}, {}) via {:?}",
            fit.x,
            fit.y,
            fit.action
        );
        (fit.x, fit.y, rotated)
    }

    fn update_packed(&mut self, top: T) {
        self.packed_height = dimension::max(self.packed_height, top);
        self.packed_width = self.skyline.right_edge();
    }

    #[cfg(test)]
    pub fn assert_valid(&self) {
        self.skyline.assert_valid();
        assert!(self.packed_width == self.skyline.right_edge());
        assert!(self.packed_width <= self.strip_width);
    }
}
