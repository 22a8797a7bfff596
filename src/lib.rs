//! Online best-fit strip packing.
//!
//! Packs rectangles one at a time, in arrival order, into a strip of fixed
//! width and unbounded height. Every rectangle is committed where its top
//! edge ends lowest, leftmost on ties: the Best-Fit heuristic of Zhang, Mok
//! and Zhang (2009), with the skyline kept in a segment chain cross-linked
//! to an addressable min-heap of segment heights.
//!
//! Pure geometry, no I/O, `no_std` compatible (needs `alloc`).
//!
//! # Modules
//!
//! - [`packer`]: [`StripPacker`], rectangles keep their orientation
//! - [`rotatable`]: [`RotatableStripPacker`], rectangles may be turned 90°
//! - [`skyline`]: skyline view types and [`SearchStrategy`]
//! - [`error`]: [`PackError`] and its [`ErrorKind`]
//! - `svg` (feature `svg`): SVG rendering of a packed strip
//!
//! # Example
//!
//! ```
//! use zenstrip::{Placement, StripPacker};
//!
//! let mut strip = StripPacker::new(1000.0).unwrap();
//! for (w, h) in [(200.0, 20.0), (200.0, 30.0), (200.0, 10.0), (400.0, 40.0)] {
//!     strip.insert(w, h).unwrap();
//! }
//! // The row is full; a narrow rectangle drops into the lowest gap.
//! assert_eq!(strip.insert(50.0, 15.0).unwrap(), Placement::new(400.0, 10.0));
//! assert_eq!(strip.packed_height(), 40.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod dimension;
pub mod error;
pub mod packer;
pub mod rotatable;
pub mod skyline;
mod strip;
#[cfg(feature = "svg")]
pub mod svg;

pub use dimension::Dimension;
pub use error::{ErrorKind, PackError};
pub use packer::{Placement, StripPacker};
pub use rotatable::{OrientedPlacement, RotatableStripPacker};
pub use skyline::{SearchStrategy, SkylineSegment};

/// Interface shared by both packers.
///
/// ```
/// use zenstrip::{RotatableStripPacker, StripPack, StripPacker};
///
/// fn fill<P: StripPack<u32>>(packer: &mut P) -> u32 {
///     for _ in 0..4 {
///         packer.insert(2, 1).unwrap();
///     }
///     packer.packed_height()
/// }
///
/// assert_eq!(fill(&mut StripPacker::new(4).unwrap()), 2);
/// assert_eq!(fill(&mut RotatableStripPacker::new(4).unwrap()), 2);
/// ```
pub trait StripPack<T: Dimension> {
    /// What `insert` reports for a placed rectangle.
    type Placement;

    /// Place a rectangle, or reject it without changing any state.
    fn insert(&mut self, width: T, height: T) -> Result<Self::Placement, PackError<T>>;

    /// Return to the empty state. The strip width is kept.
    fn reset(&mut self);

    /// Highest top edge reached so far. Never decreases until `reset`.
    fn packed_height(&self) -> T;

    /// Right edge of the occupied part of the strip.
    fn packed_width(&self) -> T;

    fn strip_width(&self) -> T;
}
