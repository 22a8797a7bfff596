//! Numeric abstraction for strip and rectangle dimensions.

use core::fmt::{Debug, Display};

use num_traits::{Num, ToPrimitive};

/// A scalar usable as a strip or rectangle dimension.
///
/// Implemented for every primitive integer and float type. Floats may carry
/// NaN, which validation reports as a type error; integers are always
/// well-formed.
pub trait Dimension: Num + PartialOrd + Copy + ToPrimitive + Debug + Display {
    /// False only for values that are not comparable with themselves (NaN).
    #[inline]
    fn is_well_formed(self) -> bool {
        self.partial_cmp(&self).is_some()
    }
}

impl<T> Dimension for T where T: Num + PartialOrd + Copy + ToPrimitive + Debug + Display {}

/// Larger of two dimensions. Returns `a` when they compare equal.
#[inline]
pub(crate) fn max<T: Dimension>(a: T, b: T) -> T {
    if b > a { b } else { a }
}
