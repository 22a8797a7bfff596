//! Packer errors and input validation.
//!
//! Validation runs before any mutation, so a rejected call leaves the packer
//! exactly as it was.

use core::fmt;

use crate::dimension::Dimension;

/// Broad category of a [`PackError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value is not a well-formed number (NaN).
    Type,
    /// A well-formed number violates a positivity or strip-fit rule.
    Range,
}

/// Error returned by packer construction and insertion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PackError<T> {
    /// Strip width is NaN.
    StripWidthNotNumeric(T),
    /// Strip width is zero or negative.
    StripWidthNotPositive(T),
    /// Either rectangle dimension is NaN.
    DimensionsNotNumeric { width: T, height: T },
    /// Either rectangle dimension is zero or negative.
    DimensionsNotPositive { width: T, height: T },
    /// Rectangle is wider than the strip and may not be rotated.
    WidthExceedsStrip { width: T, strip_width: T },
    /// Neither orientation of the rectangle fits the strip width.
    NoOrientationFits { width: T, height: T, strip_width: T },
}

impl<T> PackError<T> {
    /// Whether this is a type or a range error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StripWidthNotNumeric(_) | Self::DimensionsNotNumeric { .. } => ErrorKind::Type,
            Self::StripWidthNotPositive(_)
            | Self::DimensionsNotPositive { .. }
            | Self::WidthExceedsStrip { .. }
            | Self::NoOrientationFits { .. } => ErrorKind::Range,
        }
    }
}

impl<T: fmt::Display> fmt::Display for PackError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StripWidthNotNumeric(w) => {
                write!(f, "strip width ({w}) should be a numerical value")
            }
            Self::StripWidthNotPositive(w) => {
                write!(f, "strip width ({w}) should be greater than 0")
            }
            Self::DimensionsNotNumeric { width, height } => {
                write!(f, "both dimensions ({width}x{height}) should be numerical values")
            }
            Self::DimensionsNotPositive { width, height } => {
                write!(f, "both dimensions ({width}x{height}) should be greater than 0")
            }
            Self::WidthExceedsStrip { width, strip_width } => {
                write!(f, "width ({width}) should not exceed strip width ({strip_width})")
            }
            Self::NoOrientationFits {
                width,
                height,
                strip_width,
            } => write!(
                f,
                "at least one of the dimensions ({width}x{height}) should not exceed strip width ({strip_width})"
            ),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> core::error::Error for PackError<T> {}

pub(crate) fn validate_strip_width<T: Dimension>(strip_width: T) -> Result<(), PackError<T>> {
    if !strip_width.is_well_formed() {
        return Err(PackError::StripWidthNotNumeric(strip_width));
    }
    if strip_width <= T::zero() {
        return Err(PackError::StripWidthNotPositive(strip_width));
    }
    Ok(())
}

fn validate_positive<T: Dimension>(width: T, height: T) -> Result<(), PackError<T>> {
    if !width.is_well_formed() || !height.is_well_formed() {
        return Err(PackError::DimensionsNotNumeric { width, height });
    }
    if width <= T::zero() || height <= T::zero() {
        return Err(PackError::DimensionsNotPositive { width, height });
    }
    Ok(())
}

/// Rules for the fixed-orientation packer. Height is unconstrained.
pub(crate) fn validate_dimensions<T: Dimension>(
    width: T,
    height: T,
    strip_width: T,
) -> Result<(), PackError<T>> {
    validate_positive(width, height)?;
    if width > strip_width {
        return Err(PackError::WidthExceedsStrip { width, strip_width });
    }
    Ok(())
}

/// Rules for the rotatable packer: one orientation has to fit.
pub(crate) fn validate_dimensions_rotatable<T: Dimension>(
    width: T,
    height: T,
    strip_width: T,
) -> Result<(), PackError<T>> {
    validate_positive(width, height)?;
    if width > strip_width && height > strip_width {
        return Err(PackError::NoOrientationFits {
            width,
            height,
            strip_width,
        });
    }
    Ok(())
}
