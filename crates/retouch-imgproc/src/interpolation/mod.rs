//! Pixel interpolation methods for image resampling.
//!
//! # Interpolation Modes
//!
//! - **Bilinear**: linear interpolation between the two nearest samples on each axis
//! - **Area**: box filter average of the source samples under the destination pixel, for shrinking

mod bilinear;

pub(crate) use bilinear::linear_taps;

/// Interpolation mode for the resize operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    Bilinear,
    /// Box filter approximation of area averaging
    Area,
}
